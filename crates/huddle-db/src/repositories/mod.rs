//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in huddle-core.

mod conversation_key;
mod device;
mod error;
mod membership;

pub use conversation_key::PgConversationKeyRepository;
pub use device::PgDeviceRepository;
pub use membership::PgMembershipRepository;
