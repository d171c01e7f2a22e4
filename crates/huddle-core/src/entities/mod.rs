//! Domain entities - core business objects

mod conversation_key;
mod device;
mod typing;

pub use conversation_key::ConversationKey;
pub use device::Device;
pub use typing::TypingEntry;
