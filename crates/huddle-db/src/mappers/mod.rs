//! Entity to model mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database writes

mod conversation_key;
mod device;

pub use conversation_key::ConversationKeyInsert;
pub use device::DeviceInsert;
