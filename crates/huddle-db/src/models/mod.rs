//! Database models - SQLx-compatible structs for PostgreSQL tables

mod conversation_key;
mod device;

pub use conversation_key::ConversationKeyModel;
pub use device::{DeviceModel, DeviceOwnerModel};
