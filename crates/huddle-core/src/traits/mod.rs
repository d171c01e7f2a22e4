//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ConversationKeyRepository, DeviceRepository, MembershipRepository, RepoResult,
};
