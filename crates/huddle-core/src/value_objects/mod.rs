//! Value objects - immutable types that represent domain concepts

mod scope;
mod snowflake;

pub use scope::{ConversationScope, ScopeTarget};
pub use snowflake::{Snowflake, SnowflakeParseError};
