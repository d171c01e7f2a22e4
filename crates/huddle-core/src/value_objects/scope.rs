//! Conversation scope - the kind of conversation a key or membership check applies to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Conversation scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationScope {
    /// Guild-style text channel, membership in `channel_members`
    Channel,
    /// Direct message between exactly two users
    Dm,
    /// Group chat, membership in `group_members`
    Group,
}

impl ConversationScope {
    /// Get the storage/wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Dm => "dm",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for ConversationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channel" => Ok(Self::Channel),
            "dm" => Ok(Self::Dm),
            "group" => Ok(Self::Group),
            other => Err(DomainError::InvalidScope(other.to_string())),
        }
    }
}

/// A parsed conversation: scope plus the typed identifier behind the raw scope id
///
/// DM scope ids have the form `"<userA>:<userB>"`. They are canonicalized
/// with the smaller id first, so `"7:3"` and `"3:7"` address the same rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeTarget {
    Channel(Snowflake),
    Group(Snowflake),
    Dm { low: Snowflake, high: Snowflake },
}

impl ScopeTarget {
    /// Parse a raw scope id for the given scope
    pub fn parse(scope: ConversationScope, scope_id: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidScopeId(scope_id.to_string());

        match scope {
            ConversationScope::Channel => Snowflake::parse(scope_id)
                .map(Self::Channel)
                .map_err(|_| invalid()),
            ConversationScope::Group => Snowflake::parse(scope_id)
                .map(Self::Group)
                .map_err(|_| invalid()),
            ConversationScope::Dm => {
                let (a, b) = scope_id.split_once(':').ok_or_else(invalid)?;
                let a = Snowflake::parse(a).map_err(|_| invalid())?;
                let b = Snowflake::parse(b).map_err(|_| invalid())?;
                if a == b {
                    return Err(invalid());
                }
                Ok(Self::Dm {
                    low: a.min(b),
                    high: a.max(b),
                })
            }
        }
    }

    /// Build a DM target from two participants
    pub fn dm(a: Snowflake, b: Snowflake) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::InvalidScopeId(format!("{a}:{b}")));
        }
        Ok(Self::Dm {
            low: a.min(b),
            high: a.max(b),
        })
    }

    /// Get the scope of this target
    #[must_use]
    pub fn scope(&self) -> ConversationScope {
        match self {
            Self::Channel(_) => ConversationScope::Channel,
            Self::Group(_) => ConversationScope::Group,
            Self::Dm { .. } => ConversationScope::Dm,
        }
    }

    /// Canonical scope id used as the storage key
    #[must_use]
    pub fn scope_id(&self) -> String {
        match self {
            Self::Channel(id) | Self::Group(id) => id.to_string(),
            Self::Dm { low, high } => format!("{low}:{high}"),
        }
    }

    /// Check whether a user is one of the two DM participants
    ///
    /// Always false for channel and group targets, whose membership lives in tables.
    #[must_use]
    pub fn dm_includes(&self, user_id: Snowflake) -> bool {
        match self {
            Self::Dm { low, high } => *low == user_id || *high == user_id,
            _ => false,
        }
    }
}

impl fmt::Display for ScopeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope(), self.scope_id())
    }
}
