//! Conversation scope authorization
//!
//! Decides whether a user takes part in a channel, group or DM.

use huddle_core::{ConversationScope, DomainError, ScopeTarget, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Scope authorizer
pub struct ScopeAuthorizer<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScopeAuthorizer<'a> {
    /// Create a new ScopeAuthorizer
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse a raw `(scope, scope_id)` pair from a request path
    pub fn resolve(scope: &str, scope_id: &str) -> ServiceResult<ScopeTarget> {
        let scope: ConversationScope = scope.parse()?;
        Ok(ScopeTarget::parse(scope, scope_id)?)
    }

    /// Fail unless `user_id` is a participant of `target`
    #[instrument(skip(self))]
    pub async fn authorize(&self, target: &ScopeTarget, user_id: Snowflake) -> ServiceResult<()> {
        match *target {
            ScopeTarget::Dm { .. } => {
                if !target.dm_includes(user_id) {
                    return Err(DomainError::NotParticipant.into());
                }
            }
            ScopeTarget::Group(group_id) => {
                if !self
                    .ctx
                    .membership_repo()
                    .is_group_member(group_id, user_id)
                    .await?
                {
                    return Err(DomainError::NotParticipant.into());
                }
            }
            ScopeTarget::Channel(channel_id) => {
                self.require_channel_member(channel_id, user_id).await?;
            }
        }

        Ok(())
    }

    /// Fail unless `user_id` is a member of the channel
    #[instrument(skip(self))]
    pub async fn require_channel_member(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        if self
            .ctx
            .membership_repo()
            .is_channel_member(channel_id, user_id)
            .await?
        {
            Ok(())
        } else {
            Err(DomainError::NotChannelMember(channel_id).into())
        }
    }

    /// Every user taking part in `target`
    #[instrument(skip(self))]
    pub async fn participants(&self, target: &ScopeTarget) -> ServiceResult<Vec<Snowflake>> {
        let members = match *target {
            ScopeTarget::Dm { low, high } => vec![low, high],
            ScopeTarget::Group(group_id) => self.ctx.membership_repo().group_members(group_id).await?,
            ScopeTarget::Channel(channel_id) => {
                self.ctx.membership_repo().channel_members(channel_id).await?
            }
        };
        Ok(members)
    }
}
