//! Typing service
//!
//! Membership-checked access to the in-memory typing store.

use huddle_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{TypingListResponse, TypingStartedResponse, TypingUserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scope::ScopeAuthorizer;

/// Typing service
pub struct TypingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TypingService<'a> {
    /// Create a new TypingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record that the user is typing in a channel
    #[instrument(skip(self))]
    pub async fn record_typing(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        user_name: String,
    ) -> ServiceResult<TypingStartedResponse> {
        ScopeAuthorizer::new(self.ctx)
            .require_channel_member(channel_id, user_id)
            .await?;

        let entry = self.ctx.typing_store().record(channel_id, user_id, user_name);
        debug!(channel_id = %channel_id, user_id = %user_id, "Typing recorded");

        Ok(TypingStartedResponse::from(&entry))
    }

    /// Clear the user's typing indicator in a channel
    #[instrument(skip(self))]
    pub async fn stop_typing(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        ScopeAuthorizer::new(self.ctx)
            .require_channel_member(channel_id, user_id)
            .await?;

        self.ctx.typing_store().stop(channel_id, user_id);
        Ok(())
    }

    /// Users typing in a channel, oldest signal first
    #[instrument(skip(self))]
    pub async fn list_typing(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<TypingListResponse> {
        ScopeAuthorizer::new(self.ctx)
            .require_channel_member(channel_id, user_id)
            .await?;

        let typing = self
            .ctx
            .typing_store()
            .list(channel_id)
            .into_iter()
            .map(TypingUserResponse::from)
            .collect();

        Ok(TypingListResponse { typing })
    }
}
