//! Typing indicator handlers

use axum::{
    extract::{Path, State},
    Json,
};
use huddle_service::{TypingListResponse, TypingRequest, TypingService, TypingStartedResponse};

use crate::extractors::{AuthUser, ChannelIdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Signal that the caller is typing
///
/// POST /channels/{channel_id}/typing
pub async fn start_typing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChannelIdPath>,
    ValidatedJson(request): ValidatedJson<TypingRequest>,
) -> ApiResult<Json<TypingStartedResponse>> {
    let channel_id = path.channel_id()?;
    let user_name = request
        .user_name
        .unwrap_or_else(|| auth.display_name());

    let response = TypingService::new(state.service_context())
        .record_typing(channel_id, auth.user_id, user_name)
        .await?;

    Ok(Json(response))
}

/// Clear the caller's typing indicator
///
/// DELETE /channels/{channel_id}/typing
pub async fn stop_typing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChannelIdPath>,
) -> ApiResult<NoContent> {
    let channel_id = path.channel_id()?;

    TypingService::new(state.service_context())
        .stop_typing(channel_id, auth.user_id)
        .await?;

    Ok(NoContent)
}

/// List who is typing
///
/// GET /channels/{channel_id}/typing
pub async fn list_typing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ChannelIdPath>,
) -> ApiResult<Json<TypingListResponse>> {
    let channel_id = path.channel_id()?;

    let response = TypingService::new(state.service_context())
        .list_typing(channel_id, auth.user_id)
        .await?;

    Ok(Json(response))
}
