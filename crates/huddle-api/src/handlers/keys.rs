//! Conversation key handlers
//!
//! Clients encrypt a conversation key once per participant device and
//! upload the batch; each device later fetches its own copy.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use huddle_service::{
    ConversationKeyResponse, GetKeyQuery, KeyService, SaveKeysRequest, SaveKeysResponse,
    ScopeDevicesResponse,
};

use crate::extractors::{AuthUser, ScopePath, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Store encrypted copies of a conversation key
///
/// PUT /keys/{scope}/{scope_id}
pub async fn save_keys(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ScopePath>,
    ValidatedJson(request): ValidatedJson<SaveKeysRequest>,
) -> ApiResult<Json<SaveKeysResponse>> {
    let response = KeyService::new(state.service_context())
        .save_keys(&path.scope, &path.scope_id, auth.user_id, request)
        .await?;

    Ok(Json(response))
}

/// Fetch the copy stored for one of the caller's devices
///
/// GET /keys/{scope}/{scope_id}?device_id=...
pub async fn get_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ScopePath>,
    query: Result<Query<GetKeyQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<ConversationKeyResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    if query.device_id.is_empty() {
        return Err(ApiError::invalid_query("device_id must not be empty"));
    }

    let response = KeyService::new(state.service_context())
        .get_key(&path.scope, &path.scope_id, auth.user_id, &query.device_id)
        .await?;

    Ok(Json(response))
}

/// Every participant device of a conversation
///
/// GET /keys/{scope}/{scope_id}/devices
pub async fn list_scope_devices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ScopePath>,
) -> ApiResult<Json<ScopeDevicesResponse>> {
    let response = KeyService::new(state.service_context())
        .list_scope_devices(&path.scope, &path.scope_id, auth.user_id)
        .await?;

    Ok(Json(response))
}
