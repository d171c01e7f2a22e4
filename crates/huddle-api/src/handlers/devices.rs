//! Device directory handlers

use axum::{
    extract::{Path, State},
    Json,
};
use huddle_service::{DeviceResponse, DeviceService, RegisterDeviceRequest};

use crate::extractors::{AuthUser, DeviceIdPath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a device or rotate its public key
///
/// POST /devices
pub async fn register_device(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RegisterDeviceRequest>,
) -> ApiResult<Created<Json<DeviceResponse>>> {
    let device = DeviceService::new(state.service_context())
        .register_device(auth.user_id, request)
        .await?;

    Ok(Created(Json(device)))
}

/// GET /users/@me/devices
pub async fn list_my_devices(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<DeviceResponse>>> {
    let devices = DeviceService::new(state.service_context())
        .list_user_devices(auth.user_id)
        .await?;

    Ok(Json(devices))
}

/// Public device listing of any user
///
/// GET /users/{user_id}/devices
pub async fn list_user_devices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<DeviceResponse>>> {
    let user_id = path.user_id()?;

    let devices = DeviceService::new(state.service_context())
        .list_user_devices(user_id)
        .await?;

    Ok(Json(devices))
}

/// Delete one of the caller's devices and its stored keys
///
/// DELETE /devices/{device_id}
pub async fn remove_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DeviceIdPath>,
) -> ApiResult<NoContent> {
    DeviceService::new(state.service_context())
        .remove_device(auth.user_id, &path.device_id)
        .await?;

    Ok(NoContent)
}
