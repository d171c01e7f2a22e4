//! Device directory service

use huddle_core::{Device, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{DeviceResponse, RegisterDeviceRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Device service
pub struct DeviceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeviceService<'a> {
    /// Create a new DeviceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register one of the caller's devices, or rotate its public key
    #[instrument(skip(self, request), fields(device_id = %request.device_id))]
    pub async fn register_device(
        &self,
        user_id: Snowflake,
        request: RegisterDeviceRequest,
    ) -> ServiceResult<DeviceResponse> {
        let device = Device::new(request.device_id, user_id, request.public_key);
        self.ctx.device_repo().upsert(&device).await?;

        let stored = self
            .ctx
            .device_repo()
            .find(&device.device_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Device missing after upsert"))?;

        info!(user_id = %user_id, device_id = %stored.device_id, "Device registered");

        Ok(DeviceResponse::from(stored))
    }

    /// Public directory listing of a user's devices
    #[instrument(skip(self))]
    pub async fn list_user_devices(&self, user_id: Snowflake) -> ServiceResult<Vec<DeviceResponse>> {
        let devices = self.ctx.device_repo().find_by_user(user_id).await?;
        Ok(devices.into_iter().map(DeviceResponse::from).collect())
    }

    /// Delete one of the caller's devices with every key stored for it
    #[instrument(skip(self))]
    pub async fn remove_device(&self, user_id: Snowflake, device_id: &str) -> ServiceResult<()> {
        let owned = self
            .ctx
            .device_repo()
            .find(device_id)
            .await?
            .is_some_and(|device| device.is_owned_by(user_id));
        if !owned {
            return Err(DomainError::DeviceNotFound(device_id.to_string()).into());
        }

        let removed_keys = self.ctx.key_repo().delete_by_device(device_id).await?;
        self.ctx.device_repo().delete(user_id, device_id).await?;

        info!(user_id = %user_id, device_id = %device_id, removed_keys, "Device removed");

        Ok(())
    }
}
