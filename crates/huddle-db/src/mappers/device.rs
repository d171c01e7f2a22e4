//! Device entity <-> model mapper

use huddle_core::{Device, Snowflake};

use crate::models::DeviceModel;

impl From<DeviceModel> for Device {
    fn from(model: DeviceModel) -> Self {
        Device {
            device_id: model.device_id,
            user_id: Snowflake::new(model.user_id),
            public_key: model.public_key,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Device values for insertion
pub struct DeviceInsert<'a> {
    pub device_id: &'a str,
    pub user_id: i64,
    pub public_key: &'a str,
}

impl<'a> DeviceInsert<'a> {
    pub fn new(device: &'a Device) -> Self {
        Self {
            device_id: &device.device_id,
            user_id: device.user_id.into_inner(),
            public_key: &device.public_key,
        }
    }
}
