//! Main zone volume control
//!
//! The receiver expresses volume as an integer on a `0..=50` scale; the API
//! exposes it as a float in `[0, 1]`.

use crate::command::Command;
use crate::{ApiError, YamahaOperation};

/// Number of device volume steps between silence and maximum
pub const VOLUME_SCALE: u8 = 50;

/// Convert a raw device level into a normalized volume, clamped to `[0, 1]`
pub fn raw_to_volume(raw: i32) -> f32 {
    (raw as f32 / VOLUME_SCALE as f32).clamp(0.0, 1.0)
}

/// Convert a normalized volume into the device level
///
/// Truncates towards zero like the device's own remote does. Values outside
/// `[0, 1]` (or NaN) are rejected.
pub fn volume_to_raw(volume: f32) -> Result<u8, ApiError> {
    if !(0.0..=1.0).contains(&volume) {
        return Err(ApiError::InvalidParameter(format!(
            "volume {} is out of range [0, 1]",
            volume
        )));
    }
    Ok((volume * VOLUME_SCALE as f32) as u8)
}

/// SetVolume operation
pub struct SetVolumeOperation;

/// Request for SetVolume, carrying the raw device level
#[derive(Debug, Clone, Copy)]
pub struct SetVolumeRequest {
    pub level: u8,
}

impl SetVolumeRequest {
    /// Build a request from a normalized volume
    pub fn from_volume(volume: f32) -> Result<Self, ApiError> {
        Ok(Self {
            level: volume_to_raw(volume)?,
        })
    }
}

impl YamahaOperation for SetVolumeOperation {
    type Request = SetVolumeRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "SetVolume";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<Main_Zone><Volume><Lvl><Val>{}</Val><Exp>0</Exp><Unit></Unit></Lvl></Volume></Main_Zone>",
            request.level
        )
    }
}
