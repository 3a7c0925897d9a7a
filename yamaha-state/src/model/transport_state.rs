//! Transport and host-facing media state

use serde::{Deserialize, Serialize};
use yamaha_api::PlaybackStatus;

use crate::model::PowerState;

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransportState {
    /// Nothing is loaded, or the source does not report playback
    Idle,
    Playing,
    Paused,
    Stopped,
    /// No play info has been read yet
    #[default]
    Unknown,
}

impl From<PlaybackStatus> for TransportState {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Playing => TransportState::Playing,
            PlaybackStatus::Paused => TransportState::Paused,
            PlaybackStatus::Stopped => TransportState::Stopped,
        }
    }
}

/// Combined state shown to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaState {
    Off,
    Idle,
    Playing,
    Paused,
    Unknown,
}

impl MediaState {
    /// Combine power and transport into one host-facing state
    pub fn from_parts(power: PowerState, transport: TransportState) -> Self {
        match power {
            PowerState::Standby => MediaState::Off,
            PowerState::Unknown => MediaState::Unknown,
            PowerState::On => match transport {
                TransportState::Playing => MediaState::Playing,
                TransportState::Paused => MediaState::Paused,
                _ => MediaState::Idle,
            },
        }
    }
}
