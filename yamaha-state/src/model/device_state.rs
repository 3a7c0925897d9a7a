//! Normalized snapshot of the receiver

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use yamaha_api::{BasicStatus, NowPlaying, PlayInfo, RepeatMode};

use super::power_state::PowerState;
use super::source_mapping::{raw_source, SourceMapping};
use super::transport_state::{MediaState, TransportState};

/// In-memory device snapshot, mutated only by decoded responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub power: PowerState,
    /// Normalized volume in `[0, 1]`
    pub volume: f32,
    pub muted: bool,
    /// Configured source name; always a key of the source mapping
    pub source: Option<String>,
    /// Device token of `source` with spaces replaced by underscores
    pub raw_device_source: Option<String>,
    pub transport: TransportState,
    pub now_playing: NowPlaying,
    pub position: Option<Duration>,
    pub position_updated_at: Option<DateTime<Utc>>,
    pub shuffle: Option<bool>,
    pub repeat: Option<RepeatMode>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            power: PowerState::Unknown,
            volume: 0.0,
            muted: false,
            source: None,
            raw_device_source: None,
            transport: TransportState::Unknown,
            now_playing: NowPlaying::default(),
            position: None,
            position_updated_at: None,
            shuffle: None,
            repeat: None,
        }
    }
}

impl DeviceState {
    /// Apply a decoded `Basic_Status` response
    ///
    /// Fields absent from the response keep their previous value. An input
    /// token that is not in `sources` leaves the source fields unchanged.
    pub fn apply_basic_status(&mut self, status: &BasicStatus, sources: &SourceMapping) {
        if let Some(on) = status.power_on {
            self.power = PowerState::from_power_flag(on);
        }
        if let Some(volume) = status.volume {
            self.volume = volume;
        }
        if let Some(muted) = status.muted {
            self.muted = muted;
        }
        if let Some(token) = status.input.as_deref() {
            match sources.name_for(token) {
                Some(name) => {
                    self.source = Some(name.to_string());
                    self.raw_device_source = Some(raw_source(token));
                }
                None => warn!(token, "Input token is not a configured source"),
            }
        }
    }

    /// Replace now-playing data with a decoded `Play_Info` response
    pub fn apply_play_info(&mut self, info: &PlayInfo) {
        self.now_playing = info.now_playing.clone();
        self.transport = info
            .playback
            .map(TransportState::from)
            .unwrap_or(TransportState::Idle);
        if let Some(position) = info.position {
            self.position = Some(position.position);
            self.position_updated_at = Some(position.captured_at);
        }
        if info.shuffle.is_some() {
            self.shuffle = info.shuffle;
        }
        if info.repeat.is_some() {
            self.repeat = info.repeat;
        }
    }

    /// Drop now-playing metadata for sources that carry none
    pub fn clear_now_playing(&mut self) {
        self.now_playing = NowPlaying::default();
        self.transport = TransportState::Idle;
    }

    /// Host-facing state combining power and transport
    pub fn media_state(&self) -> MediaState {
        MediaState::from_parts(self.power, self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamaha_api::{PlayPosition, PlaybackStatus};

    fn status(input: &str) -> BasicStatus {
        BasicStatus {
            power_on: Some(true),
            volume: Some(0.5),
            muted: Some(false),
            input: Some(input.to_string()),
        }
    }

    #[test]
    fn test_apply_basic_status() {
        let mut state = DeviceState::default();
        state.apply_basic_status(&status("NET RADIO"), &SourceMapping::default());

        assert_eq!(state.power, PowerState::On);
        assert_eq!(state.volume, 0.5);
        assert_eq!(state.source.as_deref(), Some("Net Radio"));
        assert_eq!(state.raw_device_source.as_deref(), Some("NET_RADIO"));
    }

    #[test]
    fn test_unknown_token_keeps_source() {
        let mut state = DeviceState::default();
        let sources = SourceMapping::default();
        state.apply_basic_status(&status("Spotify"), &sources);
        state.apply_basic_status(&status("HDMI1"), &sources);

        assert_eq!(state.source.as_deref(), Some("Spotify"));
        assert_eq!(state.raw_device_source.as_deref(), Some("Spotify"));
    }

    #[test]
    fn test_apply_play_info_replaces_metadata() {
        let mut state = DeviceState::default();
        state.now_playing.album = Some("Old".to_string());

        let captured_at = Utc::now();
        let info = PlayInfo {
            playback: Some(PlaybackStatus::Paused),
            now_playing: NowPlaying {
                song: Some("Song".to_string()),
                ..NowPlaying::default()
            },
            position: Some(PlayPosition {
                position: Duration::from_secs(42),
                captured_at,
            }),
            shuffle: Some(true),
            repeat: None,
            skipped: Vec::new(),
        };
        state.apply_play_info(&info);

        assert_eq!(state.transport, TransportState::Paused);
        assert_eq!(state.now_playing.song.as_deref(), Some("Song"));
        assert!(state.now_playing.album.is_none());
        assert_eq!(state.position, Some(Duration::from_secs(42)));
        assert_eq!(state.position_updated_at, Some(captured_at));
        assert_eq!(state.shuffle, Some(true));
    }

    #[test]
    fn test_play_info_without_playback_is_idle() {
        let mut state = DeviceState::default();
        state.apply_play_info(&PlayInfo::default());
        assert_eq!(state.transport, TransportState::Idle);
    }

    #[test]
    fn test_clear_now_playing() {
        let mut state = DeviceState {
            transport: TransportState::Playing,
            ..DeviceState::default()
        };
        state.now_playing.artist = Some("Artist".to_string());
        state.clear_now_playing();

        assert!(state.now_playing.is_empty());
        assert_eq!(state.transport, TransportState::Idle);
    }
}
