//! Capabilities advertised to the host for the current source

use enumflags2::{bitflags, BitFlags};
use serde::{Deserialize, Serialize};

/// A single host-facing capability
#[bitflags]
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    TurnOn = 1 << 0,
    TurnOff = 1 << 1,
    VolumeSet = 1 << 2,
    VolumeMute = 1 << 3,
    SelectSource = 1 << 4,
    Play = 1 << 5,
    Pause = 1 << 6,
    Stop = 1 << 7,
    NextTrack = 1 << 8,
    PreviousTrack = 1 << 9,
    ShuffleSet = 1 << 10,
    PlayMedia = 1 << 11,
}

/// Set of [`Feature`]s
pub type Features = BitFlags<Feature>;

/// Sources without transport control or browsing
pub const PASSIVE_SOURCES: &[&str] = &["Optical", "Line 1", "Line 2", "Line 3", "Tuner"];

/// Sources whose content is a station rather than a track list
pub const CHANNEL_SOURCES: &[&str] = &["Net Radio", "Tuner"];

/// Features available while `source` is selected
pub fn features_for_source(source: Option<&str>) -> Features {
    match source {
        Some(name) if PASSIVE_SOURCES.contains(&name) => {
            Feature::TurnOn
                | Feature::TurnOff
                | Feature::SelectSource
                | Feature::ShuffleSet
                | Feature::VolumeSet
                | Feature::VolumeMute
        }
        _ => BitFlags::all(),
    }
}

/// Kind of content the current source plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaContentType {
    Channel,
    Playlist,
}

impl MediaContentType {
    pub fn for_source(source: Option<&str>) -> Self {
        match source {
            Some(name) if CHANNEL_SOURCES.contains(&name) => MediaContentType::Channel,
            _ => MediaContentType::Playlist,
        }
    }
}
