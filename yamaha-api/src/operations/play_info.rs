//! Play_Info query: transport state, now-playing metadata and tuner data
//!
//! Each child of `Play_Info` is decoded independently. A child that fails to
//! decode is recorded as a [`FieldDecodeError`] and its siblings are still
//! decoded, so one odd metadata field never hides the rest of the response.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use xmltree::Element;

use crate::command::Command;
use crate::operations::PLAYER_SECTION;
use crate::{xml, ApiError, QueryOperation, YamahaOperation};

/// Maps `Meta_Info` children onto now-playing fields
const META_FIELDS: &[(&str, MetaField)] = &[
    ("Artist", MetaField::Artist),
    ("Station", MetaField::Song),
    ("Radio_Text_A", MetaField::Song),
    ("Album", MetaField::Album),
    ("Song", MetaField::Song),
    ("Track", MetaField::Song),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaField {
    Artist,
    Song,
    Album,
}

/// A single `Play_Info` child that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {field}: {reason}")]
pub struct FieldDecodeError {
    /// Tag name of the offending child
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl FieldDecodeError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Playback classification reported by `Playback_Info` or `Signal_Info/Tuned`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackStatus {
    /// Classify the device's playback text
    ///
    /// `Play` and `Assert` (a tuned signal) count as playing, `Pause` as
    /// paused, anything else as stopped.
    pub fn classify(text: &str) -> Self {
        match text {
            "Play" | "Assert" => PlaybackStatus::Playing,
            "Pause" => PlaybackStatus::Paused,
            _ => PlaybackStatus::Stopped,
        }
    }
}

/// Repeat mode reported under `Play_Mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    Off,
    One,
    All,
}

impl RepeatMode {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "Off" => Some(RepeatMode::Off),
            "One" => Some(RepeatMode::One),
            "All" | "On" => Some(RepeatMode::All),
            _ => None,
        }
    }
}

/// Now-playing metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub artist: Option<String>,
    pub song: Option<String>,
    pub album: Option<String>,
    /// Formatted tuner frequency, e.g. `FM 98.5 MHz`
    pub frequency: Option<String>,
}

impl NowPlaying {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.song.is_none() && self.album.is_none() && self.frequency.is_none()
    }
}

/// Play position together with the moment it was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayPosition {
    pub position: Duration,
    pub captured_at: DateTime<Utc>,
}

/// Decoded `Play_Info` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayInfo {
    pub playback: Option<PlaybackStatus>,
    pub now_playing: NowPlaying,
    pub position: Option<PlayPosition>,
    pub shuffle: Option<bool>,
    pub repeat: Option<RepeatMode>,
    /// Children that were skipped because they failed to decode
    #[serde(skip)]
    pub skipped: Vec<FieldDecodeError>,
}

/// GetPlayInfo operation
pub struct GetPlayInfoOperation;

/// Request for the Play_Info query (no parameters)
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPlayInfoRequest;

impl YamahaOperation for GetPlayInfoOperation {
    type Request = GetPlayInfoRequest;

    const COMMAND: Command = Command::Get;
    const NAME: &'static str = "GetPlayInfo";

    fn build_body(_request: &Self::Request) -> String {
        format!(
            "<{section}><Play_Info>GetParam</Play_Info></{section}>",
            section = PLAYER_SECTION
        )
    }
}

impl QueryOperation for GetPlayInfoOperation {
    type Response = PlayInfo;

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let play_info = xml::path(xml, &[PLAYER_SECTION, "Play_Info"])?;
        Ok(decode_play_info(play_info, Utc::now()))
    }
}

/// Decode the children of a `Play_Info` element
///
/// `now` is stamped on the play position.
pub fn decode_play_info(play_info: &Element, now: DateTime<Utc>) -> PlayInfo {
    let mut info = PlayInfo::default();

    for node in xml::elements(play_info) {
        if let Err(e) = decode_field(node, now, &mut info) {
            warn!(field = %e.field, reason = %e.reason, "Skipping Play_Info field");
            info.skipped.push(e);
        }
    }

    info
}

fn decode_field(node: &Element, now: DateTime<Utc>, info: &mut PlayInfo) -> Result<(), FieldDecodeError> {
    match node.name.as_str() {
        "Play_Mode" => decode_play_mode(node, info),
        "Play_Time" => {
            let text = xml::text(node).ok_or_else(|| FieldDecodeError::new("Play_Time", "empty"))?;
            let seconds = text
                .parse::<u64>()
                .map_err(|_| FieldDecodeError::new("Play_Time", format!("not a number: {:?}", text)))?;
            info.position = Some(PlayPosition {
                position: Duration::from_secs(seconds),
                captured_at: now,
            });
            Ok(())
        }
        "Meta_Info" => {
            for meta in xml::elements(node) {
                let field = META_FIELDS
                    .iter()
                    .find(|(tag, _)| *tag == meta.name)
                    .map(|(_, field)| *field);
                // Tags without text are simply absent from the metadata
                if let (Some(field), Some(text)) = (field, xml::text(meta)) {
                    let value = Some(text.replace("&amp;", "&"));
                    match field {
                        MetaField::Artist => info.now_playing.artist = value,
                        MetaField::Song => info.now_playing.song = value,
                        MetaField::Album => info.now_playing.album = value,
                    }
                }
            }
            Ok(())
        }
        "Playback_Info" => {
            let text = xml::text(node).unwrap_or_default();
            info.playback = Some(PlaybackStatus::classify(&text));
            Ok(())
        }
        "Signal_Info" => {
            let tuned = node
                .get_child("Tuned")
                .ok_or_else(|| FieldDecodeError::new("Signal_Info", "missing Tuned"))?;
            info.playback = Some(PlaybackStatus::classify(&xml::text(tuned).unwrap_or_default()));
            Ok(())
        }
        "Tuning" => {
            info.now_playing.frequency = Some(decode_tuning(node)?);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn decode_play_mode(node: &Element, info: &mut PlayInfo) -> Result<(), FieldDecodeError> {
    let shuffle = xml::child_text(node, "Shuffle");
    let repeat = xml::child_text(node, "Repeat");

    if shuffle.is_none() && repeat.is_none() {
        // Flat form: a single On/Off value covering both
        let on = xml::text(node).as_deref() == Some("On");
        info.shuffle = Some(on);
        info.repeat = Some(if on { RepeatMode::All } else { RepeatMode::Off });
        return Ok(());
    }

    if let Some(shuffle) = shuffle {
        info.shuffle = Some(shuffle == "On");
    }
    if let Some(repeat) = repeat {
        info.repeat = Some(
            RepeatMode::parse(&repeat)
                .ok_or_else(|| FieldDecodeError::new("Play_Mode", format!("unknown repeat mode {:?}", repeat)))?,
        );
    }
    Ok(())
}

fn decode_tuning(node: &Element) -> Result<String, FieldDecodeError> {
    let missing = |what: &str| FieldDecodeError::new("Tuning", format!("missing {}", what));

    let band = xml::child_text(node, "Band").ok_or_else(|| missing("Band"))?;
    let current = node
        .get_child("Freq")
        .and_then(|freq| freq.get_child("Current"))
        .ok_or_else(|| missing("Freq/Current"))?;
    let raw = xml::child_text(current, "Val").ok_or_else(|| missing("Val"))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| FieldDecodeError::new("Tuning", format!("invalid frequency {:?}", raw)))?
        / 100.0;
    let unit = xml::child_text(current, "Unit").ok_or_else(|| missing("Unit"))?;

    // Whole frequencies keep one decimal place ("FM 100.0 MHz")
    let value = if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    };
    Ok(format!("{} {} {}", band, value, unit))
}
