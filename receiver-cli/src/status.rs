//! Printable snapshot of a receiver

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use yamaha_sdk::{MediaContentType, MediaState, PowerState, Receiver, RepeatMode};

/// Everything `status` shows, captured once after a refresh
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub name: String,
    pub power: PowerState,
    pub state: MediaState,
    pub volume: f32,
    pub muted: bool,
    pub source: Option<String>,
    pub content_type: MediaContentType,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub position_secs: Option<u64>,
    pub position_updated_at: Option<DateTime<Utc>>,
    pub shuffle: Option<bool>,
    pub repeat: Option<RepeatMode>,
}

impl StatusReport {
    pub fn capture(receiver: &Receiver) -> Self {
        Self {
            name: receiver.name().to_string(),
            power: receiver.power(),
            state: receiver.media_state(),
            volume: receiver.volume(),
            muted: receiver.is_muted(),
            source: receiver.source(),
            content_type: receiver.media_content_type(),
            title: receiver.media_title(),
            artist: receiver.media_artist(),
            album: receiver.media_album(),
            position_secs: receiver.media_position().map(|p| p.as_secs()),
            position_updated_at: receiver.media_position_updated_at(),
            shuffle: receiver.shuffle(),
            repeat: receiver.repeat(),
        }
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Power:   {:?}", self.power)?;
        writeln!(f, "  State:   {:?}", self.state)?;
        writeln!(
            f,
            "  Volume:  {:.0}%{}",
            self.volume * 100.0,
            if self.muted { " (muted)" } else { "" }
        )?;
        writeln!(f, "  Source:  {}", or_dash(&self.source))?;
        writeln!(f, "  Title:   {}", or_dash(&self.title))?;
        writeln!(f, "  Artist:  {}", or_dash(&self.artist))?;
        writeln!(f, "  Album:   {}", or_dash(&self.album))?;
        if let Some(secs) = self.position_secs {
            writeln!(f, "  Time:    {}:{:02}", secs / 60, secs % 60)?;
        }
        if let Some(shuffle) = self.shuffle {
            writeln!(f, "  Shuffle: {}", if shuffle { "on" } else { "off" })?;
        }
        if let Some(repeat) = self.repeat {
            writeln!(f, "  Repeat:  {:?}", repeat)?;
        }
        Ok(())
    }
}
