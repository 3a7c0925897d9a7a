//! Playback operation for the player section

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::operations::PLAYER_SECTION;
use crate::YamahaOperation;

/// Playback verbs understood by `Play_Control/Playback`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Playback {
    Play,
    Pause,
    Stop,
    Next,
    #[serde(rename = "Prev")]
    Previous,
    /// Toggle shuffle; the device has no absolute shuffle setter
    Shuffle,
}

impl Playback {
    /// The verb sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Playback::Play => "Play",
            Playback::Pause => "Pause",
            Playback::Stop => "Stop",
            Playback::Next => "Next",
            Playback::Previous => "Prev",
            Playback::Shuffle => "Shuffle",
        }
    }
}

/// Playback operation
pub struct PlaybackOperation;

/// Request for the playback operation
#[derive(Debug, Clone, Copy)]
pub struct PlaybackRequest {
    pub action: Playback,
}

impl YamahaOperation for PlaybackOperation {
    type Request = PlaybackRequest;

    const COMMAND: Command = Command::Put;
    const NAME: &'static str = "Playback";

    fn build_body(request: &Self::Request) -> String {
        format!(
            "<{section}><Play_Control><Playback>{verb}</Playback></Play_Control></{section}>",
            section = PLAYER_SECTION,
            verb = request.action.as_str()
        )
    }
}
