//! Power state enumeration

use serde::{Deserialize, Serialize};

/// Power state of the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerState {
    /// Receiver is on
    On,
    /// Receiver is in standby
    Standby,
    /// No status has been read yet
    #[default]
    Unknown,
}

impl PowerState {
    /// Build from the decoded `Power_Control/Power` flag
    pub fn from_power_flag(on: bool) -> Self {
        if on {
            PowerState::On
        } else {
            PowerState::Standby
        }
    }

    /// Whether the receiver is known to be in standby
    pub fn is_standby(&self) -> bool {
        matches!(self, PowerState::Standby)
    }
}
