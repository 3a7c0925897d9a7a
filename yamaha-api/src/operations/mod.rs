//! Receiver operations organized by the command section they address
//!
//! - [`system`]: power, mute, input selection and the basic status query
//! - [`main_zone`]: volume level
//! - [`playback`]: transport controls on the player
//! - [`play_info`]: now-playing query
//! - [`list`]: menu browsing (list info, cursor, direct select)

pub mod list;
pub mod main_zone;
pub mod play_info;
pub mod playback;
pub mod system;

/// Section that hosts playback and menu commands on this receiver family
pub const PLAYER_SECTION: &str = "Player";

// Re-export commonly used operations
pub use list::{CursorOperation, DirectSelectOperation, GetListInfoOperation};
pub use main_zone::SetVolumeOperation;
pub use play_info::GetPlayInfoOperation;
pub use playback::PlaybackOperation;
pub use system::{GetBasicStatusOperation, SelectInputOperation, SetMuteOperation, SetPowerOperation};
