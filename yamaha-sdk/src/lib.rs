//! # Yamaha SDK - synchronous control of Yamaha network receivers
//!
//! Provides a receiver-centric API over the XML control protocol:
//!
//! ```rust,no_run
//! use yamaha_sdk::{Receiver, ReceiverConfig};
//!
//! fn main() -> Result<(), yamaha_sdk::SdkError> {
//!     let receiver = Receiver::new(ReceiverConfig::new("192.168.1.20"))?;
//!
//!     receiver.refresh();                           // Poll status and now-playing data
//!     println!("power: {:?}", receiver.power());    // Read the cached snapshot
//!     receiver.set_volume(0.3)?;                    // Send an intent
//!     receiver.play_media("NET RADIO", "Bookmarks>Jazz>KCSM")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! yamaha-sdk (Receiver, navigator, config)
//!     ↓
//! yamaha-state (DeviceState, SourceMapping)
//!     ↓
//! yamaha-api (operations, envelope codec)
//!     ↓
//! xml-client (HTTP transport)
//! ```
//!
//! Logging goes through `tracing`; hosts can install a subscriber with
//! [`logging::init_logging`].

pub mod config;
pub mod features;
pub mod navigator;

mod error;
mod receiver;

pub use config::{NavigationConfig, ReceiverConfig, TitlePolicy};
pub use error::{ConfigError, SdkError};
pub use features::{Feature, Features, MediaContentType};
pub use navigator::{CancelToken, NavigationOutcome, NavigationPath, NavigationState};
pub use receiver::{Receiver, NET_RADIO_MEDIA_TYPE};

// Re-export commonly used types from the lower layers
pub use yamaha_api::{Cursor, NowPlaying, Playback, RepeatMode, Transport};
pub use yamaha_state::{logging, DeviceState, MediaState, PowerState, SourceMapping, TransportState};
