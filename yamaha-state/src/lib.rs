//! Receiver state model
//!
//! Holds the normalized [`DeviceState`] snapshot, the [`SourceMapping`]
//! between human-facing source names and device tokens, and the
//! [`StateStore`] through which the SDK writes decoded responses.
//!
//! ```rust
//! use yamaha_state::{SourceMapping, StateStore, PowerState};
//!
//! let sources = SourceMapping::default();
//! assert_eq!(sources.token_for("Net Radio"), Some("NET RADIO"));
//!
//! let store = StateStore::new();
//! assert_eq!(store.read(|state| state.power), PowerState::Unknown);
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use error::{Result, StateError};
pub use logging::{init_logging, init_logging_from_env, init_logging_with_filter, LoggingError, LoggingMode};
pub use model::{raw_source, DeviceState, MediaState, PowerState, SourceEntry, SourceMapping, TransportState};
pub use store::StateStore;
