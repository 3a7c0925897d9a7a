//! Device state model

pub mod device_state;
pub mod power_state;
pub mod source_mapping;
pub mod transport_state;

pub use device_state::DeviceState;
pub use power_state::PowerState;
pub use source_mapping::{raw_source, SourceEntry, SourceMapping};
pub use transport_state::{MediaState, TransportState};
