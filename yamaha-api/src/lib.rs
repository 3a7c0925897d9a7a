//! High-level API for Yamaha network receiver control
//!
//! This crate provides a type-safe, trait-based API over the receiver's
//! XML-over-HTTP protocol. It uses the private `xml-client` crate for the
//! actual HTTP exchange.
//!
//! Requests are command paths wrapped in a `YAMAHA_AV` envelope whose `cmd`
//! attribute is `GET` or `PUT`:
//!
//! ```rust
//! use yamaha_api::command::{encode_envelope, Command};
//!
//! let document = encode_envelope(Command::Get, "<System><Basic_Status>GetParam</Basic_Status></System>");
//! assert!(document.contains(r#"<YAMAHA_AV cmd="GET">"#));
//! ```
//!
//! Each operation in [`operations`] implements [`YamahaOperation`] and, for
//! queries, [`QueryOperation`] to decode the response document.

pub mod client;
pub mod command;
pub mod error;
pub mod operation;
pub mod operations;
pub mod xml;

pub use client::YamahaClient;
pub use command::Command;
pub use error::{ApiError, Result};
pub use operation::{QueryOperation, YamahaOperation};
pub use operations::list::{Cursor, MenuEntry, MenuStatus};
pub use operations::play_info::{FieldDecodeError, NowPlaying, PlayInfo, PlayPosition, PlaybackStatus, RepeatMode};
pub use operations::playback::Playback;
pub use operations::system::BasicStatus;
pub use xml_client::{HttpResponse, Transport, TransportError, DEFAULT_TIMEOUT};
