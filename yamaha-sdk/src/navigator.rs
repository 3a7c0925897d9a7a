//! Menu navigation: walk the receiver's browse tree to a leaf by name
//!
//! The receiver only offers cursor and direct-select commands, and its menu
//! settles asynchronously after each selection. The navigator therefore
//! polls `List_Info`, matches the segment for the layer it expects, selects
//! the matching line and moves one layer down. Every poll consumes one
//! attempt from a budget shared by the whole path; polls that did not
//! advance are followed by a cancellable delay.
//!
//! ```text
//! Traversing(1) ──poll──► Matched ──select──► Traversing(2) … ──► Done
//!      │  ▲
//!      ▼  │ delay
//! WaitingForReady ──budget spent──► Exhausted
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};
use yamaha_api::operations::list::{CursorRequest, DirectSelectRequest, GetListInfoRequest};
use yamaha_api::operations::system::SelectInputRequest;
use yamaha_api::operations::{CursorOperation, DirectSelectOperation, GetListInfoOperation, SelectInputOperation};
use yamaha_api::{Cursor, MenuEntry, MenuStatus, YamahaClient};

use crate::config::NavigationConfig;
use crate::SdkError;

/// Preferred segment delimiter
pub const PATH_DELIMITER: char = '>';

/// Delimiter accepted when the path contains no [`PATH_DELIMITER`]
pub const ALT_PATH_DELIMITER: char = '/';

/// Ordered, non-empty menu segments, e.g. `Bookmarks > Jazz > KCSM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPath {
    segments: Vec<String>,
}

impl NavigationPath {
    /// Parse a delimited path
    ///
    /// Segments are split on `>`, or on `/` when no `>` is present, and
    /// trimmed. An empty path or an empty segment is rejected.
    pub fn parse(input: &str) -> Result<Self, SdkError> {
        if input.trim().is_empty() {
            return Err(SdkError::InvalidPath("path is empty".to_string()));
        }

        let delimiter = if input.contains(PATH_DELIMITER) {
            PATH_DELIMITER
        } else {
            ALT_PATH_DELIMITER
        };

        let segments: Vec<String> = input.split(delimiter).map(|s| s.trim().to_string()).collect();
        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(SdkError::InvalidPath(format!(
                "segment {} of {:?} is empty",
                position + 1,
                input
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of layers to descend
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment to match at a 1-based menu layer
    pub fn segment(&self, layer: usize) -> Option<&str> {
        layer
            .checked_sub(1)
            .and_then(|i| self.segments.get(i))
            .map(String::as_str)
    }
}

impl FromStr for NavigationPath {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" > "))
    }
}

/// States of a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    /// Polling the menu for the given 1-based layer
    Traversing { layer: usize },
    /// The last poll did not advance; delay before polling `layer` again
    WaitingForReady { layer: usize },
    /// `entry` matched the segment for `layer` and is about to be selected
    Matched { layer: usize, entry: MenuEntry },
    /// The attempt budget ran out while looking at `layer`
    Exhausted { layer: usize },
    Done,
    Cancelled,
}

/// Result of a successful traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Menu polls used
    pub attempts: u32,
    /// Selected entries, one per layer in order
    pub selections: Vec<MenuEntry>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: Mutex<bool>,
    condvar: Condvar,
}

/// Cooperative cancellation for a navigation
///
/// Clones share the same flag. Cancelling also wakes a navigator that is
/// waiting out its retry delay.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut cancelled = self.inner.cancelled.lock();
        *cancelled = true;
        self.inner.condvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Block for up to `timeout`, returning `true` if cancelled meanwhile
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.inner.cancelled.lock();
        while !*cancelled {
            if self.inner.condvar.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

/// Drives one traversal against a receiver
pub struct Navigator<'a> {
    client: &'a YamahaClient,
    config: &'a NavigationConfig,
    source_token: &'a str,
    cancel: &'a CancelToken,
}

impl<'a> Navigator<'a> {
    /// `source_token` is the device token of the browse source
    pub fn new(
        client: &'a YamahaClient,
        config: &'a NavigationConfig,
        source_token: &'a str,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            client,
            config,
            source_token,
            cancel,
        }
    }

    /// Select the browse source, go to the menu root and descend `path`
    pub fn run(&self, path: &NavigationPath) -> Result<NavigationOutcome, SdkError> {
        info!(path = %path, "Starting menu navigation");

        self.client.send::<SelectInputOperation>(&SelectInputRequest {
            token: self.source_token.to_string(),
        })?;
        self.client.send::<CursorOperation>(&CursorRequest {
            cursor: Cursor::ReturnToHome,
        })?;

        let mut state = NavigationState::Traversing { layer: 1 };
        let mut attempts: u32 = 0;
        let mut selections: Vec<MenuEntry> = Vec::with_capacity(path.len());

        loop {
            if self.cancel.is_cancelled() {
                state = NavigationState::Cancelled;
            }

            state = match state {
                NavigationState::Traversing { layer } if attempts >= self.config.max_attempts => {
                    NavigationState::Exhausted { layer }
                }
                NavigationState::Traversing { layer } => {
                    attempts += 1;
                    self.step(path, layer)?
                }
                NavigationState::WaitingForReady { layer } => {
                    if attempts >= self.config.max_attempts {
                        NavigationState::Exhausted { layer }
                    } else if self.cancel.wait(self.config.retry_delay) {
                        NavigationState::Cancelled
                    } else {
                        NavigationState::Traversing { layer }
                    }
                }
                NavigationState::Matched { layer, entry } => {
                    let line = entry.line()?;
                    debug!(layer, line, text = %entry.text, "Selecting menu line");
                    self.client
                        .send::<DirectSelectOperation>(&DirectSelectRequest { line })?;
                    selections.push(entry);

                    if layer == path.len() {
                        NavigationState::Done
                    } else {
                        NavigationState::Traversing { layer: layer + 1 }
                    }
                }
                NavigationState::Exhausted { layer } => {
                    let segment = path.segment(layer).unwrap_or_default().to_string();
                    warn!(%segment, layer, attempts, "Menu navigation exhausted");
                    return Err(SdkError::NavigationExhausted {
                        segment,
                        layer,
                        attempts,
                    });
                }
                NavigationState::Done => {
                    info!(attempts, "Menu navigation finished");
                    return Ok(NavigationOutcome { attempts, selections });
                }
                NavigationState::Cancelled => {
                    info!(attempts, "Menu navigation cancelled");
                    return Err(SdkError::Cancelled);
                }
            };
        }
    }

    // One poll of the menu for `layer`
    fn step(&self, path: &NavigationPath, layer: usize) -> Result<NavigationState, SdkError> {
        let segment = path
            .segment(layer)
            .ok_or_else(|| SdkError::InvalidPath(format!("no segment for layer {}", layer)))?;

        let menu = match self.poll() {
            Some(menu) => menu,
            None => return Ok(NavigationState::WaitingForReady { layer }),
        };

        if !menu.ready || menu.layer as usize != layer {
            debug!(
                ready = menu.ready,
                reported_layer = menu.layer,
                expected_layer = layer,
                "Menu not settled"
            );
            return Ok(NavigationState::WaitingForReady { layer });
        }

        match menu.find(segment) {
            Some(entry) => Ok(NavigationState::Matched {
                layer,
                entry: entry.clone(),
            }),
            None => {
                debug!(segment, layer, menu = %menu.name, "Segment not listed");
                Ok(NavigationState::WaitingForReady { layer })
            }
        }
    }

    fn poll(&self) -> Option<MenuStatus> {
        match self.client.execute::<GetListInfoOperation>(&GetListInfoRequest) {
            Ok(menu) => Some(menu),
            Err(e) => {
                warn!(error = %e, "Menu poll failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    #[rstest]
    #[case("Bookmarks>Jazz>KCSM", vec!["Bookmarks", "Jazz", "KCSM"])]
    #[case(" Bookmarks > Jazz ", vec!["Bookmarks", "Jazz"])]
    #[case("Bookmarks/Rock", vec!["Bookmarks", "Rock"])]
    #[case("Stations>AC/DC Radio", vec!["Stations", "AC/DC Radio"])]
    #[case("Single", vec!["Single"])]
    fn test_path_parsing(#[case] input: &str, #[case] expected: Vec<&str>) {
        let path = NavigationPath::parse(input).unwrap();
        assert_eq!(path.segments(), expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("Bookmarks>>Jazz")]
    #[case("Bookmarks>")]
    #[case("/Bookmarks")]
    fn test_invalid_paths(#[case] input: &str) {
        assert!(matches!(NavigationPath::parse(input), Err(SdkError::InvalidPath(_))));
    }

    #[test]
    fn test_segment_by_layer() {
        let path: NavigationPath = "A>B".parse().unwrap();
        assert_eq!(path.segment(0), None);
        assert_eq!(path.segment(1), Some("A"));
        assert_eq!(path.segment(2), Some("B"));
        assert_eq!(path.segment(3), None);
        assert_eq!(path.to_string(), "A > B");
    }

    #[test]
    fn test_cancel_token_wait_times_out() {
        let token = CancelToken::new();
        assert!(!token.wait(Duration::from_millis(10)));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_interrupts_wait() {
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });

        let started = Instant::now();
        assert!(token.wait(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }
}
