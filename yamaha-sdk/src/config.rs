//! Receiver configuration
//!
//! Everything is optional in TOML except the host:
//!
//! ```toml
//! name = "Living Room Receiver"
//! host = "192.168.1.20"
//! request_timeout = 5
//! now_playing_sources = ["Spotify", "NET_RADIO", "SERVER", "TUNER", "CD"]
//!
//! [title_policy]
//! mode = "rotate"
//! song_seconds = 20
//!
//! [navigation]
//! max_attempts = 20
//! retry_delay = 1.0
//! source_name = "Net Radio"
//!
//! [[sources]]
//! name = "Net Radio"
//! token = "NET RADIO"
//! ```
//!
//! Durations are given in seconds.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use yamaha_api::{NowPlaying, DEFAULT_TIMEOUT};
use yamaha_state::SourceMapping;

use crate::error::ConfigError;

/// Raw device sources whose now-playing metadata is polled
pub const DEFAULT_NOW_PLAYING_SOURCES: &[&str] = &["Spotify", "NET_RADIO", "SERVER", "TUNER", "CD"];

/// Default attempt budget shared across all menu layers
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Default wait between menu polls
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default source selected before browsing
pub const DEFAULT_BROWSE_SOURCE: &str = "Net Radio";

/// How the media title is chosen between song and tuner frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TitlePolicy {
    /// Song, falling back to the frequency
    Song,
    /// Frequency, falling back to the song
    Frequency,
    /// Song during the first `song_seconds` of each minute, frequency otherwise
    Rotate { song_seconds: u32 },
}

impl Default for TitlePolicy {
    fn default() -> Self {
        TitlePolicy::Rotate { song_seconds: 20 }
    }
}

impl TitlePolicy {
    /// Pick the title to show at `now`
    pub fn title(&self, now_playing: &NowPlaying, now: DateTime<Utc>) -> Option<String> {
        let song = now_playing.song.as_ref();
        let frequency = now_playing.frequency.as_ref();

        let preferred = match self {
            TitlePolicy::Song => song.or(frequency),
            TitlePolicy::Frequency => frequency.or(song),
            TitlePolicy::Rotate { song_seconds } => {
                if now.second() < *song_seconds {
                    song.or(frequency)
                } else {
                    frequency.or(song)
                }
            }
        };
        preferred.cloned()
    }
}

/// Menu navigation limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Menu polls allowed for a whole path
    pub max_attempts: u32,
    /// Wait after a poll that did not advance
    #[serde(with = "duration_secs")]
    pub retry_delay: Duration,
    /// Configured source name selected before browsing
    pub source_name: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            source_name: DEFAULT_BROWSE_SOURCE.to_string(),
        }
    }
}

/// Configuration of one receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Display name
    pub name: String,
    /// Host name or IP, optionally with an `http://` scheme and port
    pub host: String,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    pub sources: SourceMapping,
    /// Raw device sources (spaces as underscores) that report now-playing data
    pub now_playing_sources: Vec<String>,
    pub title_policy: TitlePolicy,
    pub navigation: NavigationConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            name: "Yamaha Receiver".to_string(),
            host: String::new(),
            request_timeout: DEFAULT_TIMEOUT,
            sources: SourceMapping::default(),
            now_playing_sources: DEFAULT_NOW_PLAYING_SOURCES.iter().map(|s| s.to_string()).collect(),
            title_policy: TitlePolicy::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl ReceiverConfig {
    /// Default configuration for `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_sources(mut self, sources: SourceMapping) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_now_playing_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.now_playing_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = navigation;
        self
    }

    /// Parse a TOML document without validating it
    ///
    /// Useful when a caller fills in missing values (such as the host)
    /// before calling [`validate`](Self::validate).
    pub fn parse_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_toml(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Check the values a receiver cannot work without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid("request_timeout must be positive".to_string()));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("at least one source must be configured".to_string()));
        }
        if self.navigation.max_attempts == 0 {
            return Err(ConfigError::Invalid("navigation.max_attempts must be at least 1".to_string()));
        }
        if self.sources.token_for(&self.navigation.source_name).is_none() {
            return Err(ConfigError::Invalid(format!(
                "navigation.source_name {:?} is not a configured source",
                self.navigation.source_name
            )));
        }
        if let TitlePolicy::Rotate { song_seconds } = self.title_policy {
            if song_seconds > 60 {
                return Err(ConfigError::Invalid(format!(
                    "title_policy.song_seconds must be at most 60, got {}",
                    song_seconds
                )));
            }
        }
        Ok(())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(D::Error::custom(format!("invalid duration: {} seconds", secs)));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
