//! Receiver - main entry point for the SDK
//!
//! Wraps one device: a [`YamahaClient`] for the wire, a [`StateStore`] for
//! the last decoded snapshot, and the configuration that maps sources and
//! bounds navigation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use yamaha_api::operations::list::CursorRequest;
use yamaha_api::operations::main_zone::SetVolumeRequest;
use yamaha_api::operations::play_info::GetPlayInfoRequest;
use yamaha_api::operations::playback::PlaybackRequest;
use yamaha_api::operations::system::{GetBasicStatusRequest, SelectInputRequest, SetMuteRequest, SetPowerRequest};
use yamaha_api::operations::{
    CursorOperation, GetBasicStatusOperation, GetPlayInfoOperation, PlaybackOperation, SelectInputOperation,
    SetMuteOperation, SetPowerOperation, SetVolumeOperation,
};
use yamaha_api::{Cursor, Playback, RepeatMode, Transport, YamahaClient};
use yamaha_state::{DeviceState, MediaState, PowerState, StateStore};

use crate::config::ReceiverConfig;
use crate::features::{features_for_source, Features, MediaContentType};
use crate::navigator::{CancelToken, NavigationOutcome, NavigationPath, Navigator};
use crate::SdkError;

/// Media type that triggers menu navigation in [`Receiver::play_media`]
pub const NET_RADIO_MEDIA_TYPE: &str = "NET RADIO";

/// Handle to one receiver
///
/// All methods block on the network. Reads return the state captured by the
/// last [`refresh`](Receiver::refresh) and never touch the device.
///
/// # Example
///
/// ```rust,no_run
/// use yamaha_sdk::{Receiver, ReceiverConfig};
///
/// fn main() -> Result<(), yamaha_sdk::SdkError> {
///     let receiver = Receiver::new(ReceiverConfig::new("192.168.1.20"))?;
///
///     receiver.turn_on()?;
///     receiver.set_volume(0.4)?;
///     receiver.select_source("Net Radio")?;
///     receiver.play_path("Bookmarks>Jazz>KCSM")?;
///
///     receiver.refresh();
///     println!("{:?}: {:?}", receiver.media_state(), receiver.media_title());
///     Ok(())
/// }
/// ```
pub struct Receiver {
    config: ReceiverConfig,
    client: YamahaClient,
    state: StateStore,
    // Held by refresh and by read-modify-write intents such as set_shuffle
    refresh_lock: Mutex<()>,
    navigation_lock: Mutex<()>,
    active_navigation: Mutex<Option<CancelToken>>,
}

impl Receiver {
    /// Create a receiver talking HTTP to `config.host`
    pub fn new(config: ReceiverConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let client = YamahaClient::with_timeout(&config.host, config.request_timeout);
        Ok(Self::from_parts(config, client))
    }

    /// Create a receiver with a custom transport (for tests and advanced use cases)
    pub fn with_transport(config: ReceiverConfig, transport: Arc<dyn Transport>) -> Result<Self, SdkError> {
        config.validate()?;
        let client = YamahaClient::with_transport(&config.host, transport);
        Ok(Self::from_parts(config, client))
    }

    fn from_parts(config: ReceiverConfig, client: YamahaClient) -> Self {
        debug!(name = %config.name, url = client.url(), "Created receiver");
        Self {
            config,
            client,
            state: StateStore::new(),
            refresh_lock: Mutex::new(()),
            navigation_lock: Mutex::new(()),
            active_navigation: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    // ========================================================================
    // Poll cycle
    // ========================================================================

    /// Re-read status and, when applicable, now-playing data
    ///
    /// Network and decode failures are logged and leave the previous state
    /// in place. Concurrent calls run one after another.
    pub fn refresh(&self) {
        let _guard = self.refresh_lock.lock();

        let status = match self.client.execute::<GetBasicStatusOperation>(&GetBasicStatusRequest) {
            Ok(status) => status,
            Err(e) => {
                warn!(receiver = %self.config.name, error = %e, "Failed to read basic status");
                return;
            }
        };

        let (power, raw_source) = self.state.update(|state| {
            state.apply_basic_status(&status, &self.config.sources);
            (state.power, state.raw_device_source.clone())
        });

        if power.is_standby() {
            return;
        }

        let polls_now_playing = raw_source
            .as_deref()
            .is_some_and(|raw| self.config.now_playing_sources.iter().any(|s| s == raw));

        if !polls_now_playing {
            debug!(source = ?raw_source, "Source reports no now-playing data");
            self.state.update(DeviceState::clear_now_playing);
            return;
        }

        match self.client.execute::<GetPlayInfoOperation>(&GetPlayInfoRequest) {
            Ok(info) => self.state.update(|state| state.apply_play_info(&info)),
            Err(e) => warn!(receiver = %self.config.name, error = %e, "Failed to read play info"),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Copy of the whole device state
    pub fn state(&self) -> DeviceState {
        self.state.snapshot()
    }

    pub fn media_state(&self) -> MediaState {
        self.state.read(DeviceState::media_state)
    }

    pub fn power(&self) -> PowerState {
        self.state.read(|s| s.power)
    }

    /// Volume in `[0, 1]`
    pub fn volume(&self) -> f32 {
        self.state.read(|s| s.volume)
    }

    pub fn is_muted(&self) -> bool {
        self.state.read(|s| s.muted)
    }

    /// Current configured source name
    pub fn source(&self) -> Option<String> {
        self.state.read(|s| s.source.clone())
    }

    /// Configured source names in configuration order
    pub fn source_list(&self) -> Vec<String> {
        self.config.sources.names().map(str::to_string).collect()
    }

    pub fn supported_features(&self) -> Features {
        self.state.read(|s| features_for_source(s.source.as_deref()))
    }

    pub fn media_content_type(&self) -> MediaContentType {
        self.state.read(|s| MediaContentType::for_source(s.source.as_deref()))
    }

    pub fn media_position(&self) -> Option<Duration> {
        self.state.read(|s| s.position)
    }

    pub fn media_position_updated_at(&self) -> Option<DateTime<Utc>> {
        self.state.read(|s| s.position_updated_at)
    }

    /// Title chosen by the configured [`TitlePolicy`](crate::TitlePolicy)
    pub fn media_title(&self) -> Option<String> {
        self.media_title_at(Utc::now())
    }

    pub fn media_title_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.state
            .read(|s| self.config.title_policy.title(&s.now_playing, now))
    }

    pub fn media_artist(&self) -> Option<String> {
        self.state.read(|s| s.now_playing.artist.clone())
    }

    pub fn media_album(&self) -> Option<String> {
        self.state.read(|s| s.now_playing.album.clone())
    }

    pub fn shuffle(&self) -> Option<bool> {
        self.state.read(|s| s.shuffle)
    }

    pub fn repeat(&self) -> Option<RepeatMode> {
        self.state.read(|s| s.repeat)
    }

    // ========================================================================
    // Intents
    // ========================================================================

    pub fn turn_on(&self) -> Result<(), SdkError> {
        self.set_power(true)
    }

    pub fn turn_off(&self) -> Result<(), SdkError> {
        self.set_power(false)
    }

    fn set_power(&self, on: bool) -> Result<(), SdkError> {
        self.client.send::<SetPowerOperation>(&SetPowerRequest { on })?;
        Ok(())
    }

    /// Set the volume; `volume` must be within `[0, 1]`
    pub fn set_volume(&self, volume: f32) -> Result<(), SdkError> {
        let request = SetVolumeRequest::from_volume(volume)?;
        self.client.send::<SetVolumeOperation>(&request)?;
        Ok(())
    }

    /// Mute or unmute; the local flag is updated once the request went out
    pub fn mute_volume(&self, muted: bool) -> Result<(), SdkError> {
        self.client.send::<SetMuteOperation>(&SetMuteRequest { muted })?;
        self.state.update(|s| s.muted = muted);
        Ok(())
    }

    /// Select a configured source by name
    ///
    /// Unknown names fail without contacting the device.
    pub fn select_source(&self, name: &str) -> Result<(), SdkError> {
        let token = self.source_token(name)?;
        self.client.send::<SelectInputOperation>(&SelectInputRequest { token })?;
        Ok(())
    }

    pub fn media_play(&self) -> Result<(), SdkError> {
        self.playback(Playback::Play)
    }

    pub fn media_pause(&self) -> Result<(), SdkError> {
        self.playback(Playback::Pause)
    }

    pub fn media_stop(&self) -> Result<(), SdkError> {
        self.playback(Playback::Stop)
    }

    pub fn media_next_track(&self) -> Result<(), SdkError> {
        self.playback(Playback::Next)
    }

    pub fn media_previous_track(&self) -> Result<(), SdkError> {
        self.playback(Playback::Previous)
    }

    /// Toggle shuffle on the device
    pub fn toggle_shuffle(&self) -> Result<(), SdkError> {
        self.playback(Playback::Shuffle)
    }

    /// Bring shuffle to `shuffle`
    ///
    /// The device only toggles, so nothing is sent when the last refresh
    /// already reported the requested value. Runs exclusively with
    /// [`Receiver::refresh`] and other `set_shuffle` calls.
    pub fn set_shuffle(&self, shuffle: bool) -> Result<(), SdkError> {
        let _guard = self.refresh_lock.lock();
        if self.state.read(|s| s.shuffle) == Some(shuffle) {
            debug!(shuffle, "Shuffle already in requested state");
            return Ok(());
        }
        self.toggle_shuffle()?;
        self.state.update(|s| s.shuffle = Some(shuffle));
        Ok(())
    }

    fn playback(&self, action: Playback) -> Result<(), SdkError> {
        self.client.send::<PlaybackOperation>(&PlaybackRequest { action })?;
        Ok(())
    }

    /// Move the menu cursor
    pub fn cursor(&self, cursor: Cursor) -> Result<(), SdkError> {
        self.client.send::<CursorOperation>(&CursorRequest { cursor })?;
        Ok(())
    }

    // ========================================================================
    // Menu navigation
    // ========================================================================

    /// Play media by type; `NET RADIO` browses to `media_id` as a menu path
    pub fn play_media(&self, media_type: &str, media_id: &str) -> Result<NavigationOutcome, SdkError> {
        if media_type != NET_RADIO_MEDIA_TYPE {
            return Err(SdkError::UnsupportedMediaType(media_type.to_string()));
        }
        self.play_path(media_id)
    }

    /// Browse the configured source's menu to `path`, e.g. `Bookmarks>Jazz>KCSM`
    ///
    /// Use [`cancel_navigation`](Receiver::cancel_navigation) from another
    /// thread to stop it early.
    pub fn play_path(&self, path: &str) -> Result<NavigationOutcome, SdkError> {
        self.play_path_with_cancel(path, &CancelToken::new())
    }

    /// Like [`play_path`](Receiver::play_path) with a caller-owned cancel token
    pub fn play_path_with_cancel(&self, path: &str, cancel: &CancelToken) -> Result<NavigationOutcome, SdkError> {
        let path = NavigationPath::parse(path)?;
        let source_token = self.source_token(&self.config.navigation.source_name)?;

        let _guard = self
            .navigation_lock
            .try_lock()
            .ok_or(SdkError::NavigationInProgress)?;
        *self.active_navigation.lock() = Some(cancel.clone());

        let result = Navigator::new(&self.client, &self.config.navigation, &source_token, cancel).run(&path);

        *self.active_navigation.lock() = None;
        result
    }

    /// Cancel the running navigation, if any; returns whether one was running
    pub fn cancel_navigation(&self) -> bool {
        match self.active_navigation.lock().as_ref() {
            Some(token) => {
                info!("Cancelling menu navigation");
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn source_token(&self, name: &str) -> Result<String, SdkError> {
        self.config
            .sources
            .token_for(name)
            .map(str::to_string)
            .ok_or_else(|| SdkError::UnknownSource(name.to_string()))
    }
}

impl std::fmt::Debug for Receiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Receiver")
            .field("name", &self.config.name)
            .field("client", &self.client)
            .finish()
    }
}
