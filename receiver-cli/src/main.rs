use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use yamaha_sdk::logging::{self, LoggingMode};
use yamaha_sdk::{Receiver, ReceiverConfig, SdkError};

pub mod status;

use status::StatusReport;

/// Yamaha receiver control
///
/// Sends one command to a receiver on the local network and prints the
/// result. Settings come from an optional TOML file, overridden by
/// environment variables, overridden by flags.
#[derive(Parser, Debug)]
#[command(name = "receiver-cli")]
#[command(about = "Control a Yamaha network receiver over its XML protocol")]
#[command(version)]
pub struct Args {
    /// Receiver configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Receiver host name or IP, overrides the configuration file
    #[arg(long)]
    pub host: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Refresh and print the receiver state
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Turn the receiver on or put it in standby
    Power { state: Switch },
    /// Set the volume between 0 and 1
    Volume { level: f32 },
    /// Mute or unmute
    Mute { state: Switch },
    /// Select an input source by configured name
    Source { name: String },
    /// List configured source names
    Sources,
    /// Transport control
    Transport { action: TransportAction },
    /// Toggle shuffle
    Shuffle,
    /// Browse the radio menu to a path such as "Bookmarks>Jazz>KCSM"
    PlayPath { path: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Play,
    Pause,
    Stop,
    Next,
    Prev,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(anyhow::anyhow!("Timeout must be a positive number of seconds"));
            }
        }

        if let Command::Volume { level } = self.command {
            if !(0.0..=1.0).contains(&level) {
                return Err(anyhow::anyhow!("Volume must be between 0 and 1, got {}", level));
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        Ok(())
    }

    /// Build the receiver configuration from file, environment and flags
    pub fn receiver_config(&self) -> Result<ReceiverConfig> {
        let path = self
            .config
            .clone()
            .or_else(|| std::env::var("RECEIVER_CONFIG").ok().map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                let data = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                ReceiverConfig::parse_toml(&data).with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => ReceiverConfig::default(),
        };

        if let Ok(host) = std::env::var("RECEIVER_HOST") {
            config.host = host;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout = Duration::from_secs_f64(timeout);
        }

        config.validate().context("Invalid receiver configuration")?;
        Ok(config)
    }
}

/// Initialize tracing with the specified log level
///
/// `RECEIVER_LOG_LEVEL` takes precedence over the flag.
fn init_tracing(log_level: &str) -> Result<()> {
    let mode = LoggingMode::Development;
    let result = match std::env::var("RECEIVER_LOG_LEVEL") {
        Ok(_) => logging::init_logging(mode),
        Err(_) => logging::init_logging_with_filter(mode, &log_level.to_lowercase()),
    };
    result.context("Failed to initialize logging")
}

fn run(receiver: &Receiver, command: &Command) -> Result<()> {
    match command {
        Command::Status { json } => {
            receiver.refresh();
            let report = StatusReport::capture(receiver);
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Command::Power { state } => {
            if state.is_on() {
                receiver.turn_on()?;
            } else {
                receiver.turn_off()?;
            }
        }
        Command::Volume { level } => receiver.set_volume(*level)?,
        Command::Mute { state } => receiver.mute_volume(state.is_on())?,
        Command::Source { name } => match receiver.select_source(name) {
            Err(SdkError::UnknownSource(name)) => {
                return Err(anyhow::anyhow!(
                    "Unknown source '{}'. Configured sources: {}",
                    name,
                    receiver.source_list().join(", ")
                ));
            }
            other => other?,
        },
        Command::Sources => {
            for name in receiver.source_list() {
                println!("{}", name);
            }
        }
        Command::Transport { action } => match action {
            TransportAction::Play => receiver.media_play()?,
            TransportAction::Pause => receiver.media_pause()?,
            TransportAction::Stop => receiver.media_stop()?,
            TransportAction::Next => receiver.media_next_track()?,
            TransportAction::Prev => receiver.media_previous_track()?,
        },
        Command::Shuffle => receiver.toggle_shuffle()?,
        Command::PlayPath { path } => {
            let outcome = receiver
                .play_path(path)
                .with_context(|| format!("Failed to browse to '{}'", path))?;
            info!(attempts = outcome.attempts, "Navigation finished");
            println!("Playing {}", path);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_tracing(&args.log_level)?;

    let config = args.receiver_config()?;
    debug!(host = %config.host, "Using receiver");

    let receiver = Receiver::new(config).context("Failed to create receiver")?;
    run(&receiver, &args.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("receiver-cli").chain(args.iter().copied())).unwrap()
    }

    #[rstest]
    #[case(&["status"], Command::Status { json: false })]
    #[case(&["status", "--json"], Command::Status { json: true })]
    #[case(&["power", "on"], Command::Power { state: Switch::On })]
    #[case(&["mute", "off"], Command::Mute { state: Switch::Off })]
    #[case(&["volume", "0.25"], Command::Volume { level: 0.25 })]
    #[case(&["source", "Net Radio"], Command::Source { name: "Net Radio".to_string() })]
    #[case(&["transport", "prev"], Command::Transport { action: TransportAction::Prev })]
    #[case(&["play-path", "Bookmarks>Jazz"], Command::PlayPath { path: "Bookmarks>Jazz".to_string() })]
    fn test_command_parsing(#[case] argv: &[&str], #[case] expected: Command) {
        assert_eq!(parse(argv).command, expected);
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        assert!(parse(&["volume", "1.5"]).validate().is_err());
        assert!(parse(&["volume", "1"]).validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(parse(&["--log-level", "loud", "status"]).validate().is_err());
    }

    #[test]
    fn test_host_flag_overrides_config() {
        let args = parse(&["--host", "10.0.0.9", "--timeout", "2", "sources"]);
        let config = args.receiver_config().unwrap();
        assert_eq!(config.host, "10.0.0.9");
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }
}
