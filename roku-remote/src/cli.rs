use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ecp_client::Key;
use roku_resolver::ResolverConfig;

/// CLI remote for your Roku
#[derive(Parser, Debug)]
#[command(name = "roku", version, about = "CLI remote for your Roku")]
pub struct Cli {
    /// Talk to the device with this name instead of the current one.
    /// Not accepted by discover, list, use and forget.
    #[arg(short, long, global = true)]
    pub device: Option<String>,

    /// Discovery listening window in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds a discovered address is trusted before rediscovery
    #[arg(long, global = true, value_name = "SECS")]
    pub max_age: Option<u64>,

    /// Cache file location
    #[arg(long, global = true, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::default();
        if let Some(secs) = self.timeout {
            config = config.with_window(Duration::from_secs(secs));
        }
        if let Some(secs) = self.max_age {
            config = config.with_max_age(Duration::from_secs(secs));
        }
        if let Some(path) = &self.cache {
            config = config.with_cache_path(path);
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Return to the home screen
    Home,
    /// Reverse
    Rev,
    /// Fast Forward
    Fwd,
    /// Select
    Select,
    /// Left
    Left,
    /// Right
    Right,
    /// Up
    Up,
    /// Down
    Down,
    /// Back
    Back,
    /// Info
    Info,
    /// Backspace
    Backspace,
    /// Enter
    Enter,
    /// Search
    Search,
    /// Instant replay
    Replay,
    /// Play
    Play,
    /// Pause
    Pause,
    /// Discover Roku devices on your local network
    Discover,
    /// List known Roku devices
    List,
    /// Set Roku name to use
    Use { name: String },
    /// Display device info
    DeviceInfo,
    /// Send text to the Roku
    Text { text: String },
    /// List installed apps on your Roku
    Apps,
    /// Launch specified app
    App { name: String },
    /// Forget the cached device address
    Forget,
}

impl Command {
    /// Remote key sent by the simple keypress commands
    pub fn key(&self) -> Option<Key> {
        let key = match self {
            Command::Home => Key::Home,
            Command::Rev => Key::Rev,
            Command::Fwd => Key::Fwd,
            Command::Select => Key::Select,
            Command::Left => Key::Left,
            Command::Right => Key::Right,
            Command::Up => Key::Up,
            Command::Down => Key::Down,
            Command::Back => Key::Back,
            Command::Info => Key::Info,
            Command::Backspace => Key::Backspace,
            Command::Enter => Key::Enter,
            Command::Search => Key::Search,
            Command::Replay => Key::InstantReplay,
            // the remote has a single play/pause toggle
            Command::Play | Command::Pause => Key::Play,
            Command::Discover
            | Command::List
            | Command::Use { .. }
            | Command::DeviceInfo
            | Command::Text { .. }
            | Command::Apps
            | Command::App { .. }
            | Command::Forget => return None,
        };
        Some(key)
    }

    /// Subcommand name of the commands that work on the cache as a whole
    /// rather than on one device
    pub fn cache_only_name(&self) -> Option<&'static str> {
        match self {
            Command::Discover => Some("discover"),
            Command::List => Some("list"),
            Command::Use { .. } => Some("use"),
            Command::Forget => Some("forget"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(Command::Home.key(), Some(Key::Home));
        assert_eq!(Command::Replay.key(), Some(Key::InstantReplay));
        assert_eq!(Command::Pause.key(), Some(Key::Play));
        assert_eq!(Command::List.key(), None);
        assert_eq!(Command::App { name: "Netflix".to_string() }.key(), None);
    }

    #[test]
    fn test_cache_only_commands() {
        assert_eq!(Command::List.cache_only_name(), Some("list"));
        assert_eq!(Command::Use { name: "Den".to_string() }.cache_only_name(), Some("use"));
        assert_eq!(Command::Home.cache_only_name(), None);
        assert_eq!(Command::DeviceInfo.cache_only_name(), None);
    }

    #[test]
    fn test_parse_subcommands_and_globals() {
        let cli = Cli::try_parse_from(["roku", "device-info", "-d", "Bedroom", "--timeout", "5"]).unwrap();
        assert_eq!(cli.command, Command::DeviceInfo);
        assert_eq!(cli.device.as_deref(), Some("Bedroom"));

        let config = cli.resolver_config();
        assert_eq!(config.discovery.window, Duration::from_secs(5));
        assert_eq!(config.max_age, Duration::from_secs(60));

        let cli = Cli::try_parse_from(["roku", "text", "hello world"]).unwrap();
        assert_eq!(cli.command, Command::Text { text: "hello world".to_string() });
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        assert!(Cli::try_parse_from(["roku", "app"]).is_err());
        assert!(Cli::try_parse_from(["roku", "teleport"]).is_err());
    }
}
