//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};

use crate::utils::DurationInput;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-ring")]
#[command(about = "A countdown timer that survives restarts")]
#[command(version)]
pub struct Config {
    /// Directory holding the timer state file
    #[arg(long, env = "COUNTDOWN_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Milliseconds between display refreshes
    #[arg(long, default_value = "200", global = true)]
    pub cadence_ms: u64,

    /// Milliseconds between checks for changes made by other processes
    #[arg(long, default_value = "1000", global = true)]
    pub resync_ms: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a countdown, e.g. `5:00`, `1h30m`, `90`
    Start {
        duration: DurationInput,
        /// Return immediately instead of following the countdown
        #[arg(short, long)]
        detach: bool,
    },
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume {
        /// Return immediately instead of following the countdown
        #[arg(short, long)]
        detach: bool,
    },
    /// Cancel any countdown
    Reset,
    /// Print the current timer status
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow the stored countdown until it finishes
    Watch,
    /// Serve the HTTP control API
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value = "20554")]
        port: u16,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// State directory: flag, then `COUNTDOWN_STATE_DIR`, then
    /// `$HOME/.local/state/countdown-ring`
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".local/state/countdown-ring"),
            None => PathBuf::from(".countdown-ring"),
        }
    }

    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms.max(1))
    }

    pub fn resync_period(&self) -> Duration {
        Duration::from_millis(self.resync_ms.max(1))
    }

    /// Get the appropriate log level based on verbose flag and mode
    pub fn log_level(&self) -> &'static str {
        match (self.verbose, &self.command) {
            (true, _) => "debug",
            (false, Command::Serve { .. }) => "info",
            (false, _) => "warn",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_start_with_duration() {
        let config = Config::try_parse_from(["countdown-ring", "start", "1:30", "--detach"]).unwrap();
        match config.command {
            Command::Start { duration, detach } => {
                assert_eq!(duration, DurationInput::new(0, 1, 30));
                assert!(detach);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_duration_at_parse_time() {
        assert!(Config::try_parse_from(["countdown-ring", "start", "0"]).is_err());
    }

    #[test]
    fn explicit_state_dir_wins() {
        let config =
            Config::try_parse_from(["countdown-ring", "--state-dir", "/tmp/x", "status"]).unwrap();
        assert_eq!(config.state_dir(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn log_level_follows_mode() {
        let serve = Config::try_parse_from(["countdown-ring", "serve"]).unwrap();
        let watch = Config::try_parse_from(["countdown-ring", "watch"]).unwrap();
        let verbose = Config::try_parse_from(["countdown-ring", "-v", "watch"]).unwrap();

        assert_eq!(serve.log_level(), "info");
        assert_eq!(watch.log_level(), "warn");
        assert_eq!(verbose.log_level(), "debug");
    }
}
