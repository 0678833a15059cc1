//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Two-player lie detector game engine.
#[derive(Parser, Debug)]
#[command(name = "truthwire", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a game session against a live or simulated feed.
    Run(RunArgs),

    /// Validate configuration files without running.
    Validate(ValidateArgs),

    /// Print the configured question pool.
    Questions(QuestionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a YAML configuration file.
    #[arg(short, long, env = "TRUTHWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Event source to consume.
    #[arg(long, default_value = "simulated")]
    pub feed: FeedKind,

    /// Address of the hardware bridge for `--feed tcp`.
    #[arg(long, default_value = "127.0.0.1:7878", env = "TRUTHWIRE_FEED_ADDR")]
    pub addr: String,

    /// Stream game snapshots to stdout as newline-delimited JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `questions`.
#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Path to a YAML configuration file.
    #[arg(short, long, env = "TRUTHWIRE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Feed implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FeedKind {
    /// No-hardware simulation with jittering pulse values.
    #[default]
    Simulated,
    /// Line-framed JSON over TCP from the hardware bridge.
    Tcp,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["truthwire", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.feed, FeedKind::Simulated);
        assert_eq!(args.addr, "127.0.0.1:7878");
        assert!(!args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_run_tcp_feed() {
        let cli =
            Cli::try_parse_from(["truthwire", "run", "--feed", "tcp", "--addr", "10.0.0.5:9000"])
                .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.feed, FeedKind::Tcp);
        assert_eq!(args.addr, "10.0.0.5:9000");
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["truthwire", "validate"]).is_err());
        assert!(Cli::try_parse_from(["truthwire", "validate", "game.yaml"]).is_ok());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["truthwire", "-vv", "run"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_help_and_version() {
        let err = Cli::try_parse_from(["truthwire", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["truthwire", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_version_format_parses() {
        for format in ["human", "json"] {
            let cli = Cli::try_parse_from(["truthwire", "version", "--format", format]);
            assert!(cli.is_ok(), "failed to parse format={format}");
        }
    }
}
