use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use fathom_sync_connect::{RunMode, SyncConfig, SyncWorkspace, DEFAULT_API_URL};

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fathom-sync")]
#[command(about = "Register missing Fathom events and generate TypeScript bindings for them")]
#[command(version)]
pub struct Cli {
    /// Output directory, relative to the source root (overrides `outDir`)
    pub out_dir: Option<String>,

    /// Directory to start configuration discovery from (defaults to the current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Fathom site id
    #[arg(long, env = "FATHOM_SITE_ID")]
    pub site_id: Option<String>,

    /// Fathom API token
    #[arg(long, env = "FATHOM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Fathom API
    #[arg(long, env = "FATHOM_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Set log level (off, error, warn, info, debug, trace). Falls back to
    /// `RUST_LOG`, then `info`.
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    /// Parses the process arguments after loading `.env`, so values from the
    /// file are visible to the `env` fallbacks.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Cli::parse()
    }
}

pub struct Config {
    pub mode: RunMode,
    pub sync: SyncConfig,
    pub workspace: SyncWorkspace,
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let working_dir = match cli.cwd {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        Ok(Self {
            mode: RunMode::from_credentials(cli.site_id, cli.api_key),
            sync: SyncConfig {
                api_url: cli.api_url,
            },
            workspace: SyncWorkspace::new(working_dir).with_out_dir(cli.out_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "fathom-sync",
            "generated/fathom",
            "--cwd",
            "/work/app",
            "--site-id",
            "ABCDEFG",
            "--api-key",
            "secret",
            "--api-url",
            "http://localhost:9000/v1",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.out_dir.as_deref(), Some("generated/fathom"));
        assert_eq!(cli.cwd, Some(PathBuf::from("/work/app")));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));

        let config = Config::from_cli(cli).unwrap();
        assert!(!config.mode.is_placeholder());
        assert_eq!(config.sync.api_url, "http://localhost:9000/v1");
        assert_eq!(config.workspace.working_dir, PathBuf::from("/work/app"));
        assert_eq!(config.workspace.out_dir.as_deref(), Some("generated/fathom"));
    }

    #[test]
    fn test_blank_credentials_select_placeholder() {
        let cli = Cli::try_parse_from([
            "fathom-sync",
            "--cwd",
            "/work/app",
            "--site-id",
            "",
            "--api-key",
            "",
        ])
        .unwrap();

        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.mode, RunMode::Placeholder);
        assert_eq!(config.workspace.out_dir, None);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let result = Cli::try_parse_from(["fathom-sync", "--log-level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_directive() {
        assert_eq!(LogLevel::Off.as_directive(), "off");
        assert_eq!(LogLevel::Trace.as_directive(), "trace");
    }
}
