//! Command-line argument parsing for sqlrag.

use clap::Parser;
use std::path::PathBuf;

/// Chat with a SQLite database in natural language.
#[derive(Parser, Debug)]
#[command(name = "sqlrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file to load at startup
    #[arg(value_name = "DB_PATH")]
    pub database: Option<PathBuf>,

    /// Gemini API key (prefer the environment variable over the flag)
    #[arg(long, env = "GEMINI_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// LLM provider ("gemini", or "mock" for offline testing)
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses CLI arguments from the process environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path, using the platform default when the
    /// flag is absent.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
