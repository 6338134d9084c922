//! Server configuration: command-line flags with environment fallbacks.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::chat::DEFAULT_GEMINI_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "shg_platform")]
#[command(about = "REST API for the SHG digital platform", long_about = None)]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory holding users.json, shgs.json, loans.json and volunteers.json
    #[arg(long, env = "SHG_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_URL", default_value = DEFAULT_GEMINI_URL)]
    pub gemini_api_url: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSON logs to a daily-rolling file in this directory
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "shg_platform",
            "--port",
            "8080",
            "--data-dir",
            "/var/lib/shg",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shg"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Config::try_parse_from(["shg_platform", "--log-format", "xml"]).is_err());
    }
}
