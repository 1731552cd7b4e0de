//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use linechat_client::UserProfile;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Invalid command-line settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user name is sent as a single protocol token.
    #[error("user name must be non-empty and contain no whitespace: {0:?}")]
    InvalidUser(String),

    /// The log level is not a valid filter directive.
    #[error("invalid log level {level:?}: {reason}")]
    InvalidLogLevel {
        /// Rejected directive.
        level: String,
        /// Parser message.
        reason: String,
    },
}

/// linechat terminal client
#[derive(Parser, Debug)]
#[command(name = "linechat")]
#[command(about = "Terminal client for the linechat protocol")]
#[command(version)]
pub struct Args {
    /// Server host name or address
    #[arg(long, env = "LINECHAT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "LINECHAT_PORT", default_value_t = 7000)]
    pub port: u16,

    /// Account name sent with LOGIN
    #[arg(short, long, env = "LINECHAT_USER")]
    pub user: String,

    /// Numeric id sent with SET_ID
    #[arg(long, default_value_t = 0)]
    pub id: u64,

    /// Self-introduction sent with SET_INTRO
    #[arg(long, default_value = "hello")]
    pub intro: String,

    /// Level sent with SET_LEVEL
    #[arg(long, default_value = "1")]
    pub level: String,

    /// Client description sent with CLIENT_INFO
    #[arg(long, default_value = concat!("linechat/", env!("CARGO_PKG_VERSION")))]
    pub client_info: String,

    /// Session log file, appended to
    #[arg(long, default_value = "log")]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `host:port` to dial.
    pub addr: String,
    /// Login identity.
    pub profile: UserProfile,
    /// Session log file.
    pub log_file: PathBuf,
    /// Default log filter.
    pub log_level: String,
}

impl Args {
    /// Validate and convert into a [`ClientConfig`].
    pub fn into_config(self) -> Result<ClientConfig, ConfigError> {
        if self.user.is_empty() || self.user.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidUser(self.user));
        }
        if let Err(error) = EnvFilter::try_new(&self.log_level) {
            return Err(ConfigError::InvalidLogLevel {
                level: self.log_level,
                reason: error.to_string(),
            });
        }

        Ok(ClientConfig {
            addr: format!("{}:{}", self.host, self.port),
            profile: UserProfile {
                user: self.user,
                id: self.id,
                introduction: self.intro,
                level: self.level,
                client_info: self.client_info,
            },
            log_file: self.log_file,
            log_level: self.log_level,
        })
    }
}
