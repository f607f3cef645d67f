//! Server configuration.

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 5000;

/// Runtime settings for [`crate::ui::Server`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to (`0` picks an ephemeral port)
    pub port: u16,
    /// Directory holding `index.html` and the other browser client assets
    pub static_dir: PathBuf,
    /// Limit for a single outbound send; `None` waits forever
    pub send_timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: default_static_dir(),
            send_timeout: send_timeout_from_millis(DEFAULT_SEND_TIMEOUT_MS),
        }
    }
}

/// Static assets shipped with the crate
pub fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// `0` disables the send timeout.
pub fn send_timeout_from_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}
