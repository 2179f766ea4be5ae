// Configuration module entry point
// Layers defaults, an optional config file and environment variables

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig};

/// Config file looked up in the working directory (any supported extension)
const CONFIG_FILE: &str = "pingserve";
/// Environment prefix, e.g. `PINGSERVE_SERVER__PORT=7070`
const ENV_PREFIX: &str = "PINGSERVE";

impl Config {
    /// Load configuration from the default file name
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from specified file path
    /// Missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", types::DEFAULT_HOST)?
            .set_default("server.port", i64::from(types::DEFAULT_PORT))?
            .set_default("server.keep_alive", true)?
            .set_default("logging.level", types::DEFAULT_LOG_LEVEL)?
            .set_default("logging.json", false)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", types::DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default(
                "http.max_body_size",
                i64::try_from(types::DEFAULT_MAX_BODY_SIZE).unwrap_or(i64::MAX),
            )?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }
}
