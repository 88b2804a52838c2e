//! Settings for the wallet binary.
//!
//! Loaded from `spv-wallet.toml` in the working directory, with
//! `SPV_WALLET_*` environment variables taking precedence
//! (`SPV_WALLET_SERVER__PORT=3000`).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter, e.g. "info" or "debug".
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// The xpub accepted on admin routes.
    pub admin_xpub: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .set_default("app.level", "info")?
            .add_source(config::File::with_name("spv-wallet").required(false))
            .add_source(config::Environment::with_prefix("SPV_WALLET").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
