/*
 * Responsibility
 * - 環境変数の読み込み (APP_SECRET, PORT, scope sync 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where and as whom to register this app's scopes at startup.
#[derive(Debug, Clone)]
pub struct ScopeSyncConfig {
    pub host: Url,
    pub owner_id: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    app_secret: String,
    pub access_token_leeway_seconds: u64,
    pub scope_sync: Option<ScopeSyncConfig>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the shared secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_secret", &"<redacted>")
            .field(
                "access_token_leeway_seconds",
                &self.access_token_leeway_seconds,
            )
            .field("scope_sync", &self.scope_sync)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source (tests pass a map).
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_secret = var("APP_SECRET").ok_or(ConfigError::Missing("APP_SECRET"))?;
        if app_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("APP_SECRET"));
        }

        let access_token_leeway_seconds = var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let scope_sync = match var("SCOPE_SYNC_HOST").filter(|s| !s.trim().is_empty()) {
            Some(host) => {
                let host = Url::parse(host.trim())
                    .map_err(|_| ConfigError::Invalid("SCOPE_SYNC_HOST"))?;

                let owner_id = var("SCOPE_SYNC_OWNER_ID")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::Missing("SCOPE_SYNC_OWNER_ID"))?;

                let timeout = var("SCOPE_SYNC_TIMEOUT_SECONDS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10);

                Some(ScopeSyncConfig {
                    host,
                    owner_id,
                    timeout: Duration::from_secs(timeout),
                })
            }
            None => None,
        };

        Ok(Self {
            addr,
            app_secret,
            access_token_leeway_seconds,
            scope_sync,
        })
    }

    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }
}
