use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::auction_db::DEFAULT_DB_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "config/auction.json";

/// One year; longer admin sessions are cut down to this
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the API server listens on
    pub bind_address: String,
    pub database_path: String,
    /// Where the desktop client sends its requests
    pub api_base_url: String,
    pub auction_title: String,
    pub auction_description: String,
    pub auction_ends_at: DateTime<Utc>,
    pub admin_username: String,
    /// Admin login is refused while unset
    pub admin_password: Option<String>,
    pub session_ttl_minutes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            database_path: DEFAULT_DB_PATH.to_string(),
            api_base_url: "http://127.0.0.1:3000".to_string(),
            auction_title: "Leilão de Bezerra".to_string(),
            auction_description:
                "Participe do leilão da bezerra. Faça seu lance antes que o leilão termine!"
                    .to_string(),
            // 2024-09-30T23:59:59 in Brasília time
            auction_ends_at: DateTime::from_timestamp(1_727_751_599, 0)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            admin_username: "admin".to_string(),
            admin_password: None,
            session_ttl_minutes: 60,
        }
    }
}

impl AppConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
    }

    pub fn auction_is_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.auction_ends_at
    }

    /// Environment variables win over the config file
    fn apply_env_overrides(&mut self) {
        override_from_env("AUCTION_BIND_ADDRESS", &mut self.bind_address);
        override_from_env("AUCTION_DATABASE_PATH", &mut self.database_path);
        override_from_env("AUCTION_API_BASE_URL", &mut self.api_base_url);
        override_from_env("AUCTION_ENDS_AT", &mut self.auction_ends_at);
        override_from_env("AUCTION_ADMIN_USERNAME", &mut self.admin_username);
        override_from_env("AUCTION_SESSION_TTL_MINUTES", &mut self.session_ttl_minutes);

        if let Ok(password) = env::var("AUCTION_ADMIN_PASSWORD") {
            self.admin_password = Some(password);
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let mut config = read_config_file(path);
    config.apply_env_overrides();

    if config.admin_password.is_none() {
        log::warn!("No admin password configured; admin login is disabled");
    }

    config
}

/// Read the JSON config; fields the file leaves out keep their defaults.
fn read_config_file(path: &str) -> AppConfig {
    let path = Path::new(path);
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            return AppConfig::default();
        }
    };

    let parsed = serde_json::from_str::<Value>(&content).and_then(|value| {
        let keys = file_keys(&value);
        AppConfig::deserialize(value).map(|config| (config, keys))
    });
    match parsed {
        Ok((config, keys)) => {
            log::info!(
                "Loaded {} from {}: {}",
                if keys.len() == 1 { "setting" } else { "settings" },
                path.display(),
                keys.join(", ")
            );
            config
        }
        Err(err) => {
            log::warn!("Failed to parse config file {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

/// Top-level keys present in the file, secrets masked out
fn file_keys(value: &Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return Vec::new();
    };
    object
        .keys()
        .filter(|key| key.as_str() != "admin_password")
        .cloned()
        .collect()
}

fn override_from_env<T>(key: &str, target: &mut T)
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return;
    };

    match raw.parse() {
        Ok(value) => {
            log::info!("{key} set from environment");
            *target = value;
        }
        Err(err) => log::warn!("Invalid {key} value `{raw}`: {err}; keeping configured value"),
    }
}
