//! Command-line and environment configuration.

use std::{str::FromStr, time::Duration};

use clap::Parser;

use crate::{
    domain::resolve_language_code,
    infrastructure::translation::DEFAULT_ENDPOINT,
    usecase::{GatewayConfig, RelaySettings},
};

/// A user bootstrapped into the in-memory user directory (`name=language`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub name: String,
    pub preferred_language: String,
}

impl FromStr for SeedUser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, language) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=LANGUAGE, got '{s}'"))?;
        let (name, language) = (name.trim(), language.trim());
        if name.is_empty() || language.is_empty() {
            return Err(format!("expected NAME=LANGUAGE, got '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            preferred_language: language.to_string(),
        })
    }
}

/// Multilingual group-chat relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "lingo-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "LINGO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// MyMemory-compatible translation endpoint
    #[arg(long, env = "LINGO_TRANSLATION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub translation_endpoint: String,

    /// Upper bound for a single provider call
    #[arg(long, default_value_t = 10_000)]
    pub translation_timeout_ms: u64,

    #[arg(long, default_value_t = 300)]
    pub translation_cache_ttl_secs: u64,

    #[arg(long, default_value_t = 10_000)]
    pub translation_cache_capacity: usize,

    /// Number of stored messages replayed when entering a room
    #[arg(long, default_value_t = 50)]
    pub history_limit: usize,

    /// Language for users missing from the user directory
    #[arg(long, default_value = "en")]
    pub default_language: String,

    /// Room known to the room directory (repeatable)
    #[arg(long = "seed-room", value_name = "ROOM", default_values_t = ["Green".to_string(), "Blue".to_string(), "New".to_string()])]
    pub seed_rooms: Vec<String>,

    /// User known to the user directory (repeatable)
    #[arg(long = "seed-user", value_name = "NAME=LANGUAGE")]
    pub seed_users: Vec<SeedUser>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            timeout: self.translation_timeout(),
            cache_ttl: Duration::from_secs(self.translation_cache_ttl_secs),
            cache_capacity: self.translation_cache_capacity,
        }
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            history_limit: self.history_limit,
            default_language: resolve_language_code(&self.default_language),
        }
    }
}
