//! Environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use vocab_core::PracticeSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Seed file for the in-memory store. Empty store when unset.
    pub data_path: Option<PathBuf>,
    /// Defaults for new memorize sessions.
    pub practice: PracticeSettings,
    /// Sessions and quizzes untouched this long are dropped.
    pub session_idle: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: None,
            practice: PracticeSettings::default(),
            session_idle: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }
        config.data_path = lookup("VOCAB_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        if let Some(ms) = lookup("AUTOPLAY_TICK_MS") {
            config.practice.tick_interval_ms = parse_positive("AUTOPLAY_TICK_MS", ms)?;
        }
        if let Some(secs) = lookup("SESSION_IDLE_SECS") {
            config.session_idle =
                Duration::from_secs(parse_positive("SESSION_IDLE_SECS", secs)?);
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_positive(name: &'static str, value: String) -> Result<u64, ConfigError> {
    match parse::<u64>(name, value)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.practice.tick_interval_ms, 500);
        assert_eq!(config.session_idle, Duration::from_secs(1800));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("VOCAB_DATA", "data/words.json"),
            ("AUTOPLAY_TICK_MS", "250"),
            ("SESSION_IDLE_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.data_path, Some(PathBuf::from("data/words.json")));
        assert_eq!(config.practice.tick_interval_ms, 250);
        assert_eq!(config.session_idle, Duration::from_secs(90));
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: eighty");
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(Config::from_lookup(lookup(&[("AUTOPLAY_TICK_MS", "0")])).is_err());
    }

    #[test]
    fn rejects_zero_idle_timeout() {
        let err = Config::from_lookup(lookup(&[("SESSION_IDLE_SECS", "0")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SESSION_IDLE_SECS: 0");
    }
}
