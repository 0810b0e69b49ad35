use crate::api::espn_api::ESPN_BASE_URL;
use crate::error::{BoardError, Result};
use crate::models::League;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the sports API, league path is appended (ESPN_BASE_URL)
    pub espn_base_url: String,
    pub league: League,
    /// Optional picks book file; the built-in book is used when unset (PICKS_FILE)
    pub picks_file: Option<String>,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Per-request timeout in seconds; unset leaves the transport default (REQUEST_TIMEOUT_SECS)
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            espn_base_url: ESPN_BASE_URL.to_string(),
            league: League::default(),
            picks_file: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            espn_base_url: var("ESPN_BASE_URL").unwrap_or(defaults.espn_base_url),
            league: match var("LEAGUE") {
                Some(league) => league.parse()?,
                None => defaults.league,
            },
            picks_file: var("PICKS_FILE"),
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| BoardError::Config("PORT must be a valid port number".to_string()))?,
                None => defaults.port,
            },
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            request_timeout_secs: match var("REQUEST_TIMEOUT_SECS") {
                Some(secs) => match secs.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Some(secs),
                    _ => {
                        return Err(BoardError::Config(
                            "REQUEST_TIMEOUT_SECS must be a positive whole number".to_string(),
                        ))
                    }
                },
                None => defaults.request_timeout_secs,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.espn_base_url, ESPN_BASE_URL);
        assert_eq!(config.league, League::CollegeFootball);
        assert!(config.picks_file.is_none());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LEAGUE", "nfl"),
            ("PICKS_FILE", "data/week8.json"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("LOG_LEVEL", ""),
        ])
        .unwrap();
        assert_eq!(config.league, League::Nfl);
        assert_eq!(config.picks_file.as_deref(), Some("data/week8.json"));
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout_secs, Some(3));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(BoardError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("LEAGUE", "cricket")]),
            Err(BoardError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "-1")]),
            Err(BoardError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "0")]),
            Err(BoardError::Config(_))
        ));
    }
}
