use std::net::SocketAddr;
use std::time::Duration;

use ssc_backend::DEFAULT_METHOD;
use ssc_core::{Grammar, DEFAULT_CITIES};

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub provisioning_url: String,
    pub provisioning_method: String,
    pub session_addr: String,
    pub backend_timeout: Duration,
    pub default_operator: String,
    pub cities: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// SSC_PROVISIONING_URL and SSC_SESSION_ADDR are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = var("SSC_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("SSC_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let provisioning_url = var("SSC_PROVISIONING_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SSC_PROVISIONING_URL"))?;
        if !provisioning_url.starts_with("http://") && !provisioning_url.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "SSC_PROVISIONING_URL",
                "must be an http:// or https:// URL",
            ));
        }

        let provisioning_method =
            var("SSC_PROVISIONING_METHOD").unwrap_or_else(|| DEFAULT_METHOD.to_string());

        let session_addr = var("SSC_SESSION_ADDR")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SSC_SESSION_ADDR"))?;

        let backend_timeout = match var("SSC_BACKEND_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid(
                    "SSC_BACKEND_TIMEOUT_SECS",
                    "must be a positive number of seconds",
                ))?,
            None => Duration::from_secs(5),
        };

        let default_operator = var("SSC_DEFAULT_OPERATOR").unwrap_or_else(|| "ssc".to_string());

        let cities = match var("SSC_CITIES") {
            Some(list) if !list.trim().is_empty() => {
                list.split(',').map(|c| c.trim().to_string()).collect()
            }
            _ => DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        };

        Ok(Config {
            listen_addr,
            provisioning_url,
            provisioning_method,
            session_addr,
            backend_timeout,
            default_operator,
            cities,
        })
    }

    /// Build the login grammar for the configured cities.
    pub fn grammar(&self) -> Result<Grammar, ConfigError> {
        Grammar::new(&self.cities)
            .map_err(|_| ConfigError::Invalid("SSC_CITIES", "must be comma separated latin names"))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(var) => {
                write!(f, "Missing required environment variable: {}", var)
            }
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("SSC_PROVISIONING_URL", "http://prov.local:8080/RPC2"),
        ("SSC_SESSION_ADDR", "sessions.local:7000"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.provisioning_method, "subscriber.lookup");
        assert_eq!(config.backend_timeout, Duration::from_secs(5));
        assert_eq!(config.default_operator, "ssc");
        assert!(config.cities.contains(&"KHARKOV".to_string()));
        assert!(config.grammar().unwrap().is_city("KHARKOV"));
    }

    #[test]
    fn test_missing_required() {
        assert!(matches!(
            load(&[("SSC_SESSION_ADDR", "sessions.local:7000")]),
            Err(ConfigError::Missing("SSC_PROVISIONING_URL"))
        ));
        assert!(matches!(
            load(&[("SSC_PROVISIONING_URL", "http://prov.local/RPC2")]),
            Err(ConfigError::Missing("SSC_SESSION_ADDR"))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SSC_BACKEND_TIMEOUT_SECS", "0"));
        assert!(load(&vars).is_err());

        let mut vars = REQUIRED.to_vec();
        vars.push(("SSC_LISTEN_ADDR", "nowhere"));
        assert!(load(&vars).is_err());

        let vars = [
            ("SSC_PROVISIONING_URL", "prov.local"),
            ("SSC_SESSION_ADDR", "sessions.local:7000"),
        ];
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_cities() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SSC_CITIES", "kharkov, lviv"));
        let config = load(&vars).unwrap();
        let grammar = config.grammar().unwrap();
        assert_eq!(grammar.cities(), ["KHARKOV", "LVIV"]);

        let mut vars = REQUIRED.to_vec();
        vars.push(("SSC_CITIES", "kharkov,,"));
        let config = load(&vars).unwrap();
        assert!(config.grammar().is_err());
    }
}
