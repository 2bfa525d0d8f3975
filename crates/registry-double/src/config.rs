use crate::error::{DoubleError, Result};
use std::env;
use std::net::SocketAddr;

/// What the double answers to requests no route template matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedRoutes {
    /// Empty 200 response, the behaviour clients of the emulated service observe.
    #[default]
    Silent,
    /// 404 with a "not found" envelope.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleConfig {
    /// Listener address; port 0 picks an ephemeral port.
    pub bind_addr: SocketAddr,
    /// Largest request body read for create and update.
    pub body_limit: usize,
    pub unmatched_routes: UnmatchedRoutes,
}

impl Default for DoubleConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            body_limit: 2 * 1024 * 1024,
            unmatched_routes: UnmatchedRoutes::Silent,
        }
    }
}

impl DoubleConfig {
    /// Read overrides from `REGISTRY_DOUBLE_ADDR`, `REGISTRY_DOUBLE_BODY_LIMIT`
    /// and `REGISTRY_DOUBLE_STRICT_ROUTES`; unset variables keep the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("REGISTRY_DOUBLE_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| DoubleError::InvalidConfig(format!("REGISTRY_DOUBLE_ADDR {:?}: {}", addr, e)))?;
        }

        if let Ok(limit) = env::var("REGISTRY_DOUBLE_BODY_LIMIT") {
            config.body_limit = limit.parse().map_err(|e| {
                DoubleError::InvalidConfig(format!("REGISTRY_DOUBLE_BODY_LIMIT {:?}: {}", limit, e))
            })?;
        }

        if let Ok(strict) = env::var("REGISTRY_DOUBLE_STRICT_ROUTES") {
            config.unmatched_routes = if parse_flag(&strict)? {
                UnmatchedRoutes::NotFound
            } else {
                UnmatchedRoutes::Silent
            };
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(DoubleError::InvalidConfig(format!(
            "REGISTRY_DOUBLE_STRICT_ROUTES {:?}: expected a boolean",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_ephemeral_loopback() {
        let config = DoubleConfig::default();
        assert!(config.bind_addr.ip().is_loopback());
        assert_eq!(config.bind_addr.port(), 0);
        assert_eq!(config.unmatched_routes, UnmatchedRoutes::Silent);
    }

    // Every case lives in one test so no other test races on these variables.
    #[test]
    fn test_from_env() {
        const VARS: [&str; 3] = [
            "REGISTRY_DOUBLE_ADDR",
            "REGISTRY_DOUBLE_BODY_LIMIT",
            "REGISTRY_DOUBLE_STRICT_ROUTES",
        ];
        let clear = || VARS.iter().for_each(|var| env::remove_var(var));

        clear();
        assert_eq!(DoubleConfig::from_env().unwrap(), DoubleConfig::default());

        env::set_var("REGISTRY_DOUBLE_ADDR", "127.0.0.1:48080");
        env::set_var("REGISTRY_DOUBLE_BODY_LIMIT", "1024");
        env::set_var("REGISTRY_DOUBLE_STRICT_ROUTES", "true");
        let config = DoubleConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 48080)));
        assert_eq!(config.body_limit, 1024);
        assert_eq!(config.unmatched_routes, UnmatchedRoutes::NotFound);

        env::set_var("REGISTRY_DOUBLE_ADDR", "not-an-address");
        let err = DoubleConfig::from_env().unwrap_err();
        assert!(matches!(err, DoubleError::InvalidConfig(ref msg) if msg.contains("REGISTRY_DOUBLE_ADDR")));

        env::remove_var("REGISTRY_DOUBLE_ADDR");
        env::set_var("REGISTRY_DOUBLE_BODY_LIMIT", "-5");
        let err = DoubleConfig::from_env().unwrap_err();
        assert!(matches!(err, DoubleError::InvalidConfig(ref msg) if msg.contains("REGISTRY_DOUBLE_BODY_LIMIT")));

        env::remove_var("REGISTRY_DOUBLE_BODY_LIMIT");
        env::set_var("REGISTRY_DOUBLE_STRICT_ROUTES", "maybe");
        assert!(DoubleConfig::from_env().is_err());

        clear();
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
