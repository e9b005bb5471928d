//! Runtime settings for the cart host, read from the environment.
//!
//! | Variable                | Default | Meaning                                         |
//! |-------------------------|---------|-------------------------------------------------|
//! | `FOOD_CART_BUFFER_SIZE` | `32`    | Request queue length of the cart actor (≥ 1)    |
//! | `FOOD_CART_PROJECT_ID`  | empty   | Backend project id appended to menu image URLs  |

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

pub const BUFFER_SIZE_VAR: &str = "FOOD_CART_BUFFER_SIZE";
pub const PROJECT_ID_VAR: &str = "FOOD_CART_PROJECT_ID";

const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    pub buffer_size: usize,
    pub project_id: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            project_id: String::new(),
        }
    }
}

impl CartConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let buffer_size: usize = try_load(&lookup, BUFFER_SIZE_VAR, defaults.buffer_size)?;
        if buffer_size == 0 {
            warn!("{BUFFER_SIZE_VAR} must be at least 1");
            return Err(ConfigError::Invalid {
                key: BUFFER_SIZE_VAR,
                value: buffer_size.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        let project_id = lookup(PROJECT_ID_VAR).unwrap_or_else(|| {
            info!("{PROJECT_ID_VAR} not set, image URLs are used as-is");
            defaults.project_id
        });

        Ok(Self {
            buffer_size,
            project_id: project_id.trim().to_string(),
        })
    }
}

fn try_load<T>(lookup: impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.buffer_size, 32);
    }

    #[test]
    fn reads_values() {
        let config = CartConfig::from_lookup(lookup(&[
            (BUFFER_SIZE_VAR, " 8 "),
            (PROJECT_ID_VAR, "proj42"),
        ]))
        .unwrap();
        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.project_id, "proj42");
    }

    #[test]
    fn rejects_malformed_buffer_size() {
        let err = CartConfig::from_lookup(lookup(&[(BUFFER_SIZE_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BUFFER_SIZE_VAR, .. }));
    }

    #[test]
    fn rejects_zero_buffer_size() {
        let err = CartConfig::from_lookup(lookup(&[(BUFFER_SIZE_VAR, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: BUFFER_SIZE_VAR,
                value: "0".into(),
                reason: "must be at least 1".into(),
            }
        );
    }
}
