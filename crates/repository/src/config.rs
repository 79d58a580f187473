//! Repository configuration.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_PAGE_SIZE;

pub const PAGE_SIZE_ENV: &str = "PATTERNKIT_PAGE_SIZE";
pub const MAX_PAGE_SIZE_ENV: &str = "PATTERNKIT_MAX_PAGE_SIZE";
pub const ID_STRATEGY_ENV: &str = "PATTERNKIT_ID_STRATEGY";

/// How a repository assigns identifiers to new entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `"1"`, `"2"`, ... in creation order.
    #[default]
    Sequential,
    /// Time-ordered UUIDv7 strings.
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!("unknown id strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Page size used when a query does not set one.
    pub default_page_size: u32,
    /// Upper bound applied to requested page sizes (`None` = unbounded).
    pub max_page_size: Option<u32>,
    pub id_strategy: IdStrategy,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
            id_strategy: IdStrategy::Sequential,
        }
    }
}

impl RepositoryConfig {
    /// Load from `PATTERNKIT_*` environment variables.
    ///
    /// Missing variables keep their defaults; malformed ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.default_page_size = size,
                _ => {
                    tracing::warn!(
                        var = PAGE_SIZE_ENV,
                        value = %raw,
                        "invalid page size; using default"
                    );
                }
            }
        }

        if let Some(raw) = lookup(MAX_PAGE_SIZE_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.max_page_size = Some(size),
                _ => {
                    tracing::warn!(
                        var = MAX_PAGE_SIZE_ENV,
                        value = %raw,
                        "invalid max page size; leaving unbounded"
                    );
                }
            }
        }

        if let Some(raw) = lookup(ID_STRATEGY_ENV) {
            match raw.parse::<IdStrategy>() {
                Ok(strategy) => config.id_strategy = strategy,
                Err(e) => tracing::warn!(var = ID_STRATEGY_ENV, error = %e, "using sequential ids"),
            }
        }

        config
    }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = RepositoryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, RepositoryConfig::default());
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn reads_every_variable() {
        let config = RepositoryConfig::from_lookup(lookup(&[
            (PAGE_SIZE_ENV, "25"),
            (MAX_PAGE_SIZE_ENV, "200"),
            (ID_STRATEGY_ENV, "UUID"),
        ]));
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, Some(200));
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = RepositoryConfig::from_lookup(lookup(&[
            (PAGE_SIZE_ENV, "zero"),
            (MAX_PAGE_SIZE_ENV, "0"),
            (ID_STRATEGY_ENV, "snowflake"),
        ]));
        assert_eq!(config, RepositoryConfig::default());
    }
}
