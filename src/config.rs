/// 환경 변수 기반 설정
// region:    --- Imports
use std::str::FromStr;
use thiserror::Error;

// endregion: --- Imports

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 게이트웨이 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayBackend {
    Postgres,
    Memory,
}

impl FromStr for GatewayBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(GatewayBackend::Postgres),
            "memory" => Ok(GatewayBackend::Memory),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: GatewayBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub init_schema: bool,
    pub kafka_brokers: String,
    pub kafka_group_id: String,
    pub changes_topic: String,
    pub bind_addr: String,
    pub sweep_interval_secs: u64,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: GatewayBackend::Postgres,
            database_url: None,
            db_max_connections: 5,
            init_schema: false,
            kafka_brokers: "localhost:9092".to_string(),
            kafka_group_id: "livestock-admin".to_string(),
            changes_topic: "livestock-changes".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            sweep_interval_secs: 60,
            page_size: 10,
        }
    }
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정 읽기
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 설정 읽기
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            backend: parse_or(&lookup, "GATEWAY_BACKEND", defaults.backend)?,
            database_url: lookup("DATABASE_URL"),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            init_schema: parse_or(&lookup, "INIT_SCHEMA", defaults.init_schema)?,
            kafka_brokers: lookup("KAFKA_BROKERS").unwrap_or(defaults.kafka_brokers),
            kafka_group_id: lookup("KAFKA_GROUP_ID").unwrap_or(defaults.kafka_group_id),
            changes_topic: lookup("CHANGES_TOPIC").unwrap_or(defaults.changes_topic),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            sweep_interval_secs: parse_or(&lookup, "SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)?,
            page_size: parse_or(&lookup, "PAGE_SIZE", defaults.page_size)?,
        };

        if config.page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "PAGE_SIZE",
                value: "0".to_string(),
            });
        }
        if config.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "SWEEP_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }
        if config.backend == GatewayBackend::Postgres && config.database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let config = AppConfig::from_lookup(lookup(&[("GATEWAY_BACKEND", "memory")])).unwrap();
        assert_eq!(config.backend, GatewayBackend::Memory);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.changes_topic, "livestock-changes");
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GATEWAY_BACKEND", "memory"),
            ("PAGE_SIZE", "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PAGE_SIZE", .. }));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GATEWAY_BACKEND", "memory"),
            ("PAGE_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PAGE_SIZE", .. }));
    }
}
