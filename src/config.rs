use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Connection settings for one target database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    /// Database name for PostgreSQL, service name for Oracle
    pub database: String,
    pub username: String,
    pub password: String,
    /// Upper bound on the connect phase; absent or 0 means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    /// `hr/hr@localhost:1521/XE`
    pub fn oracle_default() -> Self {
        ConnectionConfig {
            host: "localhost".to_string(),
            port: 1521,
            database: "XE".to_string(),
            username: "hr".to_string(),
            password: "hr".to_string(),
            connect_timeout_secs: None,
        }
    }

    /// `postgres/postgres@localhost:5432/postgres`
    pub fn postgres_default() -> Self {
        ConnectionConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            connect_timeout_secs: None,
        }
    }

    /// EZConnect string understood by the Oracle client: `//host:port/service`
    pub fn oracle_connect_string(&self) -> String {
        format!("//{}:{}/{}", self.host, self.port, self.database)
    }

    /// Key/value connection string understood by tokio-postgres
    pub fn postgres_connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_conninfo(&self.host),
            self.port,
            quote_conninfo(&self.database),
            quote_conninfo(&self.username),
            quote_conninfo(&self.password),
        )
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

// Values with spaces, quotes or backslashes must be single-quoted in conninfo strings
fn quote_conninfo(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '\'' || ch == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Connection settings for both demonstration targets, loaded from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub oracle: ConnectionConfig,
    pub postgresql: ConnectionConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            oracle: ConnectionConfig::oracle_default(),
            postgresql: ConnectionConfig::postgres_default(),
        }
    }
}

impl DemoConfig {
    /// Load connection settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        Self::from_json(json)
    }

    /// Load connection settings from a serde_json::Value object; missing sections keep their defaults
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }

    /// Apply one connect timeout to both targets
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.oracle.connect_timeout_secs = Some(secs);
        self.postgresql.connect_timeout_secs = Some(secs);
        self
    }
}
