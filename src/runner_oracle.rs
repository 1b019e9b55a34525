use crate::{
    config::ConnectionConfig,
    connection::Database,
    result::{InListError, Result},
    runner::{DatabaseClient, DatabaseConnection},
};
use std::sync::Arc;

// ODPI-C could not load the Oracle Client libraries at runtime
const MISSING_CLIENT_LIBRARY: &str = "DPI-1047";

/// Oracle client support backed by the `oracle` crate (ODPI-C)
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleClient;

/// An open Oracle session. The driver is blocking, so every call runs on the blocking pool
pub struct OracleConnection {
    conn: Arc<oracle::Connection>,
}

impl DatabaseClient for OracleClient {
    type Connection = OracleConnection;

    fn database(&self) -> Database {
        Database::Oracle
    }

    async fn connect(&self, config: &ConnectionConfig) -> Result<OracleConnection> {
        let username = config.username.clone();
        let password = config.password.clone();
        let connect_string = config.oracle_connect_string();

        let conn = tokio::task::spawn_blocking(move || {
            oracle::Connection::connect(username, password, connect_string)
        })
        .await
        .map_err(InListError::connection)?
        .map_err(classify_connect_error)?;

        Ok(OracleConnection {
            conn: Arc::new(conn),
        })
    }
}

impl DatabaseConnection for OracleConnection {
    async fn query_first_value(&mut self, sql: &str) -> Result<Option<i64>> {
        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<i64>> {
            let mut rows = conn
                .query_as::<Option<i64>>(&sql, &[])
                .map_err(InListError::query)?;
            // NULL reads as 0, matching the PostgreSQL side
            let first = rows.next().transpose().map_err(InListError::query)?;
            Ok(first.map(|value| value.unwrap_or(0)))
        })
        .await
        .map_err(InListError::query)?
    }

    async fn close(self) -> Result<()> {
        let conn = self.conn;
        tokio::task::spawn_blocking(move || conn.close())
            .await
            .map_err(InListError::close)?
            .map_err(InListError::close)
    }
}

fn classify_connect_error(err: oracle::Error) -> InListError {
    let message = err.to_string();
    if message.contains(MISSING_CLIENT_LIBRARY) {
        InListError::DriverUnavailable(message)
    } else {
        InListError::connection(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_string_uses_ezconnect_form() {
        let config = ConnectionConfig::oracle_default();
        assert_eq!(config.oracle_connect_string(), "//localhost:1521/XE");
    }
}
