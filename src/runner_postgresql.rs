use crate::{
    config::ConnectionConfig,
    connection::Database,
    result::{InListError, Result},
    runner::{DatabaseClient, DatabaseConnection},
};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

/// PostgreSQL client support backed by tokio-postgres
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresClient;

/// An open PostgreSQL session plus the task driving its socket
pub struct PostgresConnection {
    client: Client,
    driver: JoinHandle<std::result::Result<(), tokio_postgres::Error>>,
}

impl DatabaseClient for PostgresClient {
    type Connection = PostgresConnection;

    fn database(&self) -> Database {
        Database::PostgreSql
    }

    async fn connect(&self, config: &ConnectionConfig) -> Result<PostgresConnection> {
        let (client, connection) =
            tokio_postgres::connect(&config.postgres_connection_string(), NoTls)
                .await
                .map_err(InListError::connection)?;

        // Run the connection in the background; its result is collected on close
        let driver = tokio::spawn(connection);

        Ok(PostgresConnection { client, driver })
    }
}

impl DatabaseConnection for PostgresConnection {
    // Simple query protocol: the statement goes over as-is and values come back as text,
    // so integer, numeric and other number columns are all read the same way
    async fn query_first_value(&mut self, sql: &str) -> Result<Option<i64>> {
        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(InListError::query)?;

        let Some(row) = messages.iter().find_map(|message| match message {
            SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        }) else {
            return Ok(None);
        };

        if row.columns().is_empty() {
            return Err(InListError::query("query returned a row without columns"));
        }
        let text = row.try_get(0).map_err(InListError::query)?;
        first_value_from_text(text).map(Some)
    }

    async fn close(self) -> Result<()> {
        // Dropping the last client handle sends Terminate and lets the driver task finish
        drop(self.client);
        match self.driver.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(InListError::close(err)),
            Err(join_err) => Err(InListError::close(join_err)),
        }
    }
}

/// Read a first-column value sent in text form as an integer.
/// SQL NULL reads as 0, and a fractional numeric is truncated toward zero.
pub fn first_value_from_text(text: Option<&str>) -> Result<i64> {
    let Some(text) = text else {
        return Ok(0);
    };
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let not_an_integer =
        || InListError::query(format!("cannot read value '{text}' as an integer"));

    let (whole, fraction) = trimmed.split_once('.').ok_or_else(not_an_integer)?;
    let digits = whole.strip_prefix(['-', '+']).unwrap_or(whole);
    if digits.is_empty() && fraction.is_empty() {
        return Err(not_an_integer());
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(digits) || !all_digits(fraction) {
        return Err(not_an_integer());
    }
    if digits.is_empty() {
        return Ok(0);
    }
    let magnitude: i64 = digits.parse().map_err(|_| not_an_integer())?;
    Ok(if whole.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_text() {
        assert_eq!(first_value_from_text(Some("1")).unwrap(), 1);
        assert_eq!(first_value_from_text(Some("-42")).unwrap(), -42);
        assert_eq!(
            first_value_from_text(Some("9223372036854775807")).unwrap(),
            i64::MAX
        );
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(first_value_from_text(Some("1.000")).unwrap(), 1);
        assert_eq!(first_value_from_text(Some("7.9")).unwrap(), 7);
        assert_eq!(first_value_from_text(Some("-7.9")).unwrap(), -7);
        assert_eq!(first_value_from_text(Some("-0.5")).unwrap(), 0);
        assert_eq!(first_value_from_text(Some("12.")).unwrap(), 12);
    }

    #[test]
    fn test_null_reads_as_zero() {
        assert_eq!(first_value_from_text(None).unwrap(), 0);
    }

    #[test]
    fn test_non_numeric_text_is_query_error() {
        for text in ["abc", "1.2.3", ".", "-", "1e3", "99999999999999999999.0", "NaN"] {
            let err = first_value_from_text(Some(text)).unwrap_err();
            assert!(matches!(err, InListError::Query(_)), "{text}");
            assert_eq!(
                err.to_string(),
                format!("cannot read value '{text}' as an integer")
            );
        }
    }

    #[test]
    fn test_connection_string_uses_defaults() {
        let config = ConnectionConfig::postgres_default();
        assert_eq!(
            config.postgres_connection_string(),
            "host=localhost port=5432 dbname=postgres user=postgres password=postgres"
        );
    }
}
