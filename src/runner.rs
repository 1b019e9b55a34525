use crate::{
    config::ConnectionConfig,
    connection::Database,
    result::{InListError, Result},
};
use std::future::Future;
use std::io::Write;
use tracing::{debug, info, warn};

/// Client support for one database backend, able to open demonstration connections
pub trait DatabaseClient {
    type Connection: DatabaseConnection;

    /// Which database this client talks to
    fn database(&self) -> Database;

    /// Open a new connection using the given settings
    fn connect(&self, config: &ConnectionConfig)
    -> impl Future<Output = Result<Self::Connection>>;
}

/// An open connection. `close` consumes it, so a connection is released at most once
pub trait DatabaseConnection {
    /// Execute `sql` and return the first column of the first row, if any row came back
    fn query_first_value(&mut self, sql: &str) -> impl Future<Output = Result<Option<i64>>>;

    fn close(self) -> impl Future<Output = Result<()>>;
}

/// Outcome of running the statement against one database
#[derive(Debug)]
pub struct DemoReport {
    pub database: Database,
    /// Set once the connection was established
    pub connected: bool,
    pub value: Option<i64>,
    /// Connect, driver or query failure
    pub failure: Option<InListError>,
    pub close_failure: Option<InListError>,
}

impl DemoReport {
    fn new(database: Database) -> Self {
        DemoReport {
            database,
            connected: false,
            value: None,
            failure: None,
            close_failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.close_failure.is_none()
    }
}

/// Runs the demonstration statement against a database and prints the outcome
pub struct Demonstrator<W: Write> {
    out: W,
}

impl<W: Write> Demonstrator<W> {
    pub fn new(out: W) -> Self {
        Demonstrator { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Connect, print the header, run `sql`, print the first value, and close.
    /// Every failure is printed and recorded in the report; nothing is returned as an error.
    pub async fn run<C: DatabaseClient>(
        &mut self,
        client: &C,
        config: &ConnectionConfig,
        sql: &str,
    ) -> DemoReport {
        let database = client.database();
        let mut report = DemoReport::new(database);

        debug!(%database, host = %config.host, port = config.port, "connecting");
        let mut connection = match connect_with_timeout(client, config).await {
            Ok(connection) => connection,
            Err(err) => {
                warn!(%database, error = %err, "connection failed");
                self.print_failure(database, &err);
                report.failure = Some(err);
                return report;
            }
        };
        report.connected = true;

        self.print_line(format_args!("{database}: {sql}"));

        debug!(%database, sql_len = sql.len(), "executing query");
        match connection.query_first_value(sql).await {
            Ok(Some(value)) => {
                info!(%database, value, "query returned a row");
                self.print_line(format_args!("\t{value}"));
                report.value = Some(value);
            }
            Ok(None) => {
                info!(%database, "query returned no rows");
            }
            Err(err) => {
                warn!(%database, error = %err, "query failed");
                self.print_failure(database, &err);
                report.failure = Some(err);
            }
        }

        debug!(%database, "closing connection");
        if let Err(err) = connection.close().await {
            warn!(%database, error = %err, "close failed");
            self.print_line(format_args!(
                "ERROR: Unable to close {database} connection - {err}"
            ));
            report.close_failure = Some(err);
        }

        report
    }

    fn print_failure(&mut self, database: Database, err: &InListError) {
        let prefix = match err {
            InListError::DriverUnavailable(_) => database.driver_failure_prefix(),
            _ => database.access_failure_prefix(),
        };
        self.print_line(format_args!("{prefix} - {err}"));
    }

    fn print_line(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(error = %err, "failed to write demonstration output");
        }
    }
}

async fn connect_with_timeout<C: DatabaseClient>(
    client: &C,
    config: &ConnectionConfig,
) -> Result<C::Connection> {
    match config.connect_timeout() {
        Some(limit) => tokio::time::timeout(limit, client.connect(config))
            .await
            .map_err(|_| InListError::Timeout(limit))?,
        None => client.connect(config).await,
    }
}
