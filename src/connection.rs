use crate::{
    config::{ConnectionConfig, DemoConfig},
    result::{InListError, Result},
    runner::{DatabaseClient, DatabaseConnection, DemoReport, Demonstrator},
};
use std::fmt;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// How long shutdown waits for blocking driver calls abandoned by a connect timeout
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Target database backends, in the order the demonstration visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Oracle,
    PostgreSql,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::Oracle, Database::PostgreSql];

    pub fn label(self) -> &'static str {
        match self {
            Database::Oracle => "Oracle",
            Database::PostgreSql => "PostgreSQL",
        }
    }

    /// Prefix for connect and query failures
    pub fn access_failure_prefix(self) -> &'static str {
        match self {
            Database::Oracle => "Unable to access Oracle Database",
            Database::PostgreSql => "Unable to access PostgreSQL database",
        }
    }

    /// Prefix for missing client support
    pub fn driver_failure_prefix(self) -> &'static str {
        match self {
            Database::Oracle => "Unable to access Oracle client driver",
            Database::PostgreSql => "Unable to access PostgreSQL client driver",
        }
    }

    pub fn config(self, config: &DemoConfig) -> &ConnectionConfig {
        match self {
            Database::Oracle => &config.oracle,
            Database::PostgreSql => &config.postgresql,
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stand-in client for a backend whose support was not compiled in
pub struct UnavailableClient {
    database: Database,
}

impl UnavailableClient {
    pub fn new(database: Database) -> Self {
        UnavailableClient { database }
    }
}

/// A connection that can never exist
pub enum NoConnection {}

impl DatabaseConnection for NoConnection {
    async fn query_first_value(&mut self, _sql: &str) -> Result<Option<i64>> {
        match *self {}
    }

    async fn close(self) -> Result<()> {
        match self {}
    }
}

impl DatabaseClient for UnavailableClient {
    type Connection = NoConnection;

    fn database(&self) -> Database {
        self.database
    }

    async fn connect(&self, _config: &ConnectionConfig) -> Result<NoConnection> {
        let feature = match self.database {
            Database::Oracle => "oracle",
            Database::PostgreSql => "postgresql",
        };
        Err(InListError::DriverUnavailable(format!(
            "{} client support was not compiled in (enable the `{feature}` feature)",
            self.database
        )))
    }
}

/// Run the statement against one database, picking the client compiled in for it
pub async fn demonstrate_on<W: Write>(
    demonstrator: &mut Demonstrator<W>,
    database: Database,
    config: &ConnectionConfig,
    sql: &str,
) -> DemoReport {
    match database {
        #[cfg(feature = "oracle")]
        Database::Oracle => {
            demonstrator
                .run(&crate::runner_oracle::OracleClient, config, sql)
                .await
        }
        #[cfg(feature = "postgresql")]
        Database::PostgreSql => {
            demonstrator
                .run(&crate::runner_postgresql::PostgresClient, config, sql)
                .await
        }
        #[allow(unreachable_patterns)]
        other => {
            demonstrator
                .run(&UnavailableClient::new(other), config, sql)
                .await
        }
    }
}

/// Run the statement against Oracle and then PostgreSQL, one after the other
pub async fn run_demonstrations<W: Write>(
    config: &DemoConfig,
    sql: &str,
    out: W,
) -> (Vec<DemoReport>, W) {
    let mut demonstrator = Demonstrator::new(out);
    let mut reports = Vec::with_capacity(Database::ALL.len());
    for database in Database::ALL {
        let report = demonstrate_on(&mut demonstrator, database, database.config(config), sql).await;
        reports.push(report);
    }
    (reports, demonstrator.into_inner())
}

/// Drive `future` on a fresh multi-threaded runtime, then shut the runtime down
/// without waiting past `grace` for blocking tasks that are still running.
/// A timed-out Oracle connect keeps its blocking thread busy, and a plain runtime
/// drop would wait for it.
pub fn block_on_with_grace<F: Future>(future: F, grace: Duration) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(grace);
    Ok(output)
}
