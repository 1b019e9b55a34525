pub mod config;
pub mod connection;
pub mod result;
pub mod runner;
#[cfg(feature = "oracle")]
pub mod runner_oracle;
#[cfg(feature = "postgresql")]
pub mod runner_postgresql;
pub mod str_utils;

// Re-export types for convenience
pub use config::{ConnectionConfig, DemoConfig};
pub use connection::{
    Database, SHUTDOWN_GRACE, UnavailableClient, block_on_with_grace, demonstrate_on,
    run_demonstrations,
};
pub use result::{InListError, Result};
pub use runner::{DatabaseClient, DatabaseConnection, DemoReport, Demonstrator};
pub use str_utils::{DEFAULT_IN_LIST_SIZE, build_in_list, build_in_query, parse_in_list_size};

#[cfg(feature = "oracle")]
pub use runner_oracle::OracleClient;
#[cfg(feature = "postgresql")]
pub use runner_postgresql::PostgresClient;
