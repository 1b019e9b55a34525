//! A connect that times out on the blocking pool must not hold the process open.

use inlist_demo::connection::NoConnection;
use inlist_demo::{
    ConnectionConfig, Database, DatabaseClient, Demonstrator, InListError, Result,
    block_on_with_grace,
};
use std::time::{Duration, Instant};

/// Client whose connect blocks a pool thread far longer than any timeout, like a hung Oracle listener
struct HangingBlockingClient;

impl DatabaseClient for HangingBlockingClient {
    type Connection = NoConnection;

    fn database(&self) -> Database {
        Database::Oracle
    }

    async fn connect(&self, _config: &ConnectionConfig) -> Result<NoConnection> {
        tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(60)))
            .await
            .map_err(InListError::connection)?;
        Err(InListError::connection("listener answered too late"))
    }
}

#[test]
fn test_timed_out_blocking_connect_does_not_delay_shutdown() {
    let mut config = ConnectionConfig::oracle_default();
    config.connect_timeout_secs = Some(1);
    let started = Instant::now();

    let (report, out) = block_on_with_grace(
        async {
            let mut demonstrator = Demonstrator::new(Vec::new());
            let report = demonstrator
                .run(&HangingBlockingClient, &config, "SELECT 1 FROM dual")
                .await;
            (report, demonstrator.into_inner())
        },
        Duration::from_millis(200),
    )
    .unwrap();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(report.failure, Some(InListError::Timeout(_))));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Unable to access Oracle Database - connection attempt timed out after 1s\n"
    );
}
