//! Runs both demonstrations against targets where nothing is listening.
//! Each database must report its own failure without stopping the other.

use inlist_demo::{ConnectionConfig, Database, DemoConfig, build_in_query, run_demonstrations};

fn unreachable(mut config: ConnectionConfig) -> ConnectionConfig {
    config.host = "127.0.0.1".to_string();
    config.port = 1;
    config.connect_timeout_secs = Some(10);
    config
}

#[tokio::test(flavor = "multi_thread")]
async fn test_both_databases_attempted_when_unreachable() {
    let config = DemoConfig {
        oracle: unreachable(ConnectionConfig::oracle_default()),
        postgresql: unreachable(ConnectionConfig::postgres_default()),
    };
    let sql = build_in_query(1001).unwrap();

    let (reports, out) = run_demonstrations(&config, &sql, Vec::new()).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].database, Database::Oracle);
    assert_eq!(reports[1].database, Database::PostgreSql);
    for report in &reports {
        assert!(!report.connected);
        assert!(report.failure.is_some());
        assert!(report.close_failure.is_none());
    }

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Unable to access Oracle "));
    assert!(lines[1].starts_with("Unable to access PostgreSQL "));
    assert!(!output.contains(&sql));
}
