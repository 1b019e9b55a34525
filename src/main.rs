//! Demonstrate ORA-01795 on Oracle and the absence of a comparable limit on PostgreSQL

use clap::Parser;
use inlist_demo::{
    DEFAULT_IN_LIST_SIZE, DemoConfig, SHUTDOWN_GRACE, block_on_with_grace, build_in_query,
    parse_in_list_size, run_demonstrations,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of values in the SELECT query's WHERE ... IN list
    #[arg(
        default_value_t = DEFAULT_IN_LIST_SIZE,
        allow_negative_numbers = true,
        value_parser = parse_in_list_size
    )]
    count: i32,

    /// JSON file with "oracle" and "postgresql" connection sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up on a connection attempt after this many seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Exit with status 1 when any database reports a failure
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    init_logger();
    let cli = Cli::parse();

    let sql = build_in_query(cli.count)?;

    let mut config = match &cli.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    if let Some(secs) = cli.connect_timeout {
        config = config.with_connect_timeout(secs);
    }

    info!(count = cli.count, "running IN-list demonstration");
    let (reports, _) = block_on_with_grace(
        run_demonstrations(&config, &sql, std::io::stdout().lock()),
        SHUTDOWN_GRACE,
    )?;

    let failed = reports.iter().filter(|report| !report.is_success()).count();
    info!(failed, total = reports.len(), "demonstration finished");

    if cli.strict && failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logger() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
