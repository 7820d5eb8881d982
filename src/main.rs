//! checknodeip - node IP membership and location lookup
//!
//! This is the composition root that wires together all the components.

use clap::Parser;
use nodeip_check::{build_resolvers, load_config, Args, CliDriver};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration from environment
    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            return ExitCode::from(78);
        }
    };

    // Setup logging; stdout carries the report
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("resolvers configured: {:?}", cfg.resolvers);

    // ===== COMPOSITION ROOT =====
    let resolvers = build_resolvers(&cfg);
    let driver = CliDriver::new(cfg, resolvers);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    match driver.run(args, &mut stdout, &mut stderr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.exit_code(),
    }
}
