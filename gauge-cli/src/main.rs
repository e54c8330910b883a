//! Gauge unit conversion server
//!
//! Line-delimited JSON-RPC 2.0 on stdin/stdout. Logs go to stderr.
//!
//! Methods:
//! - ping
//! - units/list: list units, optionally for one dimension
//! - convert: `{value, from, to}` or `{query: "5 km to mi"}`
//! - simplify: best-fit storage unit
//! - to_base: express a value in its dimension's base unit
//! - compatible: same dimension / bridgeable check for two units

mod config;
mod error;
mod rpc;

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use gauge_units::UNITS;
use tracing::{error, info, warn};
use config::Config;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .with_ansi(io::stderr().is_terminal())
        .init();

    for warning in &config.warnings {
        warn!("{}", warning);
    }

    info!(
        version = SERVER_VERSION,
        units = UNITS.len(),
        precision = ?config.precision,
        "gauge ready, waiting for requests"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match rpc::serve(&config, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}
