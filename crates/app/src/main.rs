//! Petstore Contract - Main Entry Point
//!
//! Usage:
//!   petstore-contract                 run the contract scenario
//!   petstore-contract dump-contracts  print the contracts as JSON
//!
//! Configuration comes from `petstore-contract.toml` and
//! `PETSTORE_CONTRACT_*` variables; log verbosity from `RUST_LOG`.

use std::process::ExitCode;

use petstore_contract::{HarnessError, resolve_contracts, run_harness};
use petstore_contract_domain::OrderFixture;
use petstore_contract_infrastructure::{load_config, render_report, to_json_stable};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(std::env::args().nth(1).as_deref()).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "contract harness aborted");
            ExitCode::from(2)
        }
    }
}

async fn run(command: Option<&str>) -> Result<ExitCode, HarnessError> {
    let config = load_config()?;
    let fixture = OrderFixture::default();
    let contracts = resolve_contracts(&config, &fixture)?;

    match command {
        Some("dump-contracts") => {
            print!("{}", to_json_stable(&contracts)?);
            return Ok(ExitCode::SUCCESS);
        }
        Some(other) => {
            eprintln!("unknown command '{other}', expected 'dump-contracts'");
            return Ok(ExitCode::from(2));
        }
        None => {}
    }

    info!(
        "Starting petstore contract harness v{}",
        env!("CARGO_PKG_VERSION")
    );
    let report = run_harness(config, fixture, contracts).await?;
    print!("{}", render_report(&report));

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
