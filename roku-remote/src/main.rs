//! `roku` - CLI remote for your Roku
//!
//! Finds the player with SSDP (remembering it for a minute between runs) and
//! drives it through its External Control Protocol.

mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ecp_client::EcpClient;
use roku_resolver::logging::{init_logging, LoggingMode};
use roku_resolver::DeviceResolver;

use cli::Cli;
use commands::Executor;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mode = if cli.verbose {
        LoggingMode::Debug
    } else {
        LoggingMode::Quiet
    };
    if let Err(e) = init_logging(mode) {
        eprintln!("warning: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let resolver = DeviceResolver::from_config(cli.resolver_config())?;
    let ecp = EcpClient::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    Executor::new(&resolver, &ecp, cli.device.as_deref()).execute(&cli.command, &mut out)
}
