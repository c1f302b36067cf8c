//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to the playback service.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use chime_cli::handlers::{self, Output};
use chime_cli::{Cli, CliConfig, CliError, bootstrap};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &CliError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = match CliConfig::from_env(cli.timeout_ms) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Ok(exit_code(&e));
        }
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(config);
    let outcome = handlers::execute(ctx.service(), &command).await;
    ctx.shutdown().await;

    Ok(match outcome {
        Ok(Output::Success(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Output::FailedJson(json)) => {
            println!("{json}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            exit_code(&e)
        }
    })
}
