use clap::Parser;
use rinkcal::cli::{Cli, exit_status, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let result = run(&cli).await;
    if let Err(e) = &result {
        tracing::error!("ERROR: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}
