use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lyricle_cli::{
    build_service,
    commands::{Cli, execute},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = cli.config;

    // Logs go to stderr so command output on stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = match build_service(&config).await {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to start: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&service, cli.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to render output: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
