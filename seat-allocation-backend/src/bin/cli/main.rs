mod command;

use std::process::ExitCode;

use clap::Parser as _;
use command::Cli;
use seat_allocation_backend::error::AppError;
use seat_allocation_backend::telemetry::setup_telemetry;
use seat_allocation_backend::SeatService;
use seat_allocation_config::get_config;
use seat_allocation_database::PgRegistry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    setup_telemetry();
    let cli = Cli::parse();

    match program(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn program(cli: Cli) -> Result<(), AppError> {
    let config = get_config()?;
    info!(?config, "loaded config");

    let registry = PgRegistry::connect(&config.database_url)?;
    registry.migrate().await?;

    let service = SeatService::from_config(registry, &config);
    cli.command.run(&service, std::io::stdout()).await
}
