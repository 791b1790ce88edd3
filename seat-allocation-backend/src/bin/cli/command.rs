use std::io::Write;

use clap::{Args, Parser, Subcommand};
use seat_allocation_backend::error::AppError;
use seat_allocation_backend::operator::OperatorToken;
use seat_allocation_backend::SeatService;
use seat_allocation_database::Registry;
use serde::Serialize;
use serde_json::json;

/// Collects ranked seat preferences and assigns seats by score.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct Operator {
    /// Operator password from the config.
    #[arg(long, env = "SEATS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store or replace a submission. Clears any admitted seat.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        /// Seat names, most wanted first. Repeat for each seat.
        #[arg(long = "preference", required = true)]
        preferences: Vec<String>,
    },
    /// Show one submission.
    Lookup { name: String },
    /// Every submission in priority order.
    List(Operator),
    /// Recompute all admitted seats.
    Allocate(Operator),
    /// Delete every submission.
    Reset(Operator),
    /// Names, scores and admitted seats.
    Results,
    /// Who sits on which seat.
    Occupancy(Operator),
}

fn print(mut out: impl Write, value: &impl Serialize) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn authenticate<R: Registry>(
    service: &SeatService<R>,
    operator: &Operator,
) -> Result<OperatorToken, AppError> {
    service.authenticate(&operator.password)
}

impl Command {
    pub async fn run<R: Registry>(
        self,
        service: &SeatService<R>,
        out: impl Write + Send,
    ) -> Result<(), AppError> {
        match self {
            Self::Submit {
                name,
                score,
                preferences,
            } => {
                service.submit(&name, score, &preferences).await?;
                print(out, &json!({ "ok": true }))
            }
            Self::Lookup { name } => print(out, &service.lookup(&name).await?),
            Self::List(operator) => {
                let token = authenticate(service, &operator)?;
                print(out, &service.list_all(&token).await?)
            }
            Self::Allocate(operator) => {
                let token = authenticate(service, &operator)?;
                print(out, &service.allocate(&token).await?)
            }
            Self::Reset(operator) => {
                let token = authenticate(service, &operator)?;
                service.reset(&token).await?;
                print(out, &json!({ "ok": true }))
            }
            Self::Results => print(out, &service.results().await?),
            Self::Occupancy(operator) => {
                let token = authenticate(service, &operator)?;
                print(out, &service.occupancy(&token).await?)
            }
        }
    }
}
