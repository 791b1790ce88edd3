use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info,seat_allocation_database=debug,seat_allocation_optimizer=info";

/// Logs go to stderr, stdout is reserved for command output.
pub fn setup_telemetry() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
        )
        .init();
}
