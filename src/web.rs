use clap::Parser;
use student_dashboard::{Config, app, config};

/// Main entry point for the dashboard web server
///
/// Parses the command line, sets up logging and serves the dashboard until
/// the process is stopped.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    config::init_logging(&config.log_level);

    log::info!(
        "Starting dashboard on {}:{} (static files from {})",
        config.host,
        config.port,
        config.static_dir.display()
    );

    app::run(config).await
}
