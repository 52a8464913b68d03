use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Command line configuration for the dashboard server
#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard")]
#[command(about = "Student performance dashboard: upload evaluations, browse tracks and students")]
pub struct Config {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for HTTP server
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Largest accepted upload, in megabytes
    #[arg(long, default_value_t = 25)]
    pub max_upload_mb: usize,

    /// Idle lifetime of a browser session, in seconds
    #[arg(long, default_value_t = 24 * 60 * 60)]
    pub session_ttl_secs: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["dashboard"])
    }
}

impl Config {
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Initialize env_logger, letting RUST_LOG override the configured level.
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
