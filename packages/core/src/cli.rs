use clap::Parser;

/// Employee service CLI arguments. Each flag overrides its env var.
#[derive(Debug, Default, Parser)]
#[command(
    name = "employee-service",
    version,
    about = "REST backend for employee records"
)]
pub struct Cli {
    /// SQLite connection URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Port to listen on (overrides API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Maximum pooled database connections (overrides DB_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,
}
