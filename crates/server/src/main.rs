//! `lc-server` binary: serves the LC draft renderer over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use lc_server::{serve, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lc-server", version, about = "Render LC drafts to PDF over HTTP")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Directory holding the page backgrounds (1.jpg, 2.jpg).
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig {
        bind: cli.bind,
        static_dir: cli.static_dir,
    };
    let bind = config.bind;
    serve(config)
        .await
        .with_context(|| format!("server on {bind} stopped"))
}
