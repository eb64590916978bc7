use anyhow::Result;
use clap::{Parser, Subcommand};

/// scholarfolio - academic portfolio site
#[derive(Parser)]
#[command(name = "scholarfolio")]
#[command(about = "Serves the academic portfolio pages and their interactive bundle", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = scholarfolio::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    scholarfolio::observability::init_observability(
        "scholarfolio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => scholarfolio::server::serve(config, host, port).await,
    }
}
