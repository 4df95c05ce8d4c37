use apiex_core::{ApigeeConfig, Exporter, RestClient};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apiex")]
#[command(about = "Export Apigee entities as API hub registry documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export Apigee API Products
    Products {
        /// Apigee organization to export from
        org: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Diagnostics go to stderr; stdout carries only the exported document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Products { org } => {
            let config = ApigeeConfig::load()?;
            let client = RestClient::from_config(&org, &config)?;
            let document = Exporter::new(client).export().await?;
            serde_yaml::to_writer(std::io::stdout(), &document)?;
        }
    }

    Ok(())
}
