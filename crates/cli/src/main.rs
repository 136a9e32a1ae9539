use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "In-memory book catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty catalog
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the effective configuration as JSON
    Config,
    /// Print the seed catalog as JSON
    Seed,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command {
        Command::Serve {
            host,
            port,
            no_seed,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if no_seed {
                settings.catalog.seed = false;
            }

            catalog_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                addr = %settings.server.bind_addr(),
                "catalog serve starting"
            );

            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(catalog_app::run(settings))
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)?;
            println!("{rendered}");
            Ok(())
        }
        Command::Seed => {
            let books = catalog_app::modules::books::models::seed_books();
            println!("{}", serde_json::to_string_pretty(&books)?);
            Ok(())
        }
    }
}
