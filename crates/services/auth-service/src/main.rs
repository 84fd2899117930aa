//! Auth Service - HTTP server for user registration.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::config::AuthServiceConfig;

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "User registration service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides AUTH_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides AUTH_SERVICE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => match AuthServiceConfig::from_env() {
            Ok(mut config) => {
                if let Some(host) = host {
                    config.service.host = host;
                }
                if let Some(port) = port {
                    config.service.port = port;
                }
                auth_service_lib::run_server(config).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {:?}", e);
        std::process::exit(1);
    }
}
