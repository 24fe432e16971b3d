use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dynamo_registry::{
    report, Application, Environment, Registry, Scope, Settings, TableDescriptor,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Manage the DynamoDB tables declared for an application.
#[derive(Parser, Debug)]
#[command(name = "dynamo-registry")]
#[command(version, about, long_about = "Manage the DynamoDB tables declared for an application.

Tables are read from a JSON array of table descriptors. Connection settings
come from the environment:

  DYNAMO_ENABLE_LOCAL    - Use a local DynamoDB endpoint (true/false)
  DYNAMO_LOCAL_HOST      - Local endpoint host (required in local mode)
  DYNAMO_LOCAL_PORT      - Local endpoint port (required in local mode)
  AWS_ACCESS_KEY_ID      - Static access key (optional)
  AWS_SECRET_ACCESS_KEY  - Static secret key (optional)
  AWS_REGION             - AWS region (defaults to us-east-1)")]
struct Cli {
    /// JSON file with the table descriptors
    #[arg(long, value_name = "FILE", env = "DYNAMO_TABLES_FILE")]
    tables: PathBuf,

    /// AWS region, overrides AWS_REGION
    #[arg(long)]
    region: Option<String>,

    /// Force local mode, overrides DYNAMO_ENABLE_LOCAL
    #[arg(long)]
    local: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Print the effective configuration
    ShowConfig,

    /// Create every declared table
    CreateAll {
        /// Wait until every table is active
        #[arg(long)]
        wait: bool,
    },

    /// Delete every declared table
    DestroyAll {
        /// Wait until every table is gone
        #[arg(long)]
        wait: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynamo_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = load_application(&cli)?;
    let registry = Registry::new().with_app(app.clone());
    let scope = Scope::new();

    match cli.command {
        Command::ShowConfig => {
            for line in report::format_config(app.config()) {
                println!("{line}");
            }
        }
        Command::CreateAll { wait } => {
            registry.create_all(&scope).await?;
            if wait {
                let connection = registry.connection(&scope).await?;
                for table in app.config().tables() {
                    tracing::info!(table = %table.name, "Waiting for table to become active");
                    registry
                        .connector()
                        .wait_for_active(&connection, &table.name)
                        .await?;
                }
            }
            tracing::info!(tables = app.config().tables().len(), "Tables created");
        }
        Command::DestroyAll { wait } => {
            registry.destroy_all(&scope).await?;
            if wait {
                let connection = registry.connection(&scope).await?;
                for table in app.config().tables() {
                    registry
                        .connector()
                        .wait_for_deleted(&connection, &table.name)
                        .await?;
                }
            }
            tracing::info!(tables = app.config().tables().len(), "Tables destroyed");
        }
    }

    Ok(())
}

/// Reads the table file, layers the CLI overrides on top and validates the result.
fn load_application(cli: &Cli) -> Result<Application> {
    let json = std::fs::read_to_string(&cli.tables)
        .with_context(|| format!("Failed to read {}", cli.tables.display()))?;
    let tables = TableDescriptor::list_from_json(&json)
        .with_context(|| format!("Invalid table descriptors in {}", cli.tables.display()))?;

    let mut settings = Settings::new().with_tables(tables);
    if let Some(region) = &cli.region {
        settings = settings.with_region(region);
    }
    if cli.local {
        settings = settings.with_enable_local(true);
    }

    Ok(Application::from_settings(
        "dynamo-registry",
        settings,
        &Environment::process(),
    )?)
}
