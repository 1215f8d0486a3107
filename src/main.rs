use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{Settings, StoreBackend};
use database::{connect, run_migrations, seed_default_categories, DbRepository};
use std::path::PathBuf;

/// The main entry point for the trivia API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            args.apply(&mut settings);
            settings.validate()?;
            web_server::run_server(&settings).await?;
        }
        Commands::Migrate => {
            let pool = connect(&settings.database).await?;
            run_migrations(&pool).await?;
            tracing::info!("Migrations applied.");
        }
        Commands::Seed => {
            let pool = connect(&settings.database).await?;
            run_migrations(&pool).await?;
            let inserted = seed_default_categories(&DbRepository::new(pool)).await?;
            tracing::info!(inserted, "Seeding finished.");
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A REST API for trivia questions, categories and quizzes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        global = true,
        env = "TRIVIA_CONFIG",
        default_value = configuration::DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    /// Defaults to `serve`.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
    /// Insert the default categories into an empty database.
    Seed,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Which store to serve from (overrides the config file).
    #[arg(long, value_enum)]
    backend: Option<StoreBackend>,
}

impl ServeArgs {
    /// CLI flags win over the file and the environment.
    fn apply(self, settings: &mut Settings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(backend) = self.backend {
            settings.database.backend = backend;
        }
    }
}
