use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_kernel::settings::Settings;

/// Command-line entrypoint for the roster service
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Employee and department records service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Migrate the database and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the resolved configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load roster settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            roster_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "roster serve");
            roster_app::boot(settings).await?.serve().await
        }
        Command::Migrate => {
            roster_telemetry::init(&settings.telemetry)?;
            let db = roster_db::connect(&settings.database).await?;
            let applied = roster_app::migrate(&db).await?;
            tracing::info!(applied, "migrations complete");
            db.close().await;
            Ok(())
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
