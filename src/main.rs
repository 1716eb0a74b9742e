use anyhow::Context;
use roster_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load roster settings")?;
    roster_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "roster-app bootstrap starting"
    );

    let app = roster_app::boot(settings).await?;

    tracing::info!("roster-app bootstrap complete");
    app.serve().await
}
