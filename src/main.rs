use anyhow::Context;
use catalog_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        addr = %settings.server.bind_addr(),
        seed = settings.catalog.seed,
        "catalog-app bootstrap starting"
    );

    catalog_app::run(settings).await
}
