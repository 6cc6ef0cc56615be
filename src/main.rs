use anyhow::Context;
use tutorials_http::TutorialStore;
use tutorials_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load tutorials settings")?;
    tutorials_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "development backend starting"
    );

    tutorials_http::start_server(&settings.server, TutorialStore::new()).await
}
