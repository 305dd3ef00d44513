use service_core::observability::init_tracing;
use user_service::config::UserConfig;
use user_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("user-service", "info", otlp_endpoint.as_deref());

    let config = UserConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
