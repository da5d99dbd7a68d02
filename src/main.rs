use smartqr::configuration::get_config;
use smartqr::startup::Application;
use smartqr::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("smartqr".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_config()?;
    let application = Application::build(config).await?;
    tracing::info!(port = application.port(), "Smart QR service listening");
    application.run_until_stopped().await
}
