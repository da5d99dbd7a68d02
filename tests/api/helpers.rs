use reqwest::multipart::{Form, Part};
use smartqr::configuration::get_config;
use smartqr::startup::Application;
use smartqr::telemetry;
use std::sync::OnceLock;

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let default_filter_level = "info".to_string();
        let subscriber_name = "test".to_string();

        if std::env::var("TEST_LOG").is_ok() {
            let subscriber =
                telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
            telemetry::init_subscriber(subscriber);
        } else {
            let subscriber =
                telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
            telemetry::init_subscriber(subscriber);
        };
    });
}

pub async fn spawn_app() -> TestApp {
    init_tracing();

    let configuration = {
        let mut c = get_config().expect("Failed to read configuration.");
        c.application.host = "127.0.0.1".to_string();
        c.application.port = 0;
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        api_client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub async fn post_generate(&self, form: Form) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/generate", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn generate_text(&self, data: &str) -> serde_json::Value {
        let response = self.post_generate(Form::new().text("data", data.to_string())).await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Response was not JSON")
    }
}

pub fn logo_part(bytes: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("image/png")
        .expect("Invalid mime type")
}
