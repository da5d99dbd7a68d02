use crate::configuration::Configuration;
use crate::qr_image::QrRenderer;
use crate::routes::{generate_qr, health_check, upload_error_handler};
use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Configuration) -> Result<Self, anyhow::Error> {
        let renderer = QrRenderer::new(config.qr.border, config.qr.logo_ratio);

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| "Failed to bind TCP listener for application")?;
        let port = listener
            .local_addr()
            .with_context(|| "Failed to read local address of TCP listener")?
            .port();
        let server = run(listener, renderer, config.application.max_upload_bytes)
            .context("Failed to run Actix web server")?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.server.await.context("Server stopped with an error")
    }
}

fn run(
    tcp_listener: TcpListener,
    renderer: QrRenderer,
    max_upload_bytes: usize,
) -> Result<Server, anyhow::Error> {
    let renderer = web::Data::new(renderer);
    let multipart_config = MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
        .error_handler(upload_error_handler);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .app_data(renderer.clone())
            .app_data(multipart_config.clone())
    })
    .listen(tcp_listener)
    .with_context(|| "Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .service(web::scope("/api").route("/generate", web::post().to(generate_qr)));
}
