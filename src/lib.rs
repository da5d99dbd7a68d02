pub mod configuration;
pub mod domain;
pub mod downloader;
pub mod qr_image;
pub mod routes;
pub mod startup;
pub mod telemetry;
