use crate::domain::{Rejection, RenderOptions, Submission};
use crate::qr_image::{QrRenderer, RenderError, to_base64_png};
use crate::routes::{build_failure_response, build_image_response, error_chain_fmt};
use crate::telemetry::spawn_blocking_with_tracing;
use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use anyhow::Context;
use image::DynamicImage;

#[derive(thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("Upload could not be read: {0}")]
    InvalidUpload(#[source] MultipartError),

    #[error("{0}")]
    InvalidOption(String),

    #[error("Logo image could not be read.")]
    UnreadableLogo(#[source] image::ImageError),

    #[error("Failed to generate QR: {0}")]
    RenderFailed(#[from] RenderError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// The page reads `ok`/`message` from every reply, so user-facing failures
// keep a 200 status.
impl ResponseError for GenerateError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            GenerateError::Rejected(_)
            | GenerateError::InvalidUpload(_)
            | GenerateError::InvalidOption(_)
            | GenerateError::UnreadableLogo(_)
            | GenerateError::RenderFailed(_) => StatusCode::OK,
            GenerateError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        build_failure_response(status_code, self.to_string())
    }
}

/// Oversized or malformed multipart bodies get the same JSON reply shape as
/// every other failure.
pub fn upload_error_handler(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    tracing::info!(error = %err, "Rejected unreadable upload");
    GenerateError::InvalidUpload(err).into()
}

#[derive(MultipartForm)]
pub struct GenerateForm {
    data: Option<Text<String>>,
    fg: Option<Text<String>>,
    bg: Option<Text<String>>,
    box_size: Option<Text<String>>,
    ecc: Option<Text<String>>,
    logo: Option<Bytes>,
}

fn field(value: Option<Text<String>>, default: &str) -> String {
    value
        .map(Text::into_inner)
        .unwrap_or_else(|| default.to_string())
}

#[tracing::instrument(
    name = "Generating a QR code",
    skip_all,
    fields(shape = tracing::field::Empty, chars = tracing::field::Empty)
)]
pub async fn generate_qr(
    MultipartForm(form): MultipartForm<GenerateForm>,
    renderer: web::Data<QrRenderer>,
) -> Result<HttpResponse, GenerateError> {
    let submission = Submission::parse(field(form.data, "")).inspect_err(|rejection| {
        tracing::info!(reason = %rejection, "Submission rejected by eligibility scan");
    })?;

    let span = tracing::Span::current();
    span.record("shape", tracing::field::debug(submission.shape()));
    span.record("chars", submission.trimmed_len());

    let options = RenderOptions::new(
        field(form.fg, "#000000"),
        field(form.bg, "#ffffff"),
        field(form.box_size, "10"),
        &field(form.ecc, "M"),
    )
    .map_err(GenerateError::InvalidOption)?;

    let logo = match form.logo {
        Some(logo) if logo.file_name.as_deref().is_some_and(|name| !name.is_empty()) => {
            let decoded =
                image::load_from_memory(&logo.data).map_err(GenerateError::UnreadableLogo)?;
            Some(decoded)
        }
        _ => None,
    };

    let image_b64 = render(**renderer, submission, options, logo)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "QR rendering failed"))?;

    Ok(build_image_response(image_b64))
}

async fn render(
    renderer: QrRenderer,
    submission: Submission,
    options: RenderOptions,
    logo: Option<DynamicImage>,
) -> Result<String, GenerateError> {
    let image_b64 = spawn_blocking_with_tracing(move || {
        let img = renderer.render(submission.as_ref(), &options, logo.as_ref())?;
        to_base64_png(&img)
    })
    .await
    .context("Failed to join QR rendering task")??;

    Ok(image_b64)
}
