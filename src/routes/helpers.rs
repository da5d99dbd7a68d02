use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// Body shape the generator page reads: `ok` plus either a message or an image.
#[derive(Serialize, Debug)]
pub struct GenerateResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_b64: Option<String>,
}

pub fn build_failure_response(status_code: StatusCode, message: String) -> HttpResponse {
    let body = GenerateResponse {
        ok: false,
        message: Some(message),
        image_b64: None,
    };
    HttpResponse::build(status_code).json(body)
}

pub fn build_image_response(image_b64: String) -> HttpResponse {
    let body = GenerateResponse {
        ok: true,
        message: None,
        image_b64: Some(image_b64),
    };
    HttpResponse::Ok().json(body)
}

pub fn error_chain_fmt(
    e: &(dyn std::error::Error),
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}")?;

    let mut current = e.source();
    while let Some(cause) = current {
        // `{:#?}` prints causes with Debug, `{:?}` with Display
        if f.alternate() {
            writeln!(f, "Caused by:\n\t{cause:?}")?;
        } else {
            writeln!(f, "Caused by:\n\t{cause}")?;
        }
        current = cause.source();
    }
    Ok(())
}
