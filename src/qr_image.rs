use crate::domain::RenderOptions;
use base64::{Engine as _, engine::general_purpose};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Encode(#[from] qrcode::types::QrError),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Turns accepted text into a styled QR image.
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    border: u32,
    logo_ratio: f32,
}

impl QrRenderer {
    pub fn new(border: u32, logo_ratio: f32) -> Self {
        Self { border, logo_ratio }
    }

    pub fn render(
        &self,
        data: &str,
        options: &RenderOptions,
        logo: Option<&DynamicImage>,
    ) -> Result<RgbaImage, RenderError> {
        let code = QrCode::with_error_correction_level(data, options.ec_level.into())?;

        let mut canvas = self.paint(&code, options);

        if let Some(logo) = logo {
            self.place_logo(&mut canvas, logo);
        }

        Ok(canvas)
    }

    fn paint(&self, code: &QrCode, options: &RenderOptions) -> RgbaImage {
        let module_sz = options.module_size.value();
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let qz_sz = self.border * module_sz;
        let qr_sz = modules * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let dark = options.foreground.rgba();
        let light = options.background.rgba();

        let mut canvas = RgbaImage::from_pixel(total_sz, total_sz, light);
        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                continue;
            }
            let c = ((x - qz_sz) / module_sz) as usize;
            let r = ((y - qz_sz) / module_sz) as usize;
            if colors[r * modules as usize + c] == qrcode::Color::Dark {
                *pixel = dark;
            }
        }

        canvas
    }

    fn place_logo(&self, canvas: &mut RgbaImage, logo: &DynamicImage) {
        let (qr_w, qr_h) = canvas.dimensions();
        let max_logo = (qr_w.min(qr_h) as f32 * self.logo_ratio) as u32;
        if max_logo == 0 {
            return;
        }

        let logo = logo.to_rgba8();
        let (w, h) = fit_within(logo.dimensions(), max_logo);
        let logo = if (w, h) == logo.dimensions() {
            logo
        } else {
            imageops::resize(&logo, w, h, FilterType::Lanczos3)
        };

        let x = (qr_w - logo.width()) / 2;
        let y = (qr_h - logo.height()) / 2;
        imageops::overlay(canvas, &logo, i64::from(x), i64::from(y));
    }
}

// Shrinks (never enlarges) to fit a max x max box, keeping the aspect ratio.
fn fit_within((w, h): (u32, u32), max: u32) -> (u32, u32) {
    if w <= max && h <= max {
        return (w, h);
    }
    let scale = (max as f64 / w as f64).min(max as f64 / h as f64);
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max);
    (scaled(w), scaled(h))
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn to_base64_png(img: &RgbaImage) -> Result<String, RenderError> {
    let bytes = encode_png(img)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
