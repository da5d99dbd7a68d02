use crate::helpers::{logo_part, spawn_app};
use base64::{Engine as _, engine::general_purpose};
use reqwest::multipart::Form;

fn decode_image(body: &serde_json::Value) -> image::DynamicImage {
    let b64 = body["image_b64"].as_str().expect("Missing image_b64");
    let bytes = general_purpose::STANDARD
        .decode(b64)
        .expect("image_b64 is not base64");
    image::load_from_memory(&bytes).expect("image_b64 is not a decodable image")
}

#[tokio::test]
async fn plain_text_returns_a_png() {
    let app = spawn_app().await;

    let body = app.generate_text("hello world").await;

    assert_eq!(body["ok"], true);
    assert!(body.get("message").is_none());
    let img = decode_image(&body);
    // version 1 symbol, border 4, default box size 10
    assert_eq!(img.width(), (21 + 8) * 10);
}

#[tokio::test]
async fn rejected_submissions_return_the_reason() {
    let app = spawn_app().await;

    let cases = [
        ("", "Input is empty."),
        ("   ", "Input is empty."),
        ("ftp://example.com/x", "Only http/https links are allowed."),
        ("http://localhost/path", "Local/loopback links are not allowed."),
        ("http://127.0.0.1/path", "Local/loopback links are not allowed."),
        ("https://example.com/hack", "URL failed the safety scan."),
        ("this contains malware stuff", "Text failed the safety scan."),
    ];

    for (data, reason) in cases {
        let body = app.generate_text(data).await;
        assert_eq!(body["ok"], false, "{data:?} should be rejected");
        assert_eq!(body["message"], reason, "wrong reason for {data:?}");
        assert!(body.get("image_b64").is_none());
    }
}

#[tokio::test]
async fn missing_data_field_is_treated_as_empty() {
    let app = spawn_app().await;

    let response = app.post_generate(Form::new().text("fg", "#000000")).await;
    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Input is empty.");
}

#[tokio::test]
async fn rendering_options_are_applied() {
    let app = spawn_app().await;

    let form = Form::new()
        .text("data", "https://example.com/page")
        .text("fg", "#ff0000")
        .text("bg", "#00ff00")
        .text("box_size", "8")
        .text("ecc", "H");
    let body: serde_json::Value = app.post_generate(form).await.json().await.unwrap();

    assert_eq!(body["ok"], true);
    let img = decode_image(&body).to_rgba8();
    assert_eq!(img.width() % 8, 0);
    assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(32, 32).0, [255, 0, 0, 255]);
}

#[tokio::test]
async fn invalid_colour_is_reported_without_an_image() {
    let app = spawn_app().await;

    let form = Form::new().text("data", "hello").text("fg", "not-a-colour");
    let body: serde_json::Value = app.post_generate(form).await.json().await.unwrap();

    assert_eq!(body["ok"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid color"));
}

#[tokio::test]
async fn unreadable_logo_is_rejected() {
    let app = spawn_app().await;

    let form = Form::new()
        .text("data", "hello")
        .part("logo", logo_part(b"definitely not an image".to_vec(), "logo.png"));
    let body: serde_json::Value = app.post_generate(form).await.json().await.unwrap();

    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Logo image could not be read.");
}

#[tokio::test]
async fn logo_without_filename_is_ignored() {
    let app = spawn_app().await;

    let form = Form::new()
        .text("data", "hello")
        .part("logo", logo_part(Vec::new(), ""));
    let body: serde_json::Value = app.post_generate(form).await.json().await.unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn valid_logo_is_composited_in_the_centre() {
    let app = spawn_app().await;

    let logo = image::RgbaImage::from_pixel(40, 40, image::Rgba([0, 0, 255, 255]));
    let mut png = Vec::new();
    logo.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let form = Form::new()
        .text("data", "hello")
        .part("logo", logo_part(png, "logo.png"));
    let body: serde_json::Value = app.post_generate(form).await.json().await.unwrap();

    assert_eq!(body["ok"], true);
    let img = decode_image(&body).to_rgba8();
    let (w, h) = img.dimensions();
    assert_eq!(img.get_pixel(w / 2, h / 2).0, [0, 0, 255, 255]);
}

#[tokio::test]
async fn oversized_logo_gets_a_json_failure() {
    let app = spawn_app().await;

    // base.yaml caps uploads at 2 MiB
    let form = Form::new()
        .text("data", "hello")
        .part("logo", logo_part(vec![0u8; 3 * 1024 * 1024], "logo.png"));
    let response = app.post_generate(form).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Response was not JSON");
    assert_eq!(body["ok"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Upload could not be read"),
        "unexpected message: {}",
        body["message"]
    );
}

#[tokio::test]
async fn non_multipart_body_gets_a_json_failure() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/api/generate", &app.address))
        .header("Content-Type", "application/json")
        .body(r#"{"data": "hello"}"#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Response was not JSON");
    assert_eq!(body["ok"], false);
}
