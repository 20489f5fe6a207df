use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode, Uri},
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use serde_json::{Value, json};
use test_context::{AsyncTestContext, test_context};
use tokio::net::TcpListener;

use crate::{
    application::http::server::http_server::{router, state},
    args::Args,
};

const MAX_UPLOAD_SIZE: usize = 4096;

const TWO_DISHES: &str = r#"{
  "is_menu": true,
  "dishes": [
    {
      "original_name": "Pad Thai",
      "translated_name": "Stir-fried rice noodles",
      "description": "Rice noodles with shrimp, egg and peanuts",
      "spiciness": 2,
      "sweetness": 3,
      "ingredients": ["rice noodles", "shrimp", "egg"],
      "allergens": ["shellfish", "egg", "peanuts"],
      "category": "main",
      "price_range": "$$"
    },
    {
      "original_name": "Tom Yum Goong",
      "translated_name": "Hot and sour shrimp soup",
      "description": "Lemongrass broth with shrimp",
      "spiciness": 4,
      "sweetness": 1,
      "ingredients": ["shrimp", "lemongrass"],
      "allergens": [],
      "category": "appetizer",
      "price_range": "$$$"
    }
  ]
}"#;

#[derive(Clone)]
struct VendorReply {
    status: StatusCode,
    text: String,
}

#[derive(Clone)]
struct FakeVendor {
    calls: Arc<AtomicUsize>,
    reply: Arc<Mutex<VendorReply>>,
}

impl FakeVendor {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, status: StatusCode, text: &str) {
        *self.reply.lock().unwrap() = VendorReply {
            status,
            text: text.to_string(),
        };
    }
}

/// Wraps the configured answer in the envelope of whichever vendor was called.
async fn vendor_endpoint(State(vendor): State<FakeVendor>, uri: Uri) -> (StatusCode, Json<Value>) {
    vendor.calls.fetch_add(1, Ordering::SeqCst);
    let reply = vendor.reply.lock().unwrap().clone();

    if !reply.status.is_success() {
        return (reply.status, Json(json!({"error": {"message": reply.text}})));
    }

    let path = uri.path();
    let body = if path.ends_with("/v1/messages") {
        json!({"content": [{"type": "text", "text": reply.text}]})
    } else if path.ends_with("/v1/chat/completions") {
        json!({"choices": [{"message": {"role": "assistant", "content": reply.text}}]})
    } else if path.ends_with(":generateContent") {
        json!({"candidates": [{"content": {"parts": [{"text": reply.text}]}}]})
    } else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": path})));
    };

    (StatusCode::OK, Json(body))
}

struct ApiContext {
    server: TestServer,
    vendor: FakeVendor,
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        let vendor = FakeVendor {
            calls: Arc::new(AtomicUsize::new(0)),
            reply: Arc::new(Mutex::new(VendorReply {
                status: StatusCode::OK,
                text: TWO_DISHES.to_string(),
            })),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let vendor_url = format!("http://{}", listener.local_addr().unwrap());
        let vendor_app = Router::new()
            .fallback(vendor_endpoint)
            .with_state(vendor.clone());
        tokio::spawn(async move { axum::serve(listener, vendor_app).await.unwrap() });

        let max_upload_size = MAX_UPLOAD_SIZE.to_string();
        let args = Args::parse_from([
            "menujudge",
            "--ai-provider",
            "claude",
            "--max-upload-size",
            max_upload_size.as_str(),
            "--anthropic-base-url",
            vendor_url.as_str(),
            "--openai-base-url",
            vendor_url.as_str(),
            "--gemini-base-url",
            vendor_url.as_str(),
            "--llm-timeout-secs",
            "5",
        ]);

        let app = router(state(Arc::new(args)).unwrap()).unwrap();

        Self {
            server: TestServer::new(app).unwrap(),
            vendor,
        }
    }
}

fn png_bytes(len: usize) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.resize(len, 0);
    data
}

fn image_form(filename: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(data).file_name(filename).mime_type(mime),
    )
}

fn header(name: &'static str, value: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static(name), HeaderValue::from_static(value))
}

async fn analyze(
    server: &TestServer,
    headers: &[(&'static str, &'static str)],
    form: MultipartForm,
) -> axum_test::TestResponse {
    let mut request = server.post("/api/analyze");
    for &(name, value) in headers {
        let (name, value) = header(name, value);
        request = request.add_header(name, value);
    }
    request.multipart(form).await
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_health(ctx: &mut ApiContext) {
    let response = ctx.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"status": "healthy"}));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_index_page_is_served(ctx: &mut ApiContext) {
    let response = ctx.server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Menu Judge"));
    assert!(html.contains("localStorage"));
    assert!(html.contains("X-API-Key"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_openapi_document(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let doc = response.json::<Value>();
    assert!(doc["paths"]["/api/analyze"]["post"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_providers(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api/providers").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "default": "claude",
            "providers": ["claude", "openai", "gemini"],
            "max_upload_size": MAX_UPLOAD_SIZE
        })
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_index_page_reads_upload_limit_from_providers(ctx: &mut ApiContext) {
    let html = ctx.server.get("/").await.text();
    assert!(html.contains("/api/providers"));
    assert!(html.contains("max_upload_size"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_metrics_endpoint(ctx: &mut ApiContext) {
    ctx.server.get("/health").await;

    let response = ctx.server.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("axum_http_requests"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_success(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "claude");
    assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
    assert!(body["processing_time"].as_f64().unwrap() >= 0.0);
    assert!(body["analysis_id"].is_string());

    let dishes = body["dishes"].as_array().unwrap();
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0]["original_name"], "Pad Thai");
    assert_eq!(dishes[0]["spiciness"], 2);
    assert_eq!(dishes[0]["category"], "main");
    assert_eq!(dishes[0]["price_range"], "$$");
    assert_eq!(dishes[1]["allergens"], json!([]));
    assert_eq!(ctx.vendor.calls(), 1);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_bearer_credential_is_accepted(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("authorization", "Bearer sk-test")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(ctx.vendor.calls(), 1);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_missing_api_key(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("x-error-code"), "NO_API_KEY");
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NO_API_KEY");
    assert_eq!(ctx.vendor.calls(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_oversized_upload_makes_no_provider_call(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(MAX_UPLOAD_SIZE + 1)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["code"], "FILE_TOO_LARGE");
    assert_eq!(ctx.vendor.calls(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_body_over_transport_limit_is_file_too_large(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(MAX_UPLOAD_SIZE + 2 * 1024 * 1024)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["code"], "FILE_TOO_LARGE");
    assert_eq!(ctx.vendor.calls(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_disallowed_content_type_makes_no_provider_call(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.gif", "image/gif", b"GIF89a\x01\x00\x01\x00".to_vec()),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "INVALID_FILE");
    assert_eq!(
        body["error"],
        "File type not allowed. Allowed types: png, jpg, jpeg, webp"
    );
    assert_eq!(ctx.vendor.calls(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_missing_image_field(ctx: &mut ApiContext) {
    let form = MultipartForm::new().add_text("note", "no file here");
    let response = analyze(&ctx.server, &[("x-api-key", "sk-test")], form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "NO_FILE");
    assert_eq!(body["error"], "No image file provided");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_unknown_provider(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test"), ("x-ai-provider", "mistral")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "UNKNOWN_PROVIDER");
    assert_eq!(ctx.vendor.calls(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_switching_provider_yields_identical_dishes(ctx: &mut ApiContext) {
    let mut dish_lists = Vec::new();
    for provider in ["claude", "openai", "gemini"] {
        let response = ctx
            .server
            .post("/api/analyze")
            .add_header(
                HeaderName::from_static("x-api-key"),
                HeaderValue::from_static("sk-test"),
            )
            .add_header(
                HeaderName::from_static("x-ai-provider"),
                HeaderValue::from_static(provider),
            )
            .multipart(image_form("menu.png", "image/png", png_bytes(64)))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["provider"], provider);
        dish_lists.push(body["dishes"].clone());
    }

    assert_eq!(ctx.vendor.calls(), 3);
    assert_eq!(dish_lists[0].as_array().unwrap().len(), 2);
    assert_eq!(dish_lists[0], dish_lists[1]);
    assert_eq!(dish_lists[1], dish_lists[2]);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_malformed_provider_answer(ctx: &mut ApiContext) {
    ctx.vendor.answer(StatusCode::OK, "Sorry, I cannot help with that.");

    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "AI_ERROR");
    assert!(body["error"].as_str().unwrap().starts_with("AI analysis failed:"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_empty_provider_answer(ctx: &mut ApiContext) {
    ctx.vendor.answer(StatusCode::OK, r#"{"dishes": []}"#);

    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "AI_ERROR");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_not_a_menu(ctx: &mut ApiContext) {
    ctx.vendor
        .answer(StatusCode::OK, r#"{"is_menu": false, "dishes": []}"#);

    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_MENU_IMAGE");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_rejected_credential(ctx: &mut ApiContext) {
    ctx.vendor.answer(StatusCode::UNAUTHORIZED, "invalid x-api-key");

    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-wrong")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "INVALID_API_KEY");
    assert_eq!(ctx.vendor.calls(), 1);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_htmx_success_renders_cards(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("x-api-key", "sk-test"), ("hx-request", "true")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert_eq!(html.matches("dish-card").count(), 2);
    assert!(html.contains("Stir-fried rice noodles"));
    assert!(html.contains("⚠️ Allergens: shellfish, egg, peanuts"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_htmx_error_renders_partial(ctx: &mut ApiContext) {
    let response = analyze(
        &ctx.server,
        &[("hx-request", "true")],
        image_form("menu.png", "image/png", png_bytes(64)),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("x-error-code"), "NO_API_KEY");
    let html = response.text();
    assert!(html.contains(r#"id="error-message""#));
    assert!(html.contains("Error code: NO_API_KEY"));
}
