//! OTP 送信 API 統合テスト
//!
//! ルーターを `oneshot` で呼び出し、Brevo API は wiremock で代替する。
//!
//! ## テストケース
//!
//! - API キー未設定: 開発モードで成功する
//! - API キー設定済み + 受理: 件名と OTP を含む本文が Brevo に届く
//! - API キー設定済み + 拒否: プロバイダのエラー文言を含む失敗結果
//! - API キー設定済み + 接続不可: 汎用エラーの失敗結果
//! - 未知の送信目的: 400
//! - ヘルスチェック

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use tmes_web::{
    app_builder::build_app,
    config::{MailerConfig, keys},
    usecase::notification::OtpDispatcher,
};
use tower::ServiceExt;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{method, path},
};

fn make_app(config: MailerConfig) -> Router {
    build_app(Arc::new(OtpDispatcher::new(config, reqwest::Client::new())))
}

fn live_config(base_url: &str) -> MailerConfig {
    MailerConfig::isolated()
        .with_setting(keys::BREVO_API_KEY, "xkeysib-test")
        .with_setting(keys::BREVO_API_URL, base_url)
}

fn otp_request(purpose: &str, email: &str, otp_code: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/internal/otp/{purpose}"))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "email": email, "otp_code": otp_code }).to_string(),
        ))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_api_key未設定では開発モードで成功する() {
    let app = make_app(MailerConfig::isolated());

    let response = app
        .oneshot(otp_request("verification", "a@b.com", "482913"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        serde_json::json!({ "success": true, "message": "sent (dev mode)" })
    );
}

#[tokio::test]
async fn test_受理されると件名とotpがbrevoに届く() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "messageId": "<id>" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = make_app(live_config(&mock_server.uri()));

    let response = app
        .oneshot(otp_request("verification", "a@b.com", "482913"))
        .await
        .unwrap();

    assert_eq!(
        response_json(response).await,
        serde_json::json!({ "success": true, "message": "sent successfully" })
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["subject"], "Verify Your Email - TMES IIT Kharagpur");
    assert_eq!(body["to"][0]["email"], "a@b.com");
    assert_eq!(body["sender"]["email"], "noreply@tmes.in");
    assert!(body["htmlContent"].as_str().unwrap().contains("482913"));
}

#[tokio::test]
async fn test_ログインとリセットは目的ごとの件名で送信する() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "messageId": "<id>" })),
        )
        .mount(&mock_server)
        .await;
    let app = make_app(live_config(&mock_server.uri()));

    app.clone()
        .oneshot(otp_request("login", "a@b.com", "111111"))
        .await
        .unwrap();
    app.oneshot(otp_request("reset", "a@b.com", "222222"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let subjects: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["subject"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        subjects,
        vec![
            "Login Verification - TMES IIT Kharagpur".to_string(),
            "Password Reset - TMES IIT Kharagpur".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_拒否されるとプロバイダのエラー文言を含む失敗結果になる() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "invalid_parameter",
            "message": "email is not valid in to"
        })))
        .mount(&mock_server)
        .await;
    let app = make_app(live_config(&mock_server.uri()));

    let response = app
        .oneshot(otp_request("login", "not-an-email", "482913"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Provider API Error: "));
    assert!(message.contains("email is not valid in to"));
}

#[tokio::test]
async fn test_接続できない場合は汎用エラーの失敗結果になる() {
    let app = make_app(live_config("http://127.0.0.1:1"));

    let response = app
        .oneshot(otp_request("reset", "a@b.com", "482913"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().starts_with("Email Error: "));
}

#[tokio::test]
async fn test_未知の送信目的は400になる() {
    let app = make_app(MailerConfig::isolated());

    let response = app
        .oneshot(otp_request("newsletter", "a@b.com", "482913"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["title"], "Unknown Purpose");
}

#[tokio::test]
async fn test_emailが空の場合は400になる() {
    let app = make_app(MailerConfig::isolated());

    let response = app
        .oneshot(otp_request("login", " ", "482913"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ヘルスチェックはhealthyを返す() {
    let app = make_app(MailerConfig::isolated());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "healthy");
}
