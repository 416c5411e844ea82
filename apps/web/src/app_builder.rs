//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{OtpState, health_check, send_otp},
    usecase::notification::OtpDispatcher,
};

/// ルーターを構築する
pub fn build_app(dispatcher: Arc<OtpDispatcher>) -> Router {
    let otp_state = Arc::new(OtpState { dispatcher });

    Router::new()
        .route("/health", get(health_check))
        .route("/internal/otp/{purpose}", post(send_otp))
        .with_state(otp_state)
        .layer(TraceLayer::new_for_http())
}
