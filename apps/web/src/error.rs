//! # Web サーバーのエラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//! メール送信の失敗はここに含めない（`DispatchOutcome` として返す）。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// Web サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 未知の送信目的
    #[error("未知の送信目的です: {0}")]
    UnknownPurpose(String),

    /// 不正なリクエスト
    #[error("不正なリクエストです: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, title) = match &self {
            ApiError::UnknownPurpose(_) => (
                StatusCode::BAD_REQUEST,
                "https://tmes.in/errors/unknown-purpose",
                "Unknown Purpose",
            ),
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                "https://tmes.in/errors/bad-request",
                "Bad Request",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title:      title.to_string(),
                status:     status.as_u16(),
                detail:     self.to_string(),
            }),
        )
            .into_response()
    }
}
