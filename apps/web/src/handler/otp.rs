//! # OTP 送信ハンドラ
//!
//! サインアップ・ログイン・パスワードリセットの各フローが OTP メールを送るための内部 API。
//!
//! ```text
//! POST /internal/otp/{purpose}    purpose = verification | login | reset
//! ```
//!
//! 送信に失敗しても `200` で `{"success": false, "message": "..."}` を返す。
//! 呼び出し元は `success` のみで分岐する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tmes_domain::notification::{DispatchOutcome, OtpPurpose};

use crate::{error::ApiError, usecase::notification::OtpDispatcher};

/// OTP ハンドラの State
pub struct OtpState {
    pub dispatcher: Arc<OtpDispatcher>,
}

/// OTP 送信リクエスト
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email:    String,
    pub otp_code: String,
}

/// OTP メールを送信する
pub async fn send_otp(
    State(state): State<Arc<OtpState>>,
    Path(purpose): Path<String>,
    Json(request): Json<SendOtpRequest>,
) -> Result<Json<DispatchOutcome>, ApiError> {
    let purpose = purpose
        .parse::<OtpPurpose>()
        .map_err(|_| ApiError::UnknownPurpose(purpose))?;

    if request.email.trim().is_empty() {
        return Err(ApiError::BadRequest("email は必須です".to_string()));
    }
    if request.otp_code.is_empty() {
        return Err(ApiError::BadRequest("otp_code は必須です".to_string()));
    }

    let dispatcher = &state.dispatcher;
    let outcome = match purpose {
        OtpPurpose::Verification => {
            dispatcher
                .send_verification_email(&request.email, &request.otp_code)
                .await
        }
        OtpPurpose::Login => {
            dispatcher
                .send_login_otp(&request.email, &request.otp_code)
                .await
        }
        OtpPurpose::PasswordReset => {
            dispatcher
                .send_password_reset_email(&request.email, &request.otp_code)
                .await
        }
    };

    Ok(Json(outcome))
}
