//! # HTTP ハンドラ
//!
//! - [`health`] - ヘルスチェック
//! - [`otp`] - OTP メール送信（内部 API）

pub mod health;
pub mod otp;

pub use health::health_check;
pub use otp::{OtpState, SendOtpRequest, send_otp};
