//! # 通知ユースケース
//!
//! サインアップ・ログイン・パスワードリセットの各フローから呼ばれる OTP メール送信。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - OTP メールの HTML 生成
//! - [`dispatcher`] - 送信モードの判定、送信、結果の変換

pub mod dispatcher;
pub mod template_renderer;

pub use dispatcher::OtpDispatcher;
pub use template_renderer::{render_otp_template, render_otp_template_for_key};
