//! # ユースケース層
//!
//! - [`notification`] - OTP メールの生成と送信

pub mod notification;
