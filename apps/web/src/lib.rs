//! # TMES Web サーバーライブラリ
//!
//! OTP メール送信の内部 API を提供する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `config`: サーバー・メール送信設定
//! - `error`: HTTP エラー
//! - `handler`: HTTP ハンドラ
//! - `usecase`: OTP メールの生成と送信

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
