//! # TMES インフラ層
//!
//! 外部システムとの通信を担当するインフラストラクチャ層。
//!
//! ## 依存関係
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（Brevo / コンソール）
//! - `mock` - テスト用インメモリ送信（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
