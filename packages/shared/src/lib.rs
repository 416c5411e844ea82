//! # TMES 共有ユーティリティ
//!
//! Web サーバーとドメイン・インフラ層で共通して使用するユーティリティ。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
