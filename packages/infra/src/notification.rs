//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: Brevo（Live モード）、コンソール（開発モード）
//! - **失敗はログに出さない**: 送信側はエラーを返すのみで、ログ出力は呼び出し元が 1 回だけ行う

mod brevo;
mod console;

use async_trait::async_trait;
pub use brevo::{BREVO_DEFAULT_BASE_URL, BrevoNotificationSender, Sender};
pub use console::ConsoleNotificationSender;
use tmes_domain::notification::{EmailMessage, NotificationError};

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
