//! # テスト用モック送信
//!
//! ユースケーステストで使用するインメモリの送信実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tmes-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tmes_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

/// モック送信で返す失敗の種類
#[derive(Debug, Clone)]
pub enum MockFailure {
    ProviderRejected(String),
    Transport(String),
}

// ===== MockNotificationSender =====

/// 送信されたメールを記録するモック
///
/// `failing_with` で作成すると、記録した上で指定のエラーを返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<MockFailure>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(failure: MockFailure) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: Some(failure),
        }
    }

    /// 送信されたメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());

        match &self.failure {
            None => Ok(()),
            Some(MockFailure::ProviderRejected(detail)) => {
                Err(NotificationError::ProviderRejected(detail.clone()))
            }
            Some(MockFailure::Transport(detail)) => Err(NotificationError::Transport(detail.clone())),
        }
    }
}
