//! Brevo 通知送信実装
//!
//! Brevo（旧 Sendinblue）のトランザクションメール API を使用してメールを送信する。
//! Live モードで使用する。
//!
//! ```text
//! POST {base_url}/v3/smtp/email
//! api-key: {api_key}
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tmes_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Brevo API のデフォルトベース URL
pub const BREVO_DEFAULT_BASE_URL: &str = "https://api.brevo.com";

/// 送信元（表示名とアドレス）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub name:  String,
    pub email: String,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

/// `POST /v3/smtp/email` のリクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTransacEmailRequest<'a> {
    sender:       &'a Sender,
    to:           [Recipient<'a>; 1],
    subject:      &'a str,
    html_content: &'a str,
}

/// 受理時のレスポンス
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendTransacEmailResponse {
    message_id: String,
}

/// エラー時のレスポンス（`{"code": "...", "message": "..."}`）
#[derive(Debug, Deserialize)]
struct BrevoErrorBody {
    code:    Option<String>,
    message: Option<String>,
}

/// Brevo 通知送信
///
/// `reqwest::Client` は共有して使い回せるため、呼び出し元から受け取る。
/// API キーと送信元は送信のたびに最新の設定から組み立てる想定。
pub struct BrevoNotificationSender {
    client:   reqwest::Client,
    base_url: String,
    api_key:  String,
    sender:   Sender,
}

impl BrevoNotificationSender {
    /// 新しい Brevo 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: HTTP クライアント
    /// - `base_url`: API のベース URL（例: `https://api.brevo.com`）
    /// - `api_key`: Brevo API キー
    /// - `sender`: 送信元の表示名とアドレス
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String, sender: Sender) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            sender,
        }
    }
}

#[async_trait]
impl NotificationSender for BrevoNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let url = format!("{}/v3/smtp/email", self.base_url);
        let request = SendTransacEmailRequest {
            sender:       &self.sender,
            to:           [Recipient { email: &email.to }],
            subject:      &email.subject,
            html_content: &email.html_body,
        };

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotificationError::Transport(format!("レスポンス読み取り失敗: {e}")))?;

        if !status.is_success() {
            return Err(NotificationError::ProviderRejected(rejection_detail(
                status, &body,
            )));
        }

        let accepted: SendTransacEmailResponse = serde_json::from_str(&body)
            .map_err(|e| NotificationError::Transport(format!("レスポンス不正: {e}")))?;

        tracing::debug!(message_id = %accepted.message_id, "Brevo がメールを受理");

        Ok(())
    }
}

/// 拒否レスポンスからエラー詳細を組み立てる
///
/// JSON でない場合は本文をそのまま使う。
fn rejection_detail(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<BrevoErrorBody>(body) {
        Ok(BrevoErrorBody {
            code,
            message: Some(message),
        }) => match code {
            Some(code) => format!("({status}) {code}: {message}"),
            None => format!("({status}) {message}"),
        },
        _ => format!("({status}) {body}"),
    }
}
