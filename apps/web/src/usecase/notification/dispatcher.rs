//! # OTP 送信ディスパッチャ
//!
//! 送信目的ごとの件名・本文を組み立て、送信モードに応じて送信する。
//!
//! ## 設計方針
//!
//! - **エラーを返さない**: すべての失敗は [`DispatchOutcome`] に変換する。
//!   呼び出し元は `success` フラグのみで分岐する
//! - **送信モードは毎回解決する**: 設定は呼び出しごとに読み直す
//! - **失敗ログは 1 回だけ**: 送信実装はログを出さず、ここで 1 回出力する
//! - **開発モードは必ず成功する**: ネットワーク通信を行わず、内容をログに出す

use tmes_domain::notification::{
    DispatchOutcome,
    EmailMessage,
    NotificationError,
    OtpPurpose,
    SendingMode,
};
use tmes_infra::notification::{
    BrevoNotificationSender,
    ConsoleNotificationSender,
    NotificationSender,
};
use tmes_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::template_renderer::render_otp_template;
use crate::config::MailerConfig;

/// OTP 送信ディスパッチャ
///
/// `reqwest::Client` は並行利用できるため 1 つを共有する。
/// それ以外に呼び出し間で共有する可変状態は持たない。
pub struct OtpDispatcher {
    config: MailerConfig,
    client: reqwest::Client,
}

impl OtpDispatcher {
    pub fn new(config: MailerConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// サインアップ時のメールアドレス確認 OTP を送信する
    pub async fn send_verification_email(&self, email: &str, otp_code: &str) -> DispatchOutcome {
        self.send_otp(email, otp_code, OtpPurpose::Verification)
            .await
    }

    /// ログイン OTP を送信する
    pub async fn send_login_otp(&self, email: &str, otp_code: &str) -> DispatchOutcome {
        self.send_otp(email, otp_code, OtpPurpose::Login).await
    }

    /// パスワードリセット OTP を送信する
    pub async fn send_password_reset_email(&self, email: &str, otp_code: &str) -> DispatchOutcome {
        self.send_otp(email, otp_code, OtpPurpose::PasswordReset)
            .await
    }

    /// 送信目的に応じた OTP メールを送信する
    pub async fn send_otp(&self, email: &str, otp_code: &str, purpose: OtpPurpose) -> DispatchOutcome {
        let message = EmailMessage {
            to:        email.to_string(),
            subject:   purpose.subject(),
            html_body: render_otp_template(otp_code, purpose),
            otp_code:  Some(otp_code.to_string()),
        };

        self.send(&message).await
    }

    /// メールを送信する
    ///
    /// 送信モードは呼び出しごとに設定から解決する。
    pub async fn send(&self, message: &EmailMessage) -> DispatchOutcome {
        let api_key = self.config.api_key();

        match SendingMode::from_api_key(&api_key) {
            SendingMode::Development => {
                let sender: &dyn NotificationSender = &ConsoleNotificationSender;
                if let Err(e) = sender.send_email(message).await {
                    tracing::warn!(error = %e, "開発モードのコンソール出力に失敗");
                }
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_DEV_SKIPPED,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %message.to,
                    "開発モードのため通知メールを送信せず"
                );
                DispatchOutcome::dev_mode()
            }
            SendingMode::Live => {
                let sender = BrevoNotificationSender::new(
                    self.client.clone(),
                    &self.config.api_base_url(),
                    api_key,
                    self.config.sender(),
                );
                deliver(&sender, message).await
            }
        }
    }
}

/// 送信実装に渡し、結果を [`DispatchOutcome`] に変換する
pub(crate) async fn deliver(
    sender: &dyn NotificationSender,
    message: &EmailMessage,
) -> DispatchOutcome {
    match sender.send_email(message).await {
        Ok(()) => {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.result = event::result::SUCCESS,
                notification.recipient = %message.to,
                notification.subject = %message.subject,
                "通知メール送信成功"
            );
            DispatchOutcome::sent()
        }
        Err(e) => {
            let kind = match &e {
                NotificationError::ProviderRejected(_) => error::kind::PROVIDER_REJECTED,
                NotificationError::Transport(_) => error::kind::TRANSPORT,
            };
            tracing::error!(
                event.kind = "business_event",
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.result = event::result::FAILURE,
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = kind,
                notification.recipient = %message.to,
                error = %e,
                "通知メール送信失敗"
            );
            DispatchOutcome::failed(&e)
        }
    }
}
