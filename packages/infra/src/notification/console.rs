//! コンソール通知送信実装
//!
//! メールを実際に送信せず、宛先・件名・OTP をログと標準出力に書き出す。
//! 開発モード（API キー未設定）で使用する。プロバイダなしで OTP フローを試せる。

use std::io::{self, Write};

use async_trait::async_trait;
use tmes_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// コンソール通知送信（ログ出力のみ）
///
/// 失敗しない。標準出力への書き込みに失敗しても警告ログを出すのみ。
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotificationSender;

impl ConsoleNotificationSender {
    /// 宛先・件名・OTP をログに出し、OTP があれば `out` にバナーを書き出す
    pub fn echo(&self, email: &EmailMessage, out: &mut impl Write) {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            otp_code = email.otp_code.as_deref(),
            "開発モード: メール送信をスキップ"
        );

        let Some(banner) = Self::banner(email) else {
            return;
        };
        if let Err(e) = writeln!(out, "{banner}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "開発モード: OTP バナーの出力に失敗");
        }
    }

    /// 標準出力に表示する OTP バナー
    pub fn banner(email: &EmailMessage) -> Option<String> {
        let otp_code = email.otp_code.as_deref()?;
        let rule = "=".repeat(50);
        Some(format!(
            "\n{rule}\n[DEV MODE] OTP for {}: {otp_code}\n{rule}\n",
            email.to
        ))
    }
}

#[async_trait]
impl NotificationSender for ConsoleNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.echo(email, &mut io::stdout().lock());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 常に書き込みに失敗する Writer（切断されたパイプ相当）
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn make_email(otp_code: Option<&str>) -> EmailMessage {
        EmailMessage {
            to:        "a@b.com".to_string(),
            subject:   "Verify Your Email - TMES IIT Kharagpur".to_string(),
            html_body: "<p>テスト</p>".to_string(),
            otp_code:  otp_code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let sender = ConsoleNotificationSender;

        assert!(sender.send_email(&make_email(Some("482913"))).await.is_ok());
        assert!(sender.send_email(&make_email(None)).await.is_ok());
    }

    #[test]
    fn echoはバナーを書き出す() {
        let mut out = Vec::new();

        ConsoleNotificationSender.echo(&make_email(Some("482913")), &mut out);

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("[DEV MODE] OTP for a@b.com: 482913"));
    }

    #[test]
    fn 書き込み先が壊れていてもechoはパニックしない() {
        ConsoleNotificationSender.echo(&make_email(Some("482913")), &mut BrokenPipe);
    }

    #[test]
    fn otpがない場合はバナーを出さない() {
        let mut out = Vec::new();

        ConsoleNotificationSender.echo(&make_email(None), &mut out);

        assert!(out.is_empty());
        assert!(ConsoleNotificationSender::banner(&make_email(None)).is_none());
    }
}
