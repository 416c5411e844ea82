//! # 通知
//!
//! OTP メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`OtpPurpose`] | 送信目的 | メール確認、ログイン、パスワードリセットの 3 種類 |
//! | [`EmailMessage`] | 送信リクエスト | 呼び出しごとに生成され、永続化しない |
//! | [`DispatchOutcome`] | 送信結果 | 成功フラグとメッセージのペア |
//! | [`SendingMode`] | 送信モード | 呼び出しごとに設定から導出する（キャッシュしない） |
//!
//! ## 設計方針
//!
//! - **送信結果は値で返す**: 呼び出し元は `success` フラグのみで分岐する
//! - **失敗の 2 分類**: プロバイダによる拒否と、それ以外の送信経路の失敗

use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

/// API キー未設定を表すプレースホルダ値
///
/// `.env.example` からコピーしたままの値を未設定として扱う。
pub const PLACEHOLDER_API_KEY: &str = "your-brevo-api-key-here";

/// 開発モード送信時の結果メッセージ
pub const DEV_MODE_MESSAGE: &str = "sent (dev mode)";

/// プロバイダ受理時の結果メッセージ
pub const SENT_MESSAGE: &str = "sent successfully";

/// OTP の有効期間の表記（メール本文に記載するのみで、有効期限は管理しない）
pub const OTP_VALIDITY_TEXT: &str = "10 minutes";

/// 件名の末尾に付与する組織名
const SUBJECT_SUFFIX: &str = "TMES IIT Kharagpur";

/// 通知送信エラー
///
/// どちらのバリアントも呼び出し元には `success = false` として伝わる。
/// 区別するのはサーバー側のログのみ。
#[derive(Debug, Error)]
pub enum NotificationError {
    /// プロバイダがリクエストを拒否した（不正な宛先、クォータ超過、認証失敗など）
    #[error("Provider API Error: {0}")]
    ProviderRejected(String),

    /// ネットワーク障害、レスポンス不正など、拒否以外の失敗
    #[error("Email Error: {0}")]
    Transport(String),
}

/// 送信目的
///
/// 件名と本文中の案内文を決定する。
/// 文字列表現は `verification` / `login` / `reset`。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum OtpPurpose {
    /// サインアップ時のメールアドレス確認
    #[strum(serialize = "verification")]
    Verification,
    /// ログイン時の二要素認証
    #[strum(serialize = "login")]
    Login,
    /// パスワードリセット
    #[strum(serialize = "reset")]
    PasswordReset,
}

impl OtpPurpose {
    /// 件名を返す
    pub fn subject(self) -> String {
        let title = match self {
            Self::Verification => "Verify Your Email",
            Self::Login => "Login Verification",
            Self::PasswordReset => "Password Reset",
        };
        format!("{title} - {SUBJECT_SUFFIX}")
    }

    /// 本文の案内文（「Please use the following OTP to ...」に続く句）を返す
    pub fn action_phrase(self) -> &'static str {
        match self {
            Self::Verification => "verify your email address",
            Self::Login => "complete your login",
            Self::PasswordReset => "reset your password",
        }
    }

    /// 文字列キーから案内文を解決する
    ///
    /// 未知のキーはエラーにせず、汎用の案内文にフォールバックする。
    pub fn action_phrase_for_key(key: &str) -> &'static str {
        key.parse::<Self>()
            .map(Self::action_phrase)
            .unwrap_or(GENERIC_ACTION_PHRASE)
    }
}

/// 未知の送信目的に対する案内文
pub const GENERIC_ACTION_PHRASE: &str = "complete your request";

/// 送信モード
///
/// 送信のたびに現在の設定から導出する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SendingMode {
    /// 送信せず、内容をログに出力するのみ
    Development,
    /// 外部プロバイダに送信する
    Live,
}

impl SendingMode {
    /// API キーから送信モードを決定する
    pub fn from_api_key(api_key: &str) -> Self {
        if is_development_mode(api_key) {
            Self::Development
        } else {
            Self::Live
        }
    }
}

/// API キーが未設定（空またはプレースホルダ）かを判定する
///
/// プレースホルダとの比較はこの関数にのみ置く。
/// 未設定を `Option` で表現する方式に切り替える場合もここだけを変更する。
pub fn is_development_mode(api_key: &str) -> bool {
    api_key.is_empty() || api_key == PLACEHOLDER_API_KEY
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。`NotificationSender` に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// OTP（開発モードでのログ出力専用。送信内容には使わない）
    pub otp_code:  Option<String>,
}

/// 送信結果
///
/// Live モードでの `success = true` はプロバイダが受理したことのみを意味し、
/// 配信を保証しない。開発モードでの `success = true` はログ出力のみを意味する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub message: String,
}

impl DispatchOutcome {
    /// 開発モードでの送信結果
    pub fn dev_mode() -> Self {
        Self {
            success: true,
            message: DEV_MODE_MESSAGE.to_string(),
        }
    }

    /// プロバイダが受理した送信結果
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
        }
    }

    /// 失敗した送信結果
    pub fn failed(error: &NotificationError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }
}
