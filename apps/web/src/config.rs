//! # Web サーバー設定
//!
//! 環境変数からサーバーとメール送信の設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `APP_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `APP_PORT` | No | `5000` | ポート番号 |
//! | `APP_ENV` | No | - | `development` でデバッグモード |
//! | `BREVO_API_KEY` | No | - | 未設定またはプレースホルダで開発モード |
//! | `SENDER_NAME` | No | `TMES IIT Kharagpur` | 送信元の表示名 |
//! | `SENDER_EMAIL` | No | `noreply@tmes.in` | 送信元アドレス |
//! | `BREVO_API_URL` | No | `https://api.brevo.com` | Brevo API のベース URL |

use std::{collections::HashMap, env, fmt};

use tmes_domain::notification::{SendingMode, is_development_mode};
use tmes_infra::notification::{BREVO_DEFAULT_BASE_URL, Sender};

/// 送信元表示名のデフォルト
pub const DEFAULT_SENDER_NAME: &str = "TMES IIT Kharagpur";

/// 送信元アドレスのデフォルト
pub const DEFAULT_SENDER_EMAIL: &str = "noreply@tmes.in";

/// メール送信設定のキー
pub mod keys {
    pub const BREVO_API_KEY: &str = "BREVO_API_KEY";
    pub const SENDER_NAME: &str = "SENDER_NAME";
    pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
    pub const BREVO_API_URL: &str = "BREVO_API_URL";
}

/// Web サーバーの設定
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// バインドアドレス
    pub host:  String,
    /// ポート番号
    pub port:  u16,
    /// デバッグモード（`APP_ENV=development`）
    pub debug: bool,
}

impl WebConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("APP_PORT") {
            Ok(value) => parse_port(&value)?,
            Err(_) => 5000,
        };

        Ok(Self {
            host: env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            debug: env::var("APP_ENV").is_ok_and(|v| is_debug_env(&v)),
        })
    }
}

/// 設定読み込みエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

fn is_debug_env(value: &str) -> bool {
    value == "development"
}

/// メール送信設定
///
/// アプリケーション側で設定した値を優先し、空または未設定の場合は
/// 同名の環境変数を参照する。値は参照のたびに解決し、キャッシュしない。
#[derive(Clone, Default)]
pub struct MailerConfig {
    settings:     HashMap<String, String>,
    env_fallback: bool,
}

impl MailerConfig {
    /// 環境変数にフォールバックする設定を作成する
    pub fn from_env() -> Self {
        Self {
            settings:     HashMap::new(),
            env_fallback: true,
        }
    }

    /// 環境変数を参照しない設定を作成する
    pub fn isolated() -> Self {
        Self::default()
    }

    /// アプリケーション側の設定値を追加する
    pub fn with_setting(mut self, key: &str, value: impl Into<String>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.settings
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .or_else(|| {
                self.env_fallback
                    .then(|| env::var(key).ok())
                    .flatten()
                    .filter(|v| !v.is_empty())
            })
    }

    /// Brevo API キー（未設定の場合は空文字列）
    pub fn api_key(&self) -> String {
        self.lookup(keys::BREVO_API_KEY).unwrap_or_default()
    }

    /// 現在の送信モード
    pub fn sending_mode(&self) -> SendingMode {
        SendingMode::from_api_key(&self.api_key())
    }

    /// 開発モードかどうか
    pub fn is_development_mode(&self) -> bool {
        is_development_mode(&self.api_key())
    }

    /// 送信元
    pub fn sender(&self) -> Sender {
        Sender {
            name:  self
                .lookup(keys::SENDER_NAME)
                .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            email: self
                .lookup(keys::SENDER_EMAIL)
                .unwrap_or_else(|| DEFAULT_SENDER_EMAIL.to_string()),
        }
    }

    /// Brevo API のベース URL
    pub fn api_base_url(&self) -> String {
        self.lookup(keys::BREVO_API_URL)
            .unwrap_or_else(|| BREVO_DEFAULT_BASE_URL.to_string())
    }
}

// API キーをログに出さない
impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("sending_mode", &self.sending_mode())
            .field("sender", &self.sender())
            .field("api_base_url", &self.api_base_url())
            .field("env_fallback", &self.env_fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tmes_domain::notification::PLACEHOLDER_API_KEY;

    use super::*;

    #[test]
    fn test_設定がない場合は開発モードになる() {
        let config = MailerConfig::isolated();

        assert_eq!(config.api_key(), "");
        assert_eq!(config.sending_mode(), SendingMode::Development);
    }

    #[test]
    fn test_プレースホルダは開発モードになる() {
        let config =
            MailerConfig::isolated().with_setting(keys::BREVO_API_KEY, PLACEHOLDER_API_KEY);

        assert!(config.is_development_mode());
    }

    #[test]
    fn test_api_keyが設定されていればliveモードになる() {
        let config = MailerConfig::isolated().with_setting(keys::BREVO_API_KEY, "xkeysib-live");

        assert_eq!(config.sending_mode(), SendingMode::Live);
    }

    #[test]
    fn test_送信元のデフォルト値() {
        let sender = MailerConfig::isolated().sender();

        assert_eq!(
            sender,
            Sender {
                name:  "TMES IIT Kharagpur".to_string(),
                email: "noreply@tmes.in".to_string(),
            }
        );
        assert_eq!(
            MailerConfig::isolated().api_base_url(),
            "https://api.brevo.com"
        );
    }

    #[test]
    fn test_空のアプリケーション設定は未設定として扱う() {
        let config = MailerConfig::isolated()
            .with_setting(keys::SENDER_NAME, "")
            .with_setting(keys::SENDER_EMAIL, "otp@tmes.in");

        let sender = config.sender();
        assert_eq!(sender.name, DEFAULT_SENDER_NAME);
        assert_eq!(sender.email, "otp@tmes.in");
    }

    #[test]
    fn test_debugにapi_keyを出さない() {
        let config = MailerConfig::isolated().with_setting(keys::BREVO_API_KEY, "xkeysib-secret");

        assert!(!format!("{config:?}").contains("xkeysib-secret"));
    }

    #[test]
    fn test_app_envがdevelopmentのときデバッグモード() {
        assert!(is_debug_env("development"));
        assert!(!is_debug_env("production"));
        assert!(!is_debug_env(""));
    }

    #[test]
    fn test_不正なポート番号はエラーになる() {
        assert_eq!(parse_port("5000").unwrap(), 5000);
        assert!(matches!(
            parse_port("abc"),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
