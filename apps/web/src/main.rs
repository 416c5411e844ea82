//! # TMES Web サーバー
//!
//! サインアップ・ログイン・パスワードリセットの OTP メールを送信する。
//!
//! ## 送信モード
//!
//! - `BREVO_API_KEY` が未設定またはプレースホルダ: 開発モード（ログと標準出力に OTP を表示）
//! - それ以外: Brevo API 経由で送信
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! APP_ENV=development cargo run -p tmes-web
//!
//! # 本番環境
//! BREVO_API_KEY=xkeysib-... cargo run -p tmes-web --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use tmes_shared::observability::{TracingConfig, init_tracing};
use tmes_web::{
    app_builder::build_app,
    config::{MailerConfig, WebConfig},
    usecase::notification::OtpDispatcher,
};
use tokio::net::TcpListener;

/// Web サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let config = WebConfig::from_env()?;

    let tracing_config = TracingConfig::from_env("web", config.debug);
    init_tracing(tracing_config.clone());
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let mailer_config = MailerConfig::from_env();
    tracing::info!(
        debug = config.debug,
        brevo_api_key_configured = if mailer_config.is_development_mode() { "No" } else { "Yes" },
        "Web サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let dispatcher = Arc::new(OtpDispatcher::new(mailer_config, reqwest::Client::new()));
    let app = build_app(dispatcher);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
