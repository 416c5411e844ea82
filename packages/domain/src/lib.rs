//! # TMES ドメイン層
//!
//! OTP メール通知のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **インフラ非依存**: HTTP クライアントや設定読み込みに依存しない
//! - **状態を持たない**: すべての型は呼び出しごとに生成され、永続化されない
//!
//! ## モジュール構成
//!
//! - [`notification`] - 送信目的、メールメッセージ、送信結果、送信モード、エラー

pub mod notification;
