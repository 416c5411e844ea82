//! # テンプレートレンダラー
//!
//! OTP メールの HTML 本文を生成する。
//!
//! - 送信目的ごとに案内文のみを差し替える（レイアウトは共通）
//! - 未知の送信目的は汎用の案内文にフォールバックし、エラーにしない
//! - タイムスタンプ等を埋め込まないため、同じ入力からは常に同じ出力になる

use tmes_domain::notification::{OTP_VALIDITY_TEXT, OtpPurpose};

/// 送信目的から OTP メールの HTML を生成する
pub fn render_otp_template(otp_code: &str, purpose: OtpPurpose) -> String {
    render_with_action(otp_code, purpose.action_phrase())
}

/// 送信目的の文字列キーから OTP メールの HTML を生成する
///
/// キーは `verification` / `login` / `reset`。それ以外は汎用の案内文になる。
pub fn render_otp_template_for_key(otp_code: &str, purpose_key: &str) -> String {
    render_with_action(otp_code, OtpPurpose::action_phrase_for_key(purpose_key))
}

fn render_with_action(otp_code: &str, action_text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f4f4;">
    <table role="presentation" style="width: 100%; border-collapse: collapse;">
        <tr>
            <td align="center" style="padding: 40px 0;">
                <table role="presentation" style="width: 600px; border-collapse: collapse; background-color: #ffffff; border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);">
                    <tr>
                        <td style="padding: 40px 30px; background: linear-gradient(135deg, #0E2E50 0%, #1a4a7a 100%); border-radius: 10px 10px 0 0; text-align: center;">
                            <h1 style="color: #ffffff; margin: 0; font-size: 28px;">TMES IIT Kharagpur</h1>
                            <p style="color: #94c2f5; margin: 10px 0 0 0; font-size: 14px;">The Mining Engineering Society</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 40px 30px;">
                            <h2 style="color: #0E2E50; margin: 0 0 20px 0; font-size: 22px;">Your Verification Code</h2>
                            <p style="color: #555555; font-size: 16px; line-height: 1.6; margin: 0 0 30px 0;">
                                Please use the following OTP to {action_text}. This code is valid for <strong>{OTP_VALIDITY_TEXT}</strong>.
                            </p>
                            <div style="text-align: center; margin: 30px 0;">
                                <div style="display: inline-block; background: linear-gradient(135deg, #0E2E50 0%, #1a4a7a 100%); padding: 20px 40px; border-radius: 10px;">
                                    <span style="font-size: 36px; font-weight: bold; letter-spacing: 8px; color: #ffffff;">{otp_code}</span>
                                </div>
                            </div>
                            <p style="color: #888888; font-size: 14px; line-height: 1.6; margin: 30px 0 0 0;">
                                If you didn't request this code, please ignore this email. Do not share this OTP with anyone.
                            </p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 30px; background-color: #f8f9fa; border-radius: 0 0 10px 10px; text-align: center;">
                            <p style="color: #888888; font-size: 12px; margin: 0;">&copy; 2024 TMES IIT Kharagpur. All rights reserved.</p>
                            <p style="color: #aaaaaa; font-size: 11px; margin: 10px 0 0 0;">This is an automated message. Please do not reply to this email.</p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#
    )
}
