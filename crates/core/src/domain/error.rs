use serde::Serialize;

pub const MSG_REQUIRED: &str = "message and tone are required";
pub const MSG_UNSUPPORTED_TONE: &str = "unsupported tone";
pub const MSG_TIMEOUT: &str = "Request took too long. Please try again.";
pub const MSG_PROVIDER: &str = "Failed to rewrite text. Please try again.";

/// リライト失敗の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RewriteErrorKind {
    /// 入力不正（クライアント起因、入力修正で回復）
    #[serde(rename = "E_VALIDATION")]
    Validation,
    /// 締め切り超過（一時的、リトライで回復）
    #[serde(rename = "E_TIMEOUT")]
    Timeout,
    /// 生成プロバイダ側の失敗
    #[serde(rename = "E_PROVIDER")]
    Provider,
}

impl RewriteErrorKind {
    pub fn http_status(&self) -> u16 {
        match self {
            RewriteErrorKind::Validation => 400,
            RewriteErrorKind::Timeout => 408,
            RewriteErrorKind::Provider => 500,
        }
    }
}

/// リライト失敗（ユーザー向けメッセージのみを保持する）
///
/// 上流の生エラーはここに入れず、ログにだけ出す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("[{kind:?}] {message}")]
pub struct RewriteFailure {
    pub kind: RewriteErrorKind,
    pub message: String,
    pub recoverable: bool,
}

impl RewriteFailure {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            kind: RewriteErrorKind::Validation,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: RewriteErrorKind::Timeout,
            message: MSG_TIMEOUT.to_string(),
            recoverable: true,
        }
    }

    pub fn provider() -> Self {
        Self {
            kind: RewriteErrorKind::Provider,
            message: MSG_PROVIDER.to_string(),
            recoverable: true,
        }
    }
}
