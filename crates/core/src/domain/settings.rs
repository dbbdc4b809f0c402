use serde::{Deserialize, Serialize};

/// リライト処理の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteSettings {
    /// 生成呼び出しの締め切り（ミリ秒）
    pub timeout_ms: u64,
    /// メッセージの最大文字数（バイト数ではなく文字数）
    pub max_message_chars: usize,
    /// 既知トーン以外を拒否するか（デフォルトは任意の文字列を許可）
    pub strict_tones: bool,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 12_000,
            max_message_chars: 2000,
            strict_tones: false,
        }
    }
}
