use async_trait::async_trait;

use super::{GenerateError, TextGenerator};

/// NoopGenerator: プロンプト中のメッセージ部分をそのまま返すモック実装。
/// API キーなしのローカル動作確認用。
pub struct NoopGenerator;

/// テンプレートの空行直後にある本文の開始位置。本文より前に一度だけ現れる
const MESSAGE_MARKER: &str = "\n\nMessage: \"";

#[async_trait]
impl TextGenerator for NoopGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let echoed = prompt
            .find(MESSAGE_MARKER)
            .map(|idx| &prompt[idx + MESSAGE_MARKER.len()..])
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(prompt);
        Ok(echoed.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
