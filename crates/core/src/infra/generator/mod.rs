pub mod gemini;
mod noop;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use noop::NoopGenerator;

use async_trait::async_trait;

/// 生成エラー
///
/// 詳細メッセージはログ専用。ユーザーには返さない。
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Generator not available: {0}")]
    NotAvailable(String),
    #[error("Generation failed: {0}")]
    Failed(String),
}

/// テキスト生成 trait（外部 LLM が実装する）
///
/// レイテンシは無制限、出力は非決定的とみなす。締め切りは呼び出し側が課す。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    fn name(&self) -> &str;
}
