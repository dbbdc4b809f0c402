use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::domain::error::{RewriteFailure, MSG_REQUIRED, MSG_UNSUPPORTED_TONE};
use crate::domain::settings::RewriteSettings;
use crate::domain::types::{RewriteRequest, RewriteResponse, Tone};
use crate::infra::generator::TextGenerator;
use crate::infra::metrics::{Metrics, MetricsSummary};
use crate::infra::prompts;

/// バリデーション済みの入力（値はトリムせずそのまま保持する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest<'a> {
    pub message: &'a str,
    pub tone: &'a str,
}

/// 入力検証。副作用なし、生成呼び出しの前に必ず完了する。
///
/// 順序: message 必須 → tone 必須 → 文字数上限 → (strict 時のみ) 既知トーン
pub fn validate<'a>(
    request: &'a RewriteRequest,
    settings: &RewriteSettings,
) -> Result<ValidRequest<'a>, RewriteFailure> {
    let message = request
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| RewriteFailure::validation(MSG_REQUIRED))?;

    let tone = request
        .tone
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| RewriteFailure::validation(MSG_REQUIRED))?;

    if message.chars().count() > settings.max_message_chars {
        return Err(RewriteFailure::validation(format!(
            "message exceeds {} characters",
            settings.max_message_chars
        )));
    }

    if settings.strict_tones && Tone::parse(tone).is_none() {
        return Err(RewriteFailure::validation(MSG_UNSUPPORTED_TONE));
    }

    Ok(ValidRequest { message, tone })
}

/// drop 時に生成タスクを中断するガード
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// リライトのオーケストレーター
///
/// 生成器は起動時に一度だけ構築して注入する。
///
/// `metrics` は観測専用で、リクエスト処理の途中で読まれることはない。
/// 結果はリクエストの入力と生成器の応答だけで決まり、先行リクエストには依存しない。
pub struct RewriteService {
    generator: Arc<dyn TextGenerator>,
    settings: RewriteSettings,
    metrics: Metrics,
}

impl RewriteService {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: RewriteSettings) -> Self {
        Self {
            generator,
            settings,
            metrics: Metrics::new(),
        }
    }

    pub fn settings(&self) -> &RewriteSettings {
        &self.settings
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }

    /// 1 リクエスト分のリライトを実行する。リトライはしない。
    pub async fn rewrite(&self, request: RewriteRequest) -> Result<RewriteResponse, RewriteFailure> {
        self.metrics.inc_requests();

        let result = self.run(&request).await;
        match &result {
            Ok(_) => self.metrics.inc_succeeded(),
            Err(failure) => self.metrics.inc_error(failure.kind),
        }
        result
    }

    async fn run(&self, request: &RewriteRequest) -> Result<RewriteResponse, RewriteFailure> {
        let valid = validate(request, &self.settings)?;
        let prompt = prompts::build_prompt(valid.message, valid.tone);

        let request_id = uuid::Uuid::new_v4();
        let generator_name = self.generator.name().to_string();
        let deadline = Duration::from_millis(self.settings.timeout_ms);

        let generator = Arc::clone(&self.generator);
        let mut task = AbortOnDrop(tokio::spawn(async move { generator.generate(&prompt).await }));

        let start = Instant::now();
        let outcome = tokio::time::timeout(deadline, &mut task.0).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Err(_) => {
                log::warn!(
                    "[{request_id}] {generator_name} が {}ms 以内に応答しませんでした",
                    self.settings.timeout_ms
                );
                Err(RewriteFailure::timeout())
            }
            Ok(Err(join_err)) => {
                log::error!("[{request_id}] {generator_name} generation task failed: {join_err}");
                Err(RewriteFailure::provider())
            }
            Ok(Ok(Err(e))) => {
                log::error!("[{request_id}] Rewrite error from {generator_name}: {e}");
                Err(RewriteFailure::provider())
            }
            Ok(Ok(Ok(text))) => {
                self.metrics.record_latency(&generator_name, elapsed_ms);
                log::info!("[{request_id}] rewrite completed via {generator_name} in {elapsed_ms}ms");
                Ok(RewriteResponse {
                    rewritten_text: text.trim().to_string(),
                })
            }
        }
    }
}
