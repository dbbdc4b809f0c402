use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerateError, TextGenerator};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 接続設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API キー。未設定でも起動はでき、呼び出し時に NotAvailable になる
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// TCP 接続確立のタイムアウト秒数
    pub connect_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Gemini API を使用したテキスト生成器
///
/// reqwest::Client はプロセス全体で共有し、リクエスト単位の状態は持たない。
/// generate() の Future を drop すると送信中の HTTP リクエストも中断される。
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GenerateError::NotAvailable(format!("HTTP client init failed: {e}")))?;

        let api_key = config.api_key.filter(|k| !k.trim().is_empty());

        Ok(Self {
            client,
            api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// 先頭候補の text パートを連結する
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerateError::Failed("No candidates in Gemini response".to_string()))?;

    let finish_reason = candidate.finish_reason.unwrap_or_default();
    let text = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(GenerateError::Failed(format!(
            "Empty response from Gemini API (finish_reason={finish_reason})"
        )));
    }

    Ok(text)
}

fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) => format!(
            "{} {} - {}",
            parsed.error.code, parsed.error.status, parsed.error.message
        ),
        Err(_) => body.chars().take(500).collect(),
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerateError::NotAvailable("Gemini API key is not configured".to_string()))?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        log::debug!("Gemini リクエスト送信: model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Failed(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Failed(format!(
                "Gemini API error: {status} - {}",
                describe_error_body(&body)
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Failed(format!("Response parse error: {e}")))?;

        extract_text(parsed)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
