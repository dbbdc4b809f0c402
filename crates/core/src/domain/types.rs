use serde::{Deserialize, Serialize};

/// リライト要求（POST /api/rewrite のボディ）
///
/// 欠落したフィールドは `None` として受け取り、判定はバリデーションに任せる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

impl RewriteRequest {
    pub fn new(message: impl Into<String>, tone: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            tone: Some(tone.into()),
        }
    }
}

/// リライト成功レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub rewritten_text: String,
}

/// エラーレスポンス（ユーザー向けの短いメッセージのみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 既知のトーン
///
/// コア側では任意の文字列を受け付ける。この列挙は一覧表示と strict モード用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Professional,
    Friendly,
    Casual,
    Formal,
    Enthusiastic,
    Clear,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Casual,
        Tone::Formal,
        Tone::Enthusiastic,
        Tone::Clear,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Clear => "clear",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Casual => "Casual",
            Tone::Formal => "Formal",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Clear => "Clear & Simple",
        }
    }

    /// id またはラベル（大文字小文字無視）からトーンを引く
    pub fn parse(value: &str) -> Option<Tone> {
        let value = value.trim();
        Tone::ALL.into_iter().find(|t| {
            t.id().eq_ignore_ascii_case(value) || t.label().eq_ignore_ascii_case(value)
        })
    }

    pub fn info(&self) -> ToneInfo {
        ToneInfo {
            id: self.id().to_string(),
            label: self.label().to_string(),
        }
    }
}

/// トーン一覧エントリ（GET /api/tones 用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneInfo {
    pub id: String,
    pub label: String,
}

/// 全トーンの一覧を返す
pub fn tone_catalog() -> Vec<ToneInfo> {
    Tone::ALL.iter().map(Tone::info).collect()
}
