//! サーバー設定
//!
//! 埋め込みデフォルト → `config/local.toml`（任意）→ `TONESHIFT_` 環境変数 の順に上書きする。

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use ts_core::domain::settings::RewriteSettings;
use ts_core::infra::generator::GeminiConfig;

/// 埋め込みデフォルト設定
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// プレフィックス付き変数が無いときに参照する Gemini キーの環境変数
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// アプリケーション設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub rewrite: RewriteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub provider: GeneratorChoice,
}

/// リライトに使う生成器の選択
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorChoice {
    #[default]
    Gemini,
    Noop,
}

/// 設定を読み込む。API キーは起動時に一度だけ読む
pub fn load_config() -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/local").required(false))
        // TONESHIFT_GEMINI__API_KEY -> gemini.api_key
        .add_source(
            Environment::with_prefix("TONESHIFT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if app_config.gemini.api_key.is_none() {
        app_config.gemini.api_key = std::env::var(GEMINI_API_KEY_ENV).ok();
    }

    Ok(app_config)
}
