use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LLMConfig,
    pub data: DataConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub model: String,
    pub api_base: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Paths of the three tabular inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub inventory: PathBuf,
    pub products: PathBuf,
    pub sales: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output: PathBuf,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("STOCKSAGE").separator("__"))
            .set_default("llm.model", "moonshot-v1-8k")?
            .set_default("llm.api_base", "https://api.moonshot.cn/v1")?
            .set_default("llm.temperature", 0.7)?
            .set_default("llm.max_tokens", 2048)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("data.inventory", "data/inventory.csv")?
            .set_default("data.products", "data/products.csv")?
            .set_default("data.sales", "data/sales_records.csv")?
            .set_default("report.output", "inventory_report.md")?
            .set_default("report.preview_chars", 500)?
            .set_default("logging.level", "info")?
            .build()?;

        config.try_deserialize()
    }

    pub fn api_key() -> Result<String> {
        env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))
    }
}
