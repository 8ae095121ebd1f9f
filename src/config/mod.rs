pub mod settings;

pub use settings::{DataConfig, LLMConfig, LoggingConfig, ReportConfig, Settings};
