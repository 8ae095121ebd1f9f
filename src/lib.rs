//! StockSage - inventory analytics assistant
//!
//! Loads the inventory, product, and sales tables, classifies stock-out
//! and overstock risk against safety-stock thresholds, and renders a
//! Markdown report, optionally framed by a hosted LLM collaborator.
//! Every run is a fresh batch job; no state survives between invocations.

pub mod agents;
pub mod analysis;
pub mod charts;
pub mod cli;
mod config;
pub mod core;
pub mod data;
pub mod pipeline;
pub mod qa;
pub mod report;
pub mod utils;

pub use crate::config::{DataConfig, LLMConfig, LoggingConfig, ReportConfig, Settings};
pub use crate::core::llm::LLMClient;
pub use crate::core::PipelineError;
