pub mod error;
pub mod llm;

pub use error::PipelineError;
pub use llm::{ChatMessage, CollaboratorError, LLMClient};
