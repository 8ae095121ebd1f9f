//! Pipeline-level error taxonomy.
//!
//! Every stage failure is fatal: the pipeline is strictly sequential and
//! no component recovers from another's failure. Division-by-zero has no
//! variant here because the classifier excludes zero-safety-stock rows
//! before dividing.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::llm::CollaboratorError;
use crate::data::LoadError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
