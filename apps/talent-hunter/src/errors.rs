use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Fatal errors for a session or a single analysis run.
///
/// Per-file problems never show up here: they are `ExtractionError`s that the
/// ranker turns into skipped documents. Informational outcomes (no files, no
/// qualifying candidates) are `RankStatus` values, not errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    #[error("Job title is required")]
    EmptyTitle,

    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Stable machine-readable code, used in JSON reports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::ModelLoad(_) => "MODEL_LOAD_FAILURE",
            AnalysisError::EmptyTitle => "EMPTY_TITLE",
            AnalysisError::FolderNotFound(_) => "FOLDER_NOT_FOUND",
            AnalysisError::Embedding(_) => "EMBEDDING_ERROR",
            AnalysisError::Io(_) => "IO_ERROR",
        }
    }

    /// Message shown to the person at the terminal. Internal failures are
    /// logged with full detail and shown with a short summary.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ModelLoad(reason) => {
                tracing::error!("Model load failure: {reason}");
                format!("The embedding model could not be loaded: {reason}")
            }
            AnalysisError::EmptyTitle => {
                "A job title is required. Analysis was not started.".to_string()
            }
            AnalysisError::FolderNotFound(path) => {
                format!("The specified folder does not exist: {}", path.display())
            }
            AnalysisError::Embedding(e) => {
                tracing::error!("Embedding error during analysis: {e}");
                format!("Error during analysis, no results were kept: {e}")
            }
            AnalysisError::Io(e) => {
                tracing::error!("I/O error during analysis: {e:?}");
                format!("Error during analysis, no results were kept: {e}")
            }
        }
    }
}
