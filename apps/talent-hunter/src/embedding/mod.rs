/// Embedding client: the only place that talks to the sentence-embedding model.
///
/// Scoring code depends on the `Embedder` trait, never on fastembed directly,
/// so the model can be replaced by a deterministic fake in tests.
///
/// Model: paraphrase-multilingual-MiniLM-L12-v2 (hardcoded; scores are only
/// comparable when every run uses the same model)
use std::path::Path;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;
use tracing::{debug, info};

pub const MODEL: &str = "paraphrase-multilingual-MiniLM-L12-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned no embedding")]
    EmptyOutput,
}

/// Turns text into a fixed-length vector.
///
/// Held by the session as `Arc<dyn Embedder>`; implementations must be safe to
/// call repeatedly from the same thread for the whole session.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn model_name(&self) -> &str;
}

/// fastembed-backed embedder. The ONNX session needs exclusive access per
/// inference call, hence the mutex.
pub struct SentenceEmbedder {
    model: Mutex<TextEmbedding>,
}

impl SentenceEmbedder {
    /// Loads the model, downloading it into `cache_dir` on first use.
    pub fn load(cache_dir: &Path) -> Result<Self, EmbeddingError> {
        info!(model = MODEL, cache_dir = %cache_dir.display(), "Loading embedding model");

        let options = InitOptions::new(EmbeddingModel::ParaphraseMLMiniLML12V2)
            .with_cache_dir(cache_dir.to_path_buf())
            .with_show_download_progress(true);

        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::ModelLoad(e.to_string()))?;

        info!("Embedding model ready");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| EmbeddingError::Inference(format!("model lock poisoned: {e}")))?;

        let mut vectors = model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::Inference(e.to_string()))?;

        let vector = vectors.pop().ok_or(EmbeddingError::EmptyOutput)?;
        debug!(chars = text.len(), dims = vector.len(), "Embedded text");
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        MODEL
    }
}
