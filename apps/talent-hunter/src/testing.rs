//! Deterministic stand-ins for the embedding model and the document parsers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embedding::{Embedder, EmbeddingError};
use crate::extraction::{ExtractionError, TextExtractor};
use crate::models::candidate::CandidateDocument;

/// Bag-of-words embedder: lowercase alphanumeric terms hashed (FNV-1a) into
/// fixed buckets. Texts sharing words get a high cosine similarity.
pub struct HashingEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimensions: 256,
            calls: AtomicUsize::new(0),
        }
    }
}

impl HashingEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0f32; self.dimensions];
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= 2)
        {
            vector[Self::bucket(&term.to_lowercase(), self.dimensions)] += 1.0;
        }
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        "hashing-test"
    }
}

/// Fails every call, like a model whose session broke.
pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Inference("onnx session unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-test"
    }
}

/// Succeeds for the first `ok_calls` calls, then fails.
pub struct FlakyEmbedder {
    inner: HashingEmbedder,
    ok_calls: usize,
}

impl FlakyEmbedder {
    pub fn new(ok_calls: usize) -> Self {
        Self {
            inner: HashingEmbedder::default(),
            ok_calls,
        }
    }
}

impl Embedder for FlakyEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.inner.calls() >= self.ok_calls {
            return Err(EmbeddingError::Inference("out of memory".to_string()));
        }
        self.inner.embed(text)
    }

    fn model_name(&self) -> &str {
        "flaky-test"
    }
}

/// Serves canned text per file name instead of parsing the file.
/// Files with no entry fail like an unreadable document.
#[derive(Default)]
pub struct CannedExtractor {
    texts: HashMap<String, String>,
    calls: AtomicUsize,
}

impl CannedExtractor {
    pub fn with(mut self, file_name: &str, text: &str) -> Self {
        self.texts.insert(file_name.to_string(), text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for CannedExtractor {
    fn extract(&self, document: &CandidateDocument) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts
            .get(&document.file_name)
            .cloned()
            .ok_or_else(|| ExtractionError::Pdf(format!("no canned text for {}", document.file_name)))
    }
}

/// Wraps paragraph XML in a minimal WordprocessingML document.
pub fn docx_body(blocks: &[&str]) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        blocks.concat()
    )
}

/// Writes a .docx containing only `word/document.xml`, which is all the
/// extractor reads.
pub fn write_docx(path: &std::path::Path, document_xml: &str) {
    use std::io::Write;

    let file = std::fs::File::create(path).unwrap();
    let mut archive = zip::ZipWriter::new(file);
    archive
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    archive.write_all(document_xml.as_bytes()).unwrap();
    archive.finish().unwrap();
}
