//! Scorer: keyword hits plus embedding similarity between a résumé and a job profile.
//!
//! The profile side is embedded once when the scorer is built; each `score`
//! call embeds only the résumé text.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::embedding::{Embedder, EmbeddingError};
use crate::matching::job_profile::JobProfile;
use crate::matching::normalize::normalize_text;

/// How profile keywords are compared with résumé text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatching {
    /// Literal, case- and accent-sensitive substring test.
    Exact,
    /// Both sides go through `normalize_text` first.
    Normalized,
}

impl FromStr for KeywordMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(KeywordMatching::Exact),
            "normalized" => Ok(KeywordMatching::Normalized),
            other => Err(format!(
                "unknown keyword matching mode '{other}' (expected 'exact' or 'normalized')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub keyword_matches: u32,
    pub similarity: f32,
}

pub struct Scorer {
    embedder: Arc<dyn Embedder>,
    matching: KeywordMatching,
    /// Profile keywords, already normalized when `matching` is `Normalized`.
    keywords: Vec<String>,
    profile_embedding: Vec<f32>,
}

impl Scorer {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        profile: &JobProfile,
        matching: KeywordMatching,
    ) -> Result<Self, EmbeddingError> {
        let profile_embedding = embedder.embed(&profile.query_text())?;
        let keywords = match matching {
            KeywordMatching::Exact => profile.keywords.clone(),
            KeywordMatching::Normalized => {
                profile.keywords.iter().map(|k| normalize_text(k)).collect()
            }
        };

        Ok(Self {
            embedder,
            matching,
            keywords,
            profile_embedding,
        })
    }

    pub fn score(&self, text: &str) -> Result<Score, EmbeddingError> {
        let keyword_matches = match self.matching {
            KeywordMatching::Exact => count_keyword_matches(text, &self.keywords),
            KeywordMatching::Normalized => {
                count_keyword_matches(&normalize_text(text), &self.keywords)
            }
        };

        let resume_embedding = self.embedder.embed(text)?;
        let similarity = cosine_similarity(&self.profile_embedding, &resume_embedding);

        Ok(Score {
            keyword_matches,
            similarity,
        })
    }
}

/// Sum over keywords of their non-overlapping occurrences in `text`.
/// A keyword that appears three times contributes three.
pub fn count_keyword_matches(text: &str, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .map(|kw| text.matches(kw.as_str()).count() as u32)
        .sum()
}

/// Plain cosine similarity in [-1, 1]. Mismatched or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
