//! Batch ranker: lists a résumé folder, extracts and scores each file,
//! filters by the thresholds and sorts the survivors by similarity.
//!
//! Per-file extraction failures are recovered here (logged, recorded as
//! skipped). Scoring failures are not: they abort the run and whatever was
//! scored so far is dropped with the error.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AnalysisError;
use crate::extraction::TextExtractor;
use crate::matching::scoring::Scorer;
use crate::models::candidate::{CandidateDocument, ScoredCandidate, SkipReason, SkippedDocument};

/// Filtering thresholds. Defaults match the parameter defaults in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Minimum cosine similarity, in [0, 1].
    pub min_score: f32,
    /// Minimum keyword matches, in [0, 20].
    pub min_matches: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            min_matches: 2,
        }
    }
}

impl Thresholds {
    /// Match count is checked before similarity.
    pub fn accepts(&self, keyword_matches: u32, similarity: f32) -> bool {
        keyword_matches >= self.min_matches && similarity >= self.min_score
    }
}

/// Files handled so far out of the total qualifying files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStatus {
    Ranked,
    /// The folder holds no .pdf or .docx files.
    NoCandidateFiles,
    /// Files were processed but none passed the thresholds.
    NoQualifyingCandidates,
}

/// Outcome of one ranking run.
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub total_files: usize,
    /// Sorted by similarity, highest first.
    pub candidates: Vec<ScoredCandidate>,
    pub skipped: Vec<SkippedDocument>,
}

impl RankReport {
    pub fn status(&self) -> RankStatus {
        if self.total_files == 0 {
            RankStatus::NoCandidateFiles
        } else if self.candidates.is_empty() {
            RankStatus::NoQualifyingCandidates
        } else {
            RankStatus::Ranked
        }
    }

    pub fn scores(&self) -> Vec<f32> {
        self.candidates.iter().map(|c| c.similarity).collect()
    }
}

pub struct BatchRanker<'a> {
    pub extractor: &'a dyn TextExtractor,
    pub scorer: &'a Scorer,
    pub thresholds: Thresholds,
}

impl BatchRanker<'_> {
    pub fn rank(
        &self,
        run_id: Uuid,
        folder: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<RankReport, AnalysisError> {
        let documents = list_candidates(folder)?;
        let total = documents.len();

        if documents.is_empty() {
            info!(folder = %folder.display(), "No PDF or DOCX files found");
            return Ok(RankReport {
                run_id,
                completed_at: Utc::now(),
                total_files: 0,
                candidates: vec![],
                skipped: vec![],
            });
        }

        info!(total, "Ranking candidate documents");
        on_progress(Progress {
            processed: 0,
            total,
        });

        let mut candidates = Vec::new();
        let mut skipped = Vec::new();

        for (index, document) in documents.into_iter().enumerate() {
            if let Some(candidate) = self.process(document, &mut skipped)? {
                candidates.push(candidate);
            }
            on_progress(Progress {
                processed: index + 1,
                total,
            });
        }

        // sort_by is stable: equal scores keep listing order
        candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        info!(
            total,
            ranked = candidates.len(),
            skipped = skipped.len(),
            "Ranking finished"
        );

        Ok(RankReport {
            run_id,
            completed_at: Utc::now(),
            total_files: total,
            candidates,
            skipped,
        })
    }

    /// Returns the scored candidate when it passes both thresholds.
    fn process(
        &self,
        document: CandidateDocument,
        skipped: &mut Vec<SkippedDocument>,
    ) -> Result<Option<ScoredCandidate>, AnalysisError> {
        let text = match self.extractor.extract(&document) {
            Ok(text) => text,
            Err(e) => {
                // listed in the report's skipped section
                debug!(file = %document.file_name, "Error processing document: {e}");
                skipped.push(SkippedDocument {
                    file_name: document.file_name,
                    reason: SkipReason::Unreadable(e.to_string()),
                });
                return Ok(None);
            }
        };

        if text.trim().is_empty() {
            debug!(file = %document.file_name, "Document has no extractable text");
            skipped.push(SkippedDocument {
                file_name: document.file_name,
                reason: SkipReason::NoText,
            });
            return Ok(None);
        }

        let score = self.scorer.score(&text)?;
        debug!(
            file = %document.file_name,
            matches = score.keyword_matches,
            similarity = score.similarity,
            "Scored"
        );

        if !self
            .thresholds
            .accepts(score.keyword_matches, score.similarity)
        {
            return Ok(None);
        }

        Ok(Some(ScoredCandidate {
            document,
            keyword_matches: score.keyword_matches,
            similarity: score.similarity,
        }))
    }
}

/// Files (symlinks followed) in `folder` with a .pdf or .docx extension, ordered by file
/// name so repeated runs over the same folder list files identically.
pub fn list_candidates(folder: &Path) -> Result<Vec<CandidateDocument>, AnalysisError> {
    if !folder.is_dir() {
        return Err(AnalysisError::FolderNotFound(folder.to_path_buf()));
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(document) = CandidateDocument::from_path(path) {
            documents.push(document);
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(documents)
}
