//! Analysis run: validates one request, then builds the profile, the scorer and the ranker.
//!
//! Checks happen in a fixed order so that a bad request never touches the
//! filesystem: title first, then the folder, then the profile embedding.

use std::path::PathBuf;

use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::AnalysisError;
use crate::matching::job_profile::{build_profile, ProfileError};
use crate::matching::scoring::Scorer;
use crate::ranking::batch::{BatchRanker, Progress, RankReport, Thresholds};
use crate::state::Session;

/// Parameters entered by the user for a single run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub title: String,
    pub description: String,
    pub folder: PathBuf,
    pub thresholds: Thresholds,
}

pub fn run_analysis(
    session: &Session,
    request: &AnalysisRequest,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<RankReport, AnalysisError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("analysis", %run_id);
    let _guard = span.enter();

    let profile = build_profile(&request.title, &request.description, session.profile_options)
        .map_err(|e| match e {
            ProfileError::EmptyTitle => AnalysisError::EmptyTitle,
        })?;

    if !request.folder.is_dir() {
        return Err(AnalysisError::FolderNotFound(request.folder.clone()));
    }

    info!(
        title = %profile.title,
        keywords = profile.keywords.len(),
        folder = %request.folder.display(),
        min_score = request.thresholds.min_score,
        min_matches = request.thresholds.min_matches,
        model = session.embedder.model_name(),
        "Starting analysis"
    );

    let scorer = Scorer::new(session.embedder.clone(), &profile, session.keyword_matching)?;
    let ranker = BatchRanker {
        extractor: session.extractor.as_ref(),
        scorer: &scorer,
        thresholds: request.thresholds,
    };

    ranker.rank(run_id, &request.folder, on_progress)
}
