use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::extraction::TextExtractor;
use crate::matching::job_profile::ProfileOptions;
use crate::matching::scoring::KeywordMatching;

/// Resources shared by every analysis run in one interactive session.
/// The embedder is loaded once at startup and never reloaded.
#[derive(Clone)]
pub struct Session {
    pub embedder: Arc<dyn Embedder>,
    /// Pluggable so tests can serve canned text instead of parsing files.
    pub extractor: Arc<dyn TextExtractor>,
    pub keyword_matching: KeywordMatching,
    pub profile_options: ProfileOptions,
}

impl Session {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn TextExtractor>,
        config: &Config,
    ) -> Self {
        Self {
            embedder,
            extractor,
            keyword_matching: config.keyword_matching,
            profile_options: ProfileOptions {
                dedup_keywords: config.dedup_keywords,
                matching: config.keyword_matching,
            },
        }
    }
}
