use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::matching::scoring::KeywordMatching;
use crate::ranking::batch::Thresholds;

/// Highest value accepted for the minimum keyword matches parameter.
pub const MAX_MIN_MATCHES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
}

/// Application configuration loaded from environment variables (and `.env`).
/// Everything has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_cache_dir: PathBuf,
    /// Pre-filled answer for the folder prompt.
    pub resume_folder: Option<PathBuf>,
    pub default_thresholds: Thresholds,
    pub keyword_matching: KeywordMatching,
    pub dedup_keywords: bool,
    pub report_format: ReportFormat,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let min_score = match lookup("MIN_SCORE") {
            Some(raw) => parse_min_score(&raw).context("MIN_SCORE")?,
            None => Thresholds::default().min_score,
        };
        let min_matches = match lookup("MIN_MATCHES") {
            Some(raw) => parse_min_matches(&raw).context("MIN_MATCHES")?,
            None => Thresholds::default().min_matches,
        };

        let keyword_matching = match lookup("KEYWORD_MATCHING") {
            Some(raw) => raw
                .parse::<KeywordMatching>()
                .map_err(anyhow::Error::msg)
                .context("KEYWORD_MATCHING")?,
            None => KeywordMatching::Normalized,
        };

        let dedup_keywords = match lookup("DEDUP_KEYWORDS") {
            Some(raw) => parse_bool(&raw).context("DEDUP_KEYWORDS")?,
            None => true,
        };

        let report_format = match lookup("REPORT_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("table") => ReportFormat::Table,
            Some("json") => ReportFormat::Json,
            Some(other) => bail!("REPORT_FORMAT must be 'table' or 'json', got '{other}'"),
        };

        Ok(Config {
            model_cache_dir: lookup("MODEL_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".fastembed_cache")),
            resume_folder: lookup("RESUME_FOLDER")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            default_thresholds: Thresholds {
                min_score,
                min_matches,
            },
            keyword_matching,
            dedup_keywords,
            report_format,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Minimum similarity score: a float in [0, 1].
pub fn parse_min_score(raw: &str) -> Result<f32> {
    let value: f32 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", raw.trim()))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("minimum score must be between 0 and 1, got {value}");
    }
    Ok(value)
}

/// Minimum keyword matches: an integer in [0, 20].
pub fn parse_min_matches(raw: &str) -> Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a whole number", raw.trim()))?;
    if value > MAX_MIN_MATCHES {
        bail!("minimum matches must be between 0 and {MAX_MIN_MATCHES}, got {value}");
    }
    Ok(value)
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
