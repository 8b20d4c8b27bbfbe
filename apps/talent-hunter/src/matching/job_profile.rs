//! Job profile builder: turns a job title and free-text description into the
//! keyword list used for matching and the query text used for embedding.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::matching::normalize::normalize_text;
use crate::matching::scoring::KeywordMatching;

/// Runs of four or more word characters. Unicode-aware, so "Gestão" is one token.
static KEYWORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w{4,}").expect("keyword regex is valid"));

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("job title must not be empty")]
    EmptyTitle,
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileOptions {
    /// Drop repeated keywords (first occurrence wins). Off reproduces the
    /// raw token stream, where a word repeated in the description counts twice.
    pub dedup_keywords: bool,
    /// Duplicates are detected the way the scorer compares keywords, so
    /// "Python" and "python" are one keyword under normalized matching.
    pub matching: KeywordMatching,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            dedup_keywords: true,
            matching: KeywordMatching::Normalized,
        }
    }
}

/// Target profile for one analysis run. The title is always `keywords[0]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobProfile {
    pub title: String,
    pub keywords: Vec<String>,
}

impl JobProfile {
    /// Text embedded on the job side of the similarity comparison.
    pub fn query_text(&self) -> String {
        self.keywords.join(" ")
    }
}

pub fn build_profile(
    title: &str,
    description: &str,
    options: ProfileOptions,
) -> Result<JobProfile, ProfileError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ProfileError::EmptyTitle);
    }

    let candidates = std::iter::once(title).chain(
        KEYWORD_TOKEN
            .find_iter(description)
            .map(|m| m.as_str()),
    );

    let keywords = if options.dedup_keywords {
        let mut seen = HashSet::new();
        candidates
            .filter(|kw| {
                let key = match options.matching {
                    KeywordMatching::Exact => kw.to_string(),
                    KeywordMatching::Normalized => normalize_text(kw),
                };
                seen.insert(key)
            })
            .map(String::from)
            .collect()
    } else {
        candidates.map(String::from).collect()
    };

    Ok(JobProfile {
        title: title.to_string(),
        keywords,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: ProfileOptions = ProfileOptions {
        dedup_keywords: false,
        matching: KeywordMatching::Normalized,
    };

    const EXACT: ProfileOptions = ProfileOptions {
        dedup_keywords: true,
        matching: KeywordMatching::Exact,
    };

    #[test]
    fn test_title_is_first_keyword() {
        let profile = build_profile("Analista de Dados", "", ProfileOptions::default()).unwrap();
        assert_eq!(profile.title, "Analista de Dados");
        assert_eq!(profile.keywords, vec!["Analista de Dados"]);
    }

    #[test]
    fn test_empty_or_blank_title_is_rejected() {
        assert_eq!(
            build_profile("", "Python SQL", ProfileOptions::default()),
            Err(ProfileError::EmptyTitle)
        );
        assert_eq!(
            build_profile("   ", "Python SQL", ProfileOptions::default()),
            Err(ProfileError::EmptyTitle)
        );
    }

    #[test]
    fn test_short_words_are_ignored() {
        let profile = build_profile("Dev", "SQL and Rust, Python; Kafka!", RAW).unwrap();
        assert_eq!(profile.keywords, vec!["Dev", "Rust", "Python", "Kafka"]);
    }

    #[test]
    fn test_accented_words_are_single_tokens() {
        let profile = build_profile("Gerente", "Gestão de equipes e comunicação", RAW).unwrap();
        assert_eq!(
            profile.keywords,
            vec!["Gerente", "Gestão", "equipes", "comunicação"]
        );
    }

    #[test]
    fn test_exact_dedup_is_case_sensitive() {
        let profile = build_profile("Dev", "Python python PYTHON", EXACT).unwrap();
        assert_eq!(profile.keywords, vec!["Dev", "Python", "python", "PYTHON"]);
    }

    #[test]
    fn test_normalized_dedup_folds_case_and_accents() {
        let profile =
            build_profile("Dev", "Python python PYTHON Gestão gestao", ProfileOptions::default())
                .unwrap();
        assert_eq!(profile.keywords, vec!["Dev", "Python", "Gestão"]);
    }

    #[test]
    fn test_normalized_dedup_includes_the_title() {
        let profile = build_profile("Python", "python Django", ProfileOptions::default()).unwrap();
        assert_eq!(profile.keywords, vec!["Python", "Django"]);
    }

    #[test]
    fn test_duplicates_retained_without_dedup() {
        let profile = build_profile("Dev", "Python Django Python", RAW).unwrap();
        assert_eq!(profile.keywords, vec!["Dev", "Python", "Django", "Python"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let profile =
            build_profile("Python", "Python Django Flask Django", ProfileOptions::default())
                .unwrap();
        assert_eq!(profile.keywords, vec!["Python", "Django", "Flask"]);
    }

    #[test]
    fn test_query_text_joins_keywords() {
        let profile = build_profile("Engenheiro de Dados", "Spark Airflow", RAW).unwrap();
        assert_eq!(profile.query_text(), "Engenheiro de Dados Spark Airflow");
    }
}
