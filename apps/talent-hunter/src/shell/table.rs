use std::fmt::Write;

use serde::Serialize;

use crate::models::candidate::ScoredCandidate;

/// The three columns shown for each ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub file: String,
    pub score: f32,
    pub matches: u32,
}

impl From<&ScoredCandidate> for TableRow {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            file: candidate.document.file_name.clone(),
            score: candidate.similarity,
            matches: candidate.keyword_matches,
        }
    }
}

const FILE_HEADER: &str = "File";

pub fn render_table(rows: &[TableRow]) -> String {
    let file_width = rows
        .iter()
        .map(|r| r.file.chars().count())
        .max()
        .unwrap_or(0)
        .max(FILE_HEADER.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<file_width$}  {:>7}  {:>7}",
        "#", FILE_HEADER, "Score", "Matches"
    );
    let _ = writeln!(out, "{}", "-".repeat(4 + 2 + file_width + 2 + 7 + 2 + 7));
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<file_width$}  {:>7.4}  {:>7}",
            i + 1,
            row.file,
            row.score,
            row.matches
        );
    }
    out
}
