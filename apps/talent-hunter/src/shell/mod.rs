// Presentation shell: parameter prompts, progress bar, ranked table and
// score histogram. All scoring decisions live in `ranking`; this module only
// collects input and renders results.

pub mod histogram;
pub mod prompt;
pub mod table;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::{Config, ReportFormat};
use crate::errors::AnalysisError;
use crate::models::candidate::SkippedDocument;
use crate::ranking::analysis::run_analysis;
use crate::ranking::batch::{Progress, RankReport, RankStatus};
use crate::state::Session;

use self::histogram::{Histogram, HISTOGRAM_BINS};
use self::prompt::Prompter;
use self::table::{render_table, TableRow};

/// JSON form of a run, printed when `REPORT_FORMAT=json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub status: RankStatus,
    pub total_files: usize,
    pub ranking: Vec<TableRow>,
    pub skipped: &'a [SkippedDocument],
}

impl<'a> From<&'a RankReport> for JsonReport<'a> {
    fn from(report: &'a RankReport) -> Self {
        Self {
            run_id: report.run_id,
            completed_at: report.completed_at,
            status: report.status(),
            total_files: report.total_files,
            ranking: report.candidates.iter().map(TableRow::from).collect(),
            skipped: &report.skipped,
        }
    }
}

/// Interactive loop: one analysis per iteration, the loaded model reused
/// for every run until the user stops.
pub fn run_session(session: &Session, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    loop {
        run_once(session, config, &mut prompter)?;
        if !prompter.confirm("Run another analysis?")? {
            break;
        }
    }

    info!("Session finished");
    Ok(())
}

fn run_once<R: BufRead, W: Write>(
    session: &Session,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let request =
        match prompter.read_request(config.resume_folder.as_ref(), config.default_thresholds)? {
            Some(request) => request,
            None => return Ok(()),
        };

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} résumés {msg}")?
            .progress_chars("=> "),
    );

    let outcome = run_analysis(session, &request, &mut |progress: Progress| {
        bar.set_length(progress.total as u64);
        bar.set_position(progress.processed as u64);
        bar.set_message(format!("({:.0}%)", progress.fraction() * 100.0));
        // clear before the ranker's closing log line reaches stderr
        if progress.processed == progress.total {
            bar.finish_and_clear();
        }
    });
    bar.finish_and_clear();

    let mut stdout = io::stdout().lock();
    match outcome {
        Ok(report) => match config.report_format {
            ReportFormat::Table => write_text_report(&mut stdout, &report)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, &JsonReport::from(&report))?;
                writeln!(stdout)?;
            }
        },
        Err(e) => write_error(&mut stdout, &e)?,
    }
    Ok(())
}

pub fn write_text_report(out: &mut impl Write, report: &RankReport) -> io::Result<()> {
    for skipped in &report.skipped {
        writeln!(out, "Warning: {} was skipped ({})", skipped.file_name, describe_skip(skipped))?;
    }

    match report.status() {
        RankStatus::NoCandidateFiles => {
            writeln!(out, "No PDF or DOCX files were found in the folder.")?;
        }
        RankStatus::NoQualifyingCandidates => {
            writeln!(out, "No résumé met the minimum criteria.")?;
        }
        RankStatus::Ranked => {
            writeln!(
                out,
                "{} relevant résumés found (run {}, {})",
                report.candidates.len(),
                report.run_id,
                report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;

            if let Some(histogram) = Histogram::new(&report.scores(), HISTOGRAM_BINS) {
                writeln!(out, "\nScore distribution ({} résumés)", histogram.total())?;
                write!(out, "{}", histogram.render())?;
            }

            let rows: Vec<TableRow> = report.candidates.iter().map(TableRow::from).collect();
            writeln!(out, "\nCandidate ranking")?;
            write!(out, "{}", render_table(&rows))?;
        }
    }
    Ok(())
}

fn describe_skip(skipped: &SkippedDocument) -> String {
    use crate::models::candidate::SkipReason;

    match &skipped.reason {
        SkipReason::Unreadable(reason) => reason.clone(),
        SkipReason::NoText => "no extractable text".to_string(),
    }
}

pub(crate) fn write_error(out: &mut impl Write, error: &AnalysisError) -> io::Result<()> {
    writeln!(out, "Error [{}]: {}", error.code(), error.user_message())
}
