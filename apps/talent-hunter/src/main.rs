mod config;
mod embedding;
mod errors;
mod extraction;
mod matching;
mod models;
mod ranking;
mod shell;
mod state;

#[cfg(test)]
mod testing;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::SentenceEmbedder;
use crate::errors::AnalysisError;
use crate::extraction::DocumentExtractor;
use crate::state::Session;

fn main() -> Result<ExitCode> {
    // Invalid thresholds or modes in the environment stop here
    let config = Config::from_env()?;

    // Logs go to stderr so they never interleave with the report on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Talent Hunter v{}", env!("CARGO_PKG_VERSION"));

    // Load the embedding model once; every run in the session reuses it
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading model {}", embedding::MODEL));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let loaded = SentenceEmbedder::load(&config.model_cache_dir);
    spinner.finish_and_clear();

    let embedder = match loaded {
        Ok(embedder) => embedder,
        Err(e) => {
            return Ok(report_model_failure(&mut std::io::stderr(), &e.to_string()));
        }
    };
    info!(
        "Embedding model loaded (model: {}, cache: {})",
        embedding::MODEL,
        config.model_cache_dir.display()
    );

    let session = Session::new(Arc::new(embedder), Arc::new(DocumentExtractor), &config);

    shell::run_session(&session, &config)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the model-load failure once and yields the failing exit status.
fn report_model_failure(out: &mut impl Write, reason: &str) -> ExitCode {
    let error = AnalysisError::ModelLoad(reason.to_string());
    // stderr may already be gone; the exit status still reports the failure
    let _ = shell::write_error(out, &error);
    ExitCode::FAILURE
}
