//! Parameter entry over any line-oriented input, so the same code drives the
//! terminal and the tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::{parse_min_matches, parse_min_score};
use crate::ranking::analysis::AnalysisRequest;
use crate::ranking::batch::Thresholds;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collects one run's parameters. Returns `Ok(None)` when the job title is
    /// left empty: the analysis is not triggered.
    pub fn read_request(
        &mut self,
        default_folder: Option<&PathBuf>,
        defaults: Thresholds,
    ) -> io::Result<Option<AnalysisRequest>> {
        let title = self.ask("Job title (required): ")?;
        if title.is_empty() {
            writeln!(self.output, "A job title is required. Analysis was not started.")?;
            return Ok(None);
        }

        writeln!(
            self.output,
            "Job description (optional, finish with an empty line):"
        )?;
        let description = self.read_block()?;

        let folder_prompt = match default_folder {
            Some(folder) => format!("Résumé folder [{}]: ", folder.display()),
            None => "Résumé folder (required): ".to_string(),
        };
        let folder = match (self.ask(&folder_prompt)?, default_folder) {
            (answer, _) if !answer.is_empty() => PathBuf::from(answer),
            (_, Some(folder)) => folder.clone(),
            (_, None) => {
                writeln!(self.output, "A résumé folder is required. Analysis was not started.")?;
                return Ok(None);
            }
        };

        let min_score = self.ask_until_valid(
            &format!("Minimum score 0-1 [{}]: ", defaults.min_score),
            defaults.min_score,
            |raw| parse_min_score(raw),
        )?;
        let min_matches = self.ask_until_valid(
            &format!("Minimum keyword matches 0-20 [{}]: ", defaults.min_matches),
            defaults.min_matches,
            |raw| parse_min_matches(raw),
        )?;

        Ok(Some(AnalysisRequest {
            title,
            description,
            folder,
            thresholds: Thresholds {
                min_score,
                min_matches,
            },
        }))
    }

    /// Yes/no question; anything but y/yes (any case) is no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]: "))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default().trim().to_string())
    }

    /// Empty answers take the default; invalid ones are explained and asked
    /// again. End of input also takes the default.
    fn ask_until_valid<T: Copy>(
        &mut self,
        prompt: &str,
        default: T,
        parse: impl Fn(&str) -> anyhow::Result<T>,
    ) -> io::Result<T> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let answer = match self.read_line()? {
                Some(line) => line.trim().to_string(),
                None => return Ok(default),
            };
            if answer.is_empty() {
                return Ok(default);
            }
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "Invalid value: {e:#}")?,
            }
        }
    }

    /// Lines up to the first empty line (or end of input), joined with `\n`.
    fn read_block(&mut self) -> io::Result<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// One line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
