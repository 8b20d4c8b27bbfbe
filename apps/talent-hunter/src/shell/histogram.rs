use std::fmt::Write;

/// Number of bins in the similarity distribution.
pub const HISTOGRAM_BINS: usize = 15;

const BAR_WIDTH: usize = 40;

/// Equal-width histogram over the observed range of the scores.
///
/// When every score is identical the range is widened to ±0.5 around it so
/// the bins still have a width.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f32>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `None` for an empty score list or zero bins.
    pub fn new(scores: &[f32], bins: usize) -> Option<Self> {
        if scores.is_empty() || bins == 0 {
            return None;
        }

        let mut low = scores.iter().copied().fold(f32::INFINITY, f32::min);
        let mut high = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        let width = (high - low) / bins as f32;
        let edges = (0..=bins).map(|i| low + width * i as f32).collect();

        let mut counts = vec![0usize; bins];
        for &score in scores {
            // last bin is closed on the right
            let index = (((score - low) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// One line per bin: range, bar scaled to the fullest bin, count.
    pub fn render(&self) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (i, &count) in self.counts.iter().enumerate() {
            let bar_len = (count * BAR_WIDTH).div_ceil(peak);
            let _ = writeln!(
                out,
                "{:>7.4} - {:<7.4} | {:<width$} {}",
                self.edges[i],
                self.edges[i + 1],
                "#".repeat(bar_len),
                count,
                width = BAR_WIDTH
            );
        }
        out
    }
}
