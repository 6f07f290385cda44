use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::ipo::IpoRecord;
use crate::label::{label_for, Label};
use crate::scoring::{Breakdown, Factors, ScoreResult};

/// An IPO with its calculated score for display
pub struct ScoredIpo<'a> {
    pub ipo: &'a IpoRecord,
    pub result: &'a ScoreResult,
}

impl ScoredIpo<'_> {
    fn label(&self) -> Label {
        label_for(self.result.score)
    }
}

/// Format a score with exactly one decimal ("5.0", "10.0")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Label column: 13 chars fits "Below Average"
const LABEL_WIDTH: usize = 13;

/// Format IPOs as a table with columns: Index, Score, Label, Name
/// No headers. Score is right-aligned in 4 chars (fits "10.0"); the index
/// column is at least 2 digits wide and grows with the row count.
pub fn format_scored_table(ipos: &[ScoredIpo], use_colors: bool) -> String {
    if ipos.is_empty() {
        return "No IPO records found.".to_string();
    }

    let term_width = get_terminal_width();
    let digits = ipos.len().to_string().len().max(2);
    let index_width = digits + 1;
    let score_width = 4;
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + LABEL_WIDTH + separator.len() * 2;

    ipos.iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>width$}.", idx + 1, width = digits);
            let score_str = format!("{:>width$}", format_score(scored.result.score), width = score_width);
            let label = scored.label();
            let label_str = format!("{:<width$}", label.label, width = LABEL_WIDTH);

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(scored.ipo.display_name(), width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(scored.ipo.display_name(), 20),
                // No terminal (pipe), don't truncate
                None => scored.ipo.display_name().to_string(),
            };

            if use_colors {
                let (r, g, b) = label.rgb();
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    label_str.truecolor(r, g, b),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, label_str, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format IPOs as tab-separated values for scripting
/// Columns: score, label, name (no headers, no colors)
pub fn format_tsv(ipos: &[ScoredIpo]) -> String {
    ipos.iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}",
                format_score(scored.result.score),
                scored.label().label,
                scored.ipo.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    score: f64,
    label: &'static str,
    color: &'static str,
    factors: &'a Factors,
    breakdown: &'a Breakdown,
}

/// Format IPOs as a pretty-printed JSON array
pub fn format_json(ipos: &[ScoredIpo]) -> Result<String> {
    let entries: Vec<JsonEntry> = ipos
        .iter()
        .map(|scored| {
            let label = scored.label();
            JsonEntry {
                name: scored.ipo.display_name(),
                score: scored.result.score,
                label: label.label,
                color: label.color,
                factors: &scored.result.factors,
                breakdown: &scored.result.breakdown,
            }
        })
        .collect();
    serde_json::to_string_pretty(&entries).context("Failed to serialize scores")
}

/// Format a single IPO with its factor breakdown (for verbose mode)
pub fn format_detail(scored: &ScoredIpo, use_colors: bool) -> String {
    let label = scored.label();
    let breakdown = &scored.result.breakdown;
    let name = scored.ipo.display_name();
    let score = format_score(scored.result.score);

    let (name, score, label_text) = if use_colors {
        let (r, g, b) = label.rgb();
        (
            name.bold().to_string(),
            score.bold().to_string(),
            label.label.truecolor(r, g, b).to_string(),
        )
    } else {
        (name.to_string(), score, label.label.to_string())
    };

    format!(
        "{}\n  Score: {} ({})\n  GMP: {}\n  Subscription: {}\n  Financials: {}\n  Risk: {}",
        name,
        score,
        label_text,
        breakdown.gmp,
        breakdown.subscription,
        breakdown.financials,
        breakdown.risk
    )
}
