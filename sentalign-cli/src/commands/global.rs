//! Global command implementation - end-to-end alignment of sentence pairs

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use sentalign_core::batch::align_global_pairs;
use sentalign_core::{Alignment, AlignmentCodec, GlobalAligner};

use crate::commands::{encode_pairs, filter_for, load_pairs};
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::CliError;
use crate::{OutputFormat, PairArgs};

#[derive(Debug, Serialize)]
struct GlobalReport<'a> {
    line: usize,
    score: f64,
    text_a: String,
    text_b: String,
    alignment: &'a Alignment,
}

pub fn execute(config: &Config, input: &PairArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(config, input, &mut out)
}

pub fn run<W: Write>(config: &Config, input: &PairArgs, out: &mut W) -> Result<()> {
    let aligner = GlobalAligner::new(config.global.params()).map_err(CliError::from)?;

    let sentences = load_pairs(input)?;
    let filter = filter_for(input, &config.filter.length_filter());
    let mut dictionary = Dictionary::new();
    let encoded = encode_pairs(&mut dictionary, &sentences, filter.as_ref())?;

    log::info!(
        "Aligning {} pairs globally (gap penalty {})",
        encoded.pairs.len(),
        config.global.gap_penalty
    );

    let sim = config.similarity.build(dictionary.words());
    let results = align_global_pairs(&aligner, &encoded.pairs, &sim);

    for (line, result) in encoded.lines.iter().zip(results) {
        let alignment = result
            .map_err(CliError::from)
            .with_context(|| format!("Failed to align pair on line {}", line))?;
        let rendered = AlignmentCodec::render(&alignment, &dictionary).map_err(CliError::from)?;

        match input.format {
            OutputFormat::Text => {
                writeln!(out, "# line {}  score {}", line, alignment.score)?;
                writeln!(out, "{}", rendered.line_a())?;
                writeln!(out, "{}", rendered.line_b())?;
            }
            OutputFormat::Json => {
                let report = GlobalReport {
                    line: *line,
                    score: alignment.score,
                    text_a: rendered.line_a(),
                    text_b: rendered.line_b(),
                    alignment: &alignment,
                };
                serde_json::to_writer(&mut *out, &report).context("Failed to write JSON output")?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
