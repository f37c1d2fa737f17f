//! Local command implementation - non-overlapping similar regions of sentence pairs

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use sentalign_core::batch::align_local_pairs;
use sentalign_core::{AlignmentCodec, LocalAligner, LocalAlignment, MatchChainer, Symbol};

use crate::commands::{encode_pairs, filter_for, load_pairs};
use crate::config::Config;
use crate::dictionary::{tokenize, Dictionary};
use crate::error::CliError;
use crate::{OutputFormat, PairArgs};

#[derive(Debug, Serialize)]
struct FragmentReport<'a> {
    line: usize,
    text_a: String,
    text_b: String,
    #[serde(flatten)]
    fragment: &'a LocalAlignment,
}

/// Resolve keywords against the dictionary built from the input.
/// A keyword that never occurs cannot match, so it is dropped with a warning.
pub fn keyword_symbols(dictionary: &Dictionary, keywords: &[String]) -> BTreeSet<Symbol> {
    let mut symbols = BTreeSet::new();

    for word in keywords.iter().flat_map(|k| tokenize(k)) {
        match dictionary.code(&word) {
            Some(code) => {
                symbols.insert(code);
            }
            None => log::warn!("Keyword '{}' does not occur in the input", word),
        }
    }

    symbols
}

pub fn execute(config: &Config, input: &PairArgs, keywords: &[String]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(config, input, keywords, &mut out)
}

pub fn run<W: Write>(
    config: &Config,
    input: &PairArgs,
    keywords: &[String],
    out: &mut W,
) -> Result<()> {
    let aligner = LocalAligner::new(config.local.params()).map_err(CliError::from)?;
    let chainer = MatchChainer::new(config.local.chain_params());

    let sentences = load_pairs(input)?;
    let filter = filter_for(input, &config.filter.length_filter());
    let mut dictionary = Dictionary::new();
    let encoded = encode_pairs(&mut dictionary, &sentences, filter.as_ref())?;

    let keyword_set = keyword_symbols(&dictionary, keywords);
    let keyword_set = (!keyword_set.is_empty()).then_some(&keyword_set);

    log::info!(
        "Aligning {} pairs locally (indel {}, threshold {})",
        encoded.pairs.len(),
        config.local.indel_score,
        config.local.threshold
    );

    let sim = config.similarity.build(dictionary.words());
    let results = align_local_pairs(&aligner, &chainer, &encoded.pairs, &sim, keyword_set);

    for (line, result) in encoded.lines.iter().zip(results) {
        let fragments = result
            .map_err(CliError::from)
            .with_context(|| format!("Failed to align pair on line {}", line))?;

        if fragments.is_empty() && input.format == OutputFormat::Text {
            writeln!(out, "# line {}  no fragments", line)?;
            continue;
        }

        for fragment in &fragments {
            let rendered =
                AlignmentCodec::render(&fragment.alignment, &dictionary).map_err(CliError::from)?;
            let region = &fragment.region;

            match input.format {
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "# line {}  fragment {}  score {}  a[{}..={}]  b[{}..={}]",
                        line,
                        fragment.id,
                        region.score,
                        region.from_a,
                        region.to_a,
                        region.from_b,
                        region.to_b
                    )?;
                    writeln!(out, "{}", rendered.line_a())?;
                    writeln!(out, "{}", rendered.line_b())?;
                }
                OutputFormat::Json => {
                    let report = FragmentReport {
                        line: *line,
                        text_a: rendered.line_a(),
                        text_b: rendered.line_b(),
                        fragment,
                    };
                    serde_json::to_writer(&mut *out, &report)
                        .context("Failed to write JSON output")?;
                    writeln!(out)?;
                }
            }
        }
    }

    Ok(())
}
