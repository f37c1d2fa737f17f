//! Command implementations for the sentalign CLI
//!
//! Both commands share the same front half: collect sentence pairs, encode
//! them through one [`Dictionary`], and drop pairs the length filter rejects
//! when reading a corpus file.

pub mod global;
pub mod local;

use anyhow::{Context, Result};
use sentalign_core::batch::SequencePair;
use sentalign_core::LengthFilter;
use std::path::Path;

use crate::dictionary::Dictionary;
use crate::error::{CliError, CliResult};
use crate::PairArgs;

/// One input pair with the line it came from (1 for command-line sentences)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub line: usize,
    pub sent_a: String,
    pub sent_b: String,
}

/// Encoded pairs ready for alignment, parallel to their source lines
#[derive(Debug, Default)]
pub struct EncodedPairs {
    pub lines: Vec<usize>,
    pub pairs: Vec<SequencePair>,
}

/// Collect the pairs named on the command line, or read them from `--pairs`
pub fn load_pairs(input: &PairArgs) -> Result<Vec<SentencePair>> {
    if let Some(path) = &input.pairs {
        return read_pairs_file(path);
    }

    match (&input.sent_a, &input.sent_b) {
        (Some(sent_a), Some(sent_b)) => Ok(vec![SentencePair {
            line: 1,
            sent_a: sent_a.clone(),
            sent_b: sent_b.clone(),
        }]),
        _ => Err(CliError::validation("two sentences or --pairs FILE are required").into()),
    }
}

pub fn read_pairs_file(path: &Path) -> Result<Vec<SentencePair>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()).into());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pairs file: {}", path.display()))?;
    let pairs = parse_pairs(&content, &path.display().to_string())?;

    log::info!("Read {} sentence pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Parse tab-separated pairs. Blank lines and `#` comments are skipped.
pub fn parse_pairs(content: &str, file: &str) -> CliResult<Vec<SentencePair>> {
    let mut pairs = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim_end_matches('\r');
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(sent_a), Some(sent_b), None) => pairs.push(SentencePair {
                line,
                sent_a: sent_a.to_string(),
                sent_b: sent_b.to_string(),
            }),
            _ => {
                return Err(CliError::parse(
                    file,
                    format!("line {}: expected two tab-separated sentences", line),
                ))
            }
        }
    }

    Ok(pairs)
}

/// Encode every pair; with a filter, pairs outside its bounds are skipped
pub fn encode_pairs(
    dictionary: &mut Dictionary,
    sentences: &[SentencePair],
    filter: Option<&LengthFilter>,
) -> CliResult<EncodedPairs> {
    let mut encoded = EncodedPairs::default();

    for pair in sentences {
        let seq_a = dictionary.encode(&pair.sent_a)?;
        let seq_b = dictionary.encode(&pair.sent_b)?;

        if let Some(filter) = filter {
            if let Err(reason) = filter.check(&seq_a, &seq_b) {
                log::warn!("Skipping pair on line {}: {}", pair.line, reason);
                continue;
            }
        }

        encoded.lines.push(pair.line);
        encoded.pairs.push((seq_a, seq_b));
    }

    log::debug!(
        "Encoded {} of {} pairs, dictionary holds {} words",
        encoded.pairs.len(),
        sentences.len(),
        dictionary.len()
    );
    Ok(encoded)
}

/// The filter only guards corpus input; sentences given directly are always aligned
pub fn filter_for(input: &PairArgs, filter: &LengthFilter) -> Option<LengthFilter> {
    input.pairs.as_ref().map(|_| *filter)
}
