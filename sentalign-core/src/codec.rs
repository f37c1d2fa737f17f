//! Presentation of symbol alignments as padded text columns.
//!
//! Rendering never changes the number of columns or where the gaps are; it
//! only pads each column to the width of its wider word.

use crate::error::{AlignError, AlignResult};
use crate::types::{Alignment, Symbol, GAP};
use std::collections::HashMap;

const PAD: char = '_';

/// Maps symbol codes back to word forms
pub trait SymbolLookup {
    fn word(&self, symbol: Symbol) -> Option<&str>;
}

impl SymbolLookup for [String] {
    fn word(&self, symbol: Symbol) -> Option<&str> {
        usize::try_from(symbol)
            .ok()
            .and_then(|idx| self.get(idx))
            .map(String::as_str)
    }
}

impl SymbolLookup for Vec<String> {
    fn word(&self, symbol: Symbol) -> Option<&str> {
        self.as_slice().word(symbol)
    }
}

impl SymbolLookup for HashMap<Symbol, String> {
    fn word(&self, symbol: Symbol) -> Option<&str> {
        self.get(&symbol).map(String::as_str)
    }
}

/// Column-aligned text form of an [`Alignment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAlignment {
    pub columns_a: Vec<String>,
    pub columns_b: Vec<String>,
}

impl RenderedAlignment {
    pub fn len(&self) -> usize {
        self.columns_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns_a.is_empty()
    }

    pub fn line_a(&self) -> String {
        self.columns_a.join(" ")
    }

    pub fn line_b(&self) -> String {
        self.columns_b.join(" ")
    }
}

pub struct AlignmentCodec;

impl AlignmentCodec {
    /// Render both rows, padding each column with underscores
    pub fn render<L>(alignment: &Alignment, lookup: &L) -> AlignResult<RenderedAlignment>
    where
        L: SymbolLookup + ?Sized,
    {
        let mut columns_a = Vec::with_capacity(alignment.len());
        let mut columns_b = Vec::with_capacity(alignment.len());

        for (a, b) in alignment.columns() {
            let word_a = Self::resolve(a, lookup)?;
            let word_b = Self::resolve(b, lookup)?;

            let width = word_a
                .map_or(0, |w| w.chars().count())
                .max(word_b.map_or(0, |w| w.chars().count()))
                .max(1);

            columns_a.push(pad(word_a.unwrap_or(""), width));
            columns_b.push(pad(word_b.unwrap_or(""), width));
        }

        Ok(RenderedAlignment {
            columns_a,
            columns_b,
        })
    }

    fn resolve<L>(symbol: Symbol, lookup: &L) -> AlignResult<Option<&str>>
    where
        L: SymbolLookup + ?Sized,
    {
        if symbol == GAP {
            return Ok(None);
        }
        lookup
            .word(symbol)
            .map(Some)
            .ok_or(AlignError::UnknownSymbol(symbol))
    }
}

fn pad(word: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    out.push_str(word);
    out.extend(std::iter::repeat(PAD).take(width - word.chars().count()));
    out
}
