//! Word tokenization and the word <-> symbol dictionary
//!
//! Codes are handed out in first-seen order, starting at 0, so the same
//! input always produces the same symbols.

use sentalign_core::{Symbol, SymbolLookup};
use std::collections::HashMap;

use crate::error::{CliError, CliResult};

/// Lowercase, split on whitespace and strip ASCII punctuation.
/// Tokens that are pure punctuation disappear.
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|raw| {
            raw.chars()
                .filter(|c| !c.is_ascii_punctuation())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    codes: HashMap<String, Symbol>,
    words: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// All words, indexed by their code
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn code(&self, word: &str) -> Option<Symbol> {
        self.codes.get(word).copied()
    }

    /// Return the code of `word`, assigning the next free one if it is new
    pub fn intern(&mut self, word: &str) -> CliResult<Symbol> {
        if let Some(code) = self.code(word) {
            return Ok(code);
        }

        let code = Symbol::try_from(self.words.len())
            .map_err(|_| CliError::validation("dictionary exceeds the symbol range"))?;
        self.codes.insert(word.to_string(), code);
        self.words.push(word.to_string());
        Ok(code)
    }

    /// Tokenize and encode a sentence
    pub fn encode(&mut self, sentence: &str) -> CliResult<Vec<Symbol>> {
        tokenize(sentence)
            .iter()
            .map(|token| self.intern(token))
            .collect()
    }
}

impl SymbolLookup for Dictionary {
    fn word(&self, symbol: Symbol) -> Option<&str> {
        self.words.word(symbol)
    }
}
