//! Configuration handling for the sentalign CLI
//!
//! Supports loading configuration from sentalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sentalign_core::{ChainParams, GlobalParams, LengthFilter, LocalParams};

use crate::similarity::EditDistanceSimilarity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Score of two identical words
    #[serde(default = "default_match_score")]
    pub match_score: f64,

    /// Score of two completely different words
    #[serde(default = "default_mismatch_score")]
    pub mismatch_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Penalty for each gap column
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Score of an insertion or deletion
    #[serde(default = "default_gap_penalty")]
    pub indel_score: f64,

    /// Minimum cell score for a candidate match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Multiplier for exact keyword matches
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f64,

    /// Maximum number of fragments reported per pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fragments: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Shortest sentence (in words) aligned from a pairs file
    #[serde(default = "default_min_len")]
    pub min_len: usize,

    /// Longest sentence (in words) aligned from a pairs file
    #[serde(default = "default_max_len", skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_match_score() -> f64 { 10.0 }
fn default_mismatch_score() -> f64 { -10.0 }
fn default_gap_penalty() -> f64 { -3.0 }
fn default_threshold() -> f64 { 10.0 }
fn default_keyword_boost() -> f64 { sentalign_core::KEYWORD_BOOST }
fn default_min_len() -> usize { 3 }
fn default_max_len() -> Option<usize> { Some(200) }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: default_threads() }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch_score: default_mismatch_score(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self { gap_penalty: default_gap_penalty() }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            indel_score: default_gap_penalty(),
            threshold: default_threshold(),
            keyword_boost: default_keyword_boost(),
            max_fragments: None,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_len: default_min_len(),
            max_len: default_max_len(),
        }
    }
}

impl SimilarityConfig {
    pub fn build<'a>(&self, words: &'a [String]) -> EditDistanceSimilarity<'a> {
        EditDistanceSimilarity::new(words, self.match_score, self.mismatch_score)
    }
}

impl GlobalConfig {
    pub fn params(&self) -> GlobalParams {
        GlobalParams { gap_penalty: self.gap_penalty }
    }
}

impl LocalConfig {
    pub fn params(&self) -> LocalParams {
        LocalParams {
            indel_score: self.indel_score,
            threshold: self.threshold,
            keyword_boost: self.keyword_boost,
        }
    }

    pub fn chain_params(&self) -> ChainParams {
        ChainParams { max_fragments: self.max_fragments }
    }
}

impl FilterConfig {
    pub fn length_filter(&self) -> LengthFilter {
        LengthFilter::new(self.min_len, self.max_len)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("sentalign.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: sentalign.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }
}
