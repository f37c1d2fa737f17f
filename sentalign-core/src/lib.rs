//! sentalign core library
//!
//! Dynamic-programming alignment of integer-coded sentences: a global
//! Needleman-Wunsch aligner, a multi-region Smith-Waterman aligner with greedy
//! chaining of its candidate matches, and a thin text codec for the result.
//! Word similarity, tokenization and the symbol dictionary are supplied by the
//! caller.

pub mod error;
pub mod types;
pub mod similarity;
pub mod matrix;
pub mod global;
pub mod local;
pub mod chain;
pub mod codec;
pub mod filter;
pub mod batch;

// Re-export commonly used types and functions
pub use error::{AlignError, AlignResult};
pub use types::{validate_sequence, Alignment, LocalAlignment, Match, Symbol, GAP};
pub use similarity::{FnSimilarity, MatchMismatch, Similarity, SimilarityError};
pub use matrix::{BoundaryMode, DirectionMask, ScoreMatrix};
pub use global::{global_align, GlobalAligner, GlobalParams};
pub use local::{local_align, LocalAligner, LocalParams, KEYWORD_BOOST};
pub use chain::{ChainParams, MatchChainer};
pub use codec::{AlignmentCodec, RenderedAlignment, SymbolLookup};
pub use filter::LengthFilter;

/// Version information for the sentalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
