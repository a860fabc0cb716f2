//! Top-level module for the pastiche generation system.
//!
//! This module groups the two pipelines that share one data model:
//! - Corpus analysis (`corpus`, `ngram`, `stats`, `analyzer`)
//! - Generation (`pos`, `sampler`, `generator`)

/// Corpus records, the filtering policy and whitespace tokenization.
pub mod corpus;

/// Sliding-window n-gram construction with sentinel padding.
pub mod ngram;

/// Suffix-count and frequency tables with additive merging.
pub mod stats;

/// Corpus-wide analysis: parallel per-text table building plus a
/// binary cache for fast reloading.
pub mod analyzer;

/// Part-of-speech seam: the `PosTagger` trait, a lexicon-backed tagger
/// and the read-only aggregate tables.
pub mod pos;

/// Next-word sampling with part-of-speech group weighting.
pub mod sampler;

/// High-level interface for generating bounded-length texts.
pub mod generator;

pub use ngram::EMPTY_TOKEN;
