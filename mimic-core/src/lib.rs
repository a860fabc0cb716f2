//! Corpus-pastiche text generation library.
//!
//! This crate builds a word-level Markov model from a corpus of short posts
//! and samples pastiche text from it, including:
//! - Corpus filtering and whitespace tokenization
//! - An n-gram windowing utility with sentinel padding
//! - Suffix-count and frequency statistics with additive merging
//! - A part-of-speech-weighted next-word sampler
//! - A bounded-length generation loop
//!
//! The part-of-speech classifier is a seam (`PosTagger`), not an algorithm:
//! callers plug in a lexicon-backed tagger or any closure.

/// Core statistics and generation logic.
pub mod model;

/// Typed errors shared across the crate.
pub mod error;

/// I/O utilities (JSON tables, corpus loading, cache paths).
pub mod io;

pub use error::ModelError;
