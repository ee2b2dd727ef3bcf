//! Streaming reader for the CETEM Público annotated corpus
//!
//! Parses the corpus's line-oriented, pseudo-markup format (`extract >
//! {title|authors|paragraph > sentence > {token|multi-word-expression}}`,
//! one annotated token per line) into a hierarchical document model,
//! exposed as single-pass lazy iterators at a caller-selected granularity:
//! whole extracts, paragraphs, sentences, tokens or raw lines. The corpus
//! is never materialized in memory; a pass holds at most the largest entity
//! of the requested level.
//!
//! ```no_run
//! use cetem_core::CorpusReader;
//!
//! # fn main() -> cetem_core::Result<()> {
//! for sentence in CorpusReader::from_path("CETEMPublicoAnotado2019.txt")?.sentences() {
//!     let sentence = sentence?;
//!     println!("{} tokens", sentence.items.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod entity;
pub mod error;
pub mod granularity;
pub mod input;
mod parser;
pub mod reader;
pub mod tag;

// Re-export key types
pub use config::{CorpusConfig, CorpusConfigBuilder, MwePolicy};
pub use entity::{
    Authors, Block, Extract, MultiWordExpression, Paragraph, Sentence, SentenceItem, Title, Token,
};
pub use error::{CorpusError, Result};
pub use granularity::{Emission, Granularity};
pub use input::{Input, Lines};
pub use reader::CorpusReader;

use std::path::Path;

// Convenience functions

/// Iterate over the extracts of a corpus file with default configuration.
pub fn extracts_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<impl Iterator<Item = Result<Extract>>> {
    Ok(CorpusReader::from_path(path)?.extracts())
}

/// Iterate over the sentences of a corpus file with default configuration.
pub fn sentences_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<impl Iterator<Item = Result<Sentence>>> {
    Ok(CorpusReader::from_path(path)?.sentences())
}

/// Iterate over the tokens of a corpus file with default configuration.
pub fn tokens_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<impl Iterator<Item = Result<SentenceItem>>> {
    Ok(CorpusReader::from_path(path)?.tokens())
}
