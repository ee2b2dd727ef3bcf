//! Output formatting module

use std::fmt;

use anyhow::Result;
use cetem_core::{Block, Extract, Sentence, SentenceItem};
use serde::Serialize;

/// One emitted entity, at whatever granularity the run requested.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Record {
    /// Whole extract
    Extract(Extract),
    /// Title, authors or paragraph
    Block(Block),
    /// Sentence
    Sentence(Sentence),
    /// Token or multi-word expression
    Item(SentenceItem),
    /// Raw input line
    Line(String),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Extract(extract) => write!(f, "{extract}"),
            Record::Block(block) => write!(f, "{block}"),
            Record::Sentence(sentence) => write!(f, "{sentence}"),
            Record::Item(item) => write!(f, "{item}"),
            Record::Line(line) => writeln!(f, "{line}"),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single record
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize output (flush buffers)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
