//! The public corpus reading API
//!
//! [`CorpusReader`] wraps a line source and a [`CorpusConfig`] and offers
//! one entry point per granularity. Each entry point consumes the reader
//! and returns a lazy, finite-until-input-exhausted, non-restartable
//! iterator; a fresh reader is needed for another pass.

use std::io;
use std::path::Path;

use crate::config::CorpusConfig;
use crate::entity::{Block, Extract, Sentence, SentenceItem};
use crate::error::Result;
use crate::granularity::Granularity;
use crate::input::{Input, Lines};
use crate::parser::{Emitted, Parse};

/// Single-pass reader over an annotated corpus.
#[derive(Debug)]
pub struct CorpusReader<I> {
    lines: I,
    config: CorpusConfig,
}

impl CorpusReader<Lines> {
    /// Open a corpus file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_input(Input::from_file(path.as_ref()))
    }

    /// Read a corpus held in memory.
    pub fn from_text<S: Into<String>>(text: S) -> Result<Self> {
        Self::from_input(Input::from_text(text))
    }

    /// Read a corpus from a raw byte stream (stdin, a decompressor, …).
    pub fn from_reader<R: io::Read + Send + 'static>(reader: R) -> Result<Self> {
        Self::from_input(Input::from_reader(reader))
    }

    /// Read a corpus from any [`Input`].
    pub fn from_input(input: Input) -> Result<Self> {
        Ok(Self {
            lines: input.into_lines()?,
            config: CorpusConfig::default(),
        })
    }
}

impl<I> CorpusReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Wrap an arbitrary line source satisfying the input contract.
    pub fn from_lines(lines: I) -> Self {
        Self {
            lines,
            config: CorpusConfig::default(),
        }
    }

    /// Replace the configuration for this pass.
    pub fn with_config(mut self, config: CorpusConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Iterate over whole extracts.
    pub fn extracts(self) -> Extracts<I> {
        Extracts {
            parse: self.parse(Granularity::Extract),
        }
    }

    /// Iterate over titles, authors and paragraphs.
    pub fn paragraphs(self) -> Paragraphs<I> {
        Paragraphs {
            parse: self.parse(Granularity::Paragraph),
        }
    }

    /// Iterate over sentences.
    pub fn sentences(self) -> Sentences<I> {
        Sentences {
            parse: self.parse(Granularity::Sentence),
        }
    }

    /// Iterate over tokens and multi-word expressions, subject to the
    /// configured MWE policy.
    pub fn tokens(self) -> Tokens<I> {
        Tokens {
            parse: self.parse(Granularity::Token),
        }
    }

    /// Iterate over every raw input line, with structural validation still
    /// applied.
    pub fn lines(self) -> RawLines<I> {
        RawLines {
            parse: self.parse(Granularity::Line),
        }
    }

    fn parse(self, granularity: Granularity) -> Parse<I> {
        Parse::new(self.lines, granularity, self.config)
    }
}

macro_rules! granular_iterator {
    ($(#[$doc:meta])* $name:ident, $item:ty, $variant:ident) => {
        $(#[$doc])*
        pub struct $name<I> {
            parse: Parse<I>,
        }

        impl<I> Iterator for $name<I>
        where
            I: Iterator<Item = io::Result<String>>,
        {
            type Item = Result<$item>;

            fn next(&mut self) -> Option<Self::Item> {
                loop {
                    match self.parse.next()? {
                        Ok(Emitted::$variant(value)) => return Some(Ok(value)),
                        // The machine only emits this variant at this
                        // granularity; anything else is skipped.
                        Ok(_) => continue,
                        Err(err) => return Some(Err(err)),
                    }
                }
            }
        }
    };
}

granular_iterator!(
    /// Lazy sequence of extracts.
    Extracts, Extract, Extract
);
granular_iterator!(
    /// Lazy sequence of titles, authors and paragraphs.
    Paragraphs, Block, Block
);
granular_iterator!(
    /// Lazy sequence of sentences.
    Sentences, Sentence, Sentence
);
granular_iterator!(
    /// Lazy sequence of tokens and multi-word expressions.
    Tokens, SentenceItem, Item
);
granular_iterator!(
    /// Lazy sequence of raw input lines.
    RawLines, String, Line
);
