//! Input abstraction for corpus reading
//!
//! The parser itself only requires a lazy, forward-only sequence of decoded
//! lines (`Iterator<Item = io::Result<String>>`). [`Input`] is the provided
//! implementation of that contract for the common sources; network
//! retrieval, caching and decompression belong to outer collaborators.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::PathBuf;

/// A source of corpus text.
pub enum Input {
    /// Direct text string
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Bytes to process as UTF-8 text
    Bytes(Vec<u8>),
    /// Reader stream (stdin, sockets, decompressors, …)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string.
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Turn the input into its lazy line sequence.
    ///
    /// Opens the underlying source; for files this is where a missing path
    /// surfaces. The returned iterator holds the open handle and releases it
    /// when dropped.
    pub fn into_lines(self) -> io::Result<Lines> {
        let reader: Box<dyn BufRead + Send> = match self {
            Input::Text(text) => Box::new(Cursor::new(text.into_bytes())),
            Input::Bytes(bytes) => Box::new(Cursor::new(bytes)),
            Input::File(path) => Box::new(BufReader::new(File::open(path)?)),
            Input::Reader(reader) => Box::new(BufReader::new(reader)),
        };
        Ok(Lines {
            inner: reader.lines(),
        })
    }

    /// Estimated size of the input in bytes, if it can be determined without
    /// reading. Used for progress reporting.
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            Input::Text(text) => Some(text.len() as u64),
            Input::Bytes(bytes) => Some(bytes.len() as u64),
            Input::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            Input::Reader(_) => None,
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

/// Lazy sequence of decoded lines over an opened [`Input`].
pub struct Lines {
    inner: io::Lines<Box<dyn BufRead + Send>>,
}

impl std::fmt::Debug for Lines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lines").finish_non_exhaustive()
    }
}

impl Iterator for Lines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
