//! Line classification for the corpus markup
//!
//! Maps one raw line to exactly one [`Tag`]. Recognized tags may be preceded
//! by whitespace; tag-like lines that are none of the known tags classify as
//! [`Tag::Ignorable`]. Everything else is a tab-separated data line carrying
//! one annotated token.

use crate::error::{CorpusError, Result};

/// Ordered `key=value` attribute list parsed from an opening tag.
///
/// No quoting or escaping: a value runs from the `=` to the next whitespace
/// (or end of the attribute list). Order is preserved so serialization can
/// reproduce it.
pub type AttrList = Vec<(String, String)>;

/// Fields of one data line: the five fixed columns plus trailing extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFields {
    /// Surface word form
    pub word: String,
    /// Corpus section
    pub section: String,
    /// Corpus week
    pub week: String,
    /// Lemma
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: String,
    /// Remaining tab-separated fields, in order
    pub extra: Vec<String>,
}

/// Classification of one raw corpus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `<ext n=… sec=… sem=…>`
    ExtractOpen(AttrList),
    /// `</ext>`
    ExtractClose,
    /// `<p par=…>`
    ParagraphOpen(String),
    /// `</p>`
    ParagraphClose,
    /// `<s>`
    SentenceOpen,
    /// `</s>`
    SentenceClose,
    /// `<t>`
    TitleOpen,
    /// `</t>`
    TitleClose,
    /// `<a>`
    AuthorsOpen,
    /// `</a>`
    AuthorsClose,
    /// `<mwe lema=… pos=…>`
    MweOpen(AttrList),
    /// `</mwe>`
    MweClose,
    /// Tag-like line that is none of the known tags
    Ignorable,
    /// One annotated token
    Data(DataFields),
}

impl Tag {
    /// Classify one line. `line_num` is only used to report malformed records.
    pub fn classify(line: &str, line_num: u64) -> Result<Tag> {
        let trimmed = line.trim();
        if trimmed.starts_with('<') {
            let tag = match trimmed
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
            {
                Some(inner) => classify_tag(inner),
                // No closing '>' on a tag-like line
                None => Tag::Ignorable,
            };
            return Ok(tag);
        }
        classify_data(line, line_num).map(Tag::Data)
    }
}

/// Classify the inside of a `<…>` pair.
fn classify_tag(inner: &str) -> Tag {
    match inner {
        "/ext" => return Tag::ExtractClose,
        "/p" => return Tag::ParagraphClose,
        "/s" => return Tag::SentenceClose,
        "/t" => return Tag::TitleClose,
        "/a" => return Tag::AuthorsClose,
        "/mwe" => return Tag::MweClose,
        "s" => return Tag::SentenceOpen,
        "t" => return Tag::TitleOpen,
        "a" => return Tag::AuthorsOpen,
        _ => {}
    }

    if let Some(rest) = strip_tag_name(inner, "ext") {
        return Tag::ExtractOpen(parse_attrs(rest));
    }
    if let Some(rest) = strip_tag_name(inner, "mwe") {
        return Tag::MweOpen(parse_attrs(rest));
    }
    if let Some(rest) = strip_tag_name(inner, "p") {
        if let Some(id) = rest.trim_start().strip_prefix("par=") {
            return Tag::ParagraphOpen(id.trim_end().to_string());
        }
    }

    Tag::Ignorable
}

/// Strip a tag name followed by whitespace (or end of tag body).
fn strip_tag_name<'a>(inner: &'a str, name: &str) -> Option<&'a str> {
    let rest = inner.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Parse a whitespace-separated `key=value` attribute list, keeping order.
///
/// A bare word without `=` becomes a key with an empty value.
pub fn parse_attrs(s: &str) -> AttrList {
    s.split_whitespace()
        .map(|attr| match attr.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (attr.to_string(), String::new()),
        })
        .collect()
}

fn classify_data(line: &str, line_num: u64) -> Result<DataFields> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(CorpusError::MalformedRecord {
            line: line_num,
            found: fields.len(),
        });
    }
    Ok(DataFields {
        word: fields[0].to_string(),
        section: fields[1].to_string(),
        week: fields[2].to_string(),
        lemma: fields[3].to_string(),
        pos: fields[4].to_string(),
        extra: fields[5..].iter().map(|f| f.to_string()).collect(),
    })
}
