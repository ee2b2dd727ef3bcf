//! The corpus document model
//!
//! Ordered-children trees built by the parser: every entity is constructed
//! exactly once, when its closing tag is observed, and never mutated
//! afterwards. A parent exclusively owns its children; nothing is shared
//! between two parents and there are no back-references.
//!
//! Each entity implements [`std::fmt::Display`] with its canonical markup
//! rendering, one tag or token per line. Fidelity is at the level of
//! semantic fields, not byte-exact whitespace or attribute ordering.

use std::fmt;

use crate::tag::AttrList;

/// One annotated token: a single data line of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Source line number (1-based)
    pub line: u64,
    /// 1-based position within the immediate token-bearing container;
    /// resets at each sentence, title or authors start
    pub position: u32,
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
    /// Trailing extra fields, in source order
    pub extra: Vec<String>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.word, self.section, self.week, self.lemma, self.pos
        )?;
        for field in &self.extra {
            write!(f, "\t{field}")?;
        }
        Ok(())
    }
}

/// An annotated span of tokens treated as one lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiWordExpression {
    /// Attribute list from the opening tag, in source order
    pub attrs: AttrList,
    /// Constituent tokens, in source order
    pub tokens: Vec<Token>,
}

impl MultiWordExpression {
    /// Look up an attribute by key (first occurrence).
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `lema` attribute, empty if absent.
    pub fn lemma(&self) -> &str {
        self.attr("lema").unwrap_or("")
    }

    /// The `pos` attribute, empty if absent.
    pub fn pos(&self) -> &str {
        self.attr("pos").unwrap_or("")
    }
}

impl fmt::Display for MultiWordExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<mwe")?;
        for (key, value) in &self.attrs {
            write!(f, " {key}={value}")?;
        }
        writeln!(f, ">")?;
        for token in &self.tokens {
            writeln!(f, "{token}")?;
        }
        writeln!(f, "</mwe>")
    }
}

/// Child of a sentence, title or authors region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SentenceItem {
    /// A plain token
    Token(Token),
    /// A multi-word expression
    Mwe(MultiWordExpression),
}

impl SentenceItem {
    /// Tokens of this item: one for a plain token, the constituents for an MWE.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        match self {
            SentenceItem::Token(token) => std::slice::from_ref(token).iter(),
            SentenceItem::Mwe(mwe) => mwe.tokens.iter(),
        }
    }
}

impl fmt::Display for SentenceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceItem::Token(token) => writeln!(f, "{token}"),
            SentenceItem::Mwe(mwe) => write!(f, "{mwe}"),
        }
    }
}

/// One sentence of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentence {
    /// 1-based sequence id within the paragraph
    pub id: u32,
    /// Tokens and multi-word expressions, in source order
    pub items: Vec<SentenceItem>,
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<s>")?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        writeln!(f, "</s>")
    }
}

/// Extract title region (`<t>…</t>`), at most one per extract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    /// Tokens and multi-word expressions, in source order
    pub items: Vec<SentenceItem>,
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<t>")?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        writeln!(f, "</t>")
    }
}

/// Extract authors region (`<a>…</a>`), at most one per extract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Authors {
    /// Tokens and multi-word expressions, in source order
    pub items: Vec<SentenceItem>,
}

impl fmt::Display for Authors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<a>")?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        writeln!(f, "</a>")
    }
}

/// One paragraph of an extract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paragraph {
    /// Source paragraph identifier (opaque string, not necessarily numeric)
    pub id: String,
    /// Sentences in source order
    pub sentences: Vec<Sentence>,
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<p par={}>", self.id)?;
        for sentence in &self.sentences {
            write!(f, "{sentence}")?;
        }
        writeln!(f, "</p>")
    }
}

/// Direct child of an extract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// Title region
    Title(Title),
    /// Authors region
    Authors(Authors),
    /// Paragraph
    Paragraph(Paragraph),
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Title(title) => write!(f, "{title}"),
            Block::Authors(authors) => write!(f, "{authors}"),
            Block::Paragraph(paragraph) => write!(f, "{paragraph}"),
        }
    }
}

/// Top-level corpus unit, roughly one article (`<ext>…</ext>`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extract {
    /// Extract ordinal (`n` attribute)
    pub n: String,
    /// Corpus section (`sec` attribute)
    pub section: String,
    /// Corpus week (`sem` attribute)
    pub week: String,
    /// Title, authors and paragraphs, in source order
    pub blocks: Vec<Block>,
}

impl Extract {
    /// Paragraphs of this extract, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    /// The title region, if present.
    pub fn title(&self) -> Option<&Title> {
        self.blocks.iter().find_map(|block| match block {
            Block::Title(title) => Some(title),
            _ => None,
        })
    }

    /// The authors region, if present.
    pub fn authors(&self) -> Option<&Authors> {
        self.blocks.iter().find_map(|block| match block {
            Block::Authors(authors) => Some(authors),
            _ => None,
        })
    }
}

impl fmt::Display for Extract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<ext n={} sec={} sem={}>", self.n, self.section, self.week)?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        writeln!(f, "</ext>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(word: &str, position: u32) -> Token {
        Token {
            line: 1,
            position,
            word: word.to_string(),
            section: "pol".to_string(),
            week: "1".to_string(),
            lemma: word.to_string(),
            pos: "NCMS".to_string(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_token_display_tab_joined() {
        let mut t = token("casa", 1);
        t.extra = vec!["X".to_string(), "Y".to_string()];
        assert_eq!(t.to_string(), "casa\tpol\t1\tcasa\tNCMS\tX\tY");
    }

    #[test]
    fn test_sentence_display_wraps_tokens() {
        let sentence = Sentence {
            id: 1,
            items: vec![
                SentenceItem::Token(token("a", 1)),
                SentenceItem::Token(token("casa", 2)),
            ],
        };
        assert_eq!(
            sentence.to_string(),
            "<s>\na\tpol\t1\ta\tNCMS\ncasa\tpol\t1\tcasa\tNCMS\n</s>\n"
        );
    }

    #[test]
    fn test_mwe_display_preserves_attr_order() {
        let mwe = MultiWordExpression {
            attrs: vec![
                ("lema".to_string(), "de_facto".to_string()),
                ("pos".to_string(), "ADV".to_string()),
            ],
            tokens: vec![token("de", 1), token("facto", 2)],
        };
        let rendered = mwe.to_string();
        assert!(rendered.starts_with("<mwe lema=de_facto pos=ADV>\n"));
        assert!(rendered.ends_with("</mwe>\n"));
    }

    #[test]
    fn test_mwe_attr_accessors() {
        let mwe = MultiWordExpression {
            attrs: vec![("lema".to_string(), "ao_lado".to_string())],
            tokens: Vec::new(),
        };
        assert_eq!(mwe.lemma(), "ao_lado");
        assert_eq!(mwe.pos(), "");
        assert_eq!(mwe.attr("missing"), None);
    }

    #[test]
    fn test_extract_display_and_accessors() {
        let extract = Extract {
            n: "3".to_string(),
            section: "soc".to_string(),
            week: "2".to_string(),
            blocks: vec![
                Block::Title(Title {
                    items: vec![SentenceItem::Token(token("título", 1))],
                }),
                Block::Paragraph(Paragraph {
                    id: "a1".to_string(),
                    sentences: vec![Sentence {
                        id: 1,
                        items: vec![SentenceItem::Token(token("casa", 1))],
                    }],
                }),
            ],
        };

        assert!(extract.title().is_some());
        assert!(extract.authors().is_none());
        assert_eq!(extract.paragraphs().count(), 1);

        let rendered = extract.to_string();
        assert!(rendered.starts_with("<ext n=3 sec=soc sem=2>\n<t>\n"));
        assert!(rendered.contains("<p par=a1>\n<s>\n"));
        assert!(rendered.ends_with("</s>\n</p>\n</ext>\n"));
    }

    #[test]
    fn test_sentence_item_tokens_flattens_mwe() {
        let item = SentenceItem::Mwe(MultiWordExpression {
            attrs: Vec::new(),
            tokens: vec![token("de", 1), token("facto", 2)],
        });
        let words: Vec<&str> = item.tokens().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["de", "facto"]);
    }
}
