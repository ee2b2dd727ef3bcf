//! The incremental parsing state machine
//!
//! Consumes a lazy sequence of classified lines and maintains an explicit
//! stack of typed accumulator frames: one frame is pushed for every opening
//! tag and popped-and-consumed at the matching close. At each closing
//! boundary the single [`Emission`] policy decides whether the finished
//! entity is yielded to the caller, attached to the enclosing frame, or
//! flattened past. Memory stays bounded by the largest entity materialized
//! for the requested granularity.

use std::collections::VecDeque;
use std::io;

use crate::config::{CorpusConfig, MwePolicy};
use crate::entity::{
    Authors, Block, Extract, MultiWordExpression, Paragraph, Sentence, SentenceItem, Title, Token,
};
use crate::error::{CorpusError, Result};
use crate::granularity::{Emission, Granularity};
use crate::tag::{AttrList, DataFields, Tag};

/// Entity produced by one parsing pass, at whatever level was requested.
#[derive(Debug)]
pub(crate) enum Emitted {
    Extract(Extract),
    Block(Block),
    Sentence(Sentence),
    Item(SentenceItem),
    Line(String),
}

/// In-progress accumulator for one open region.
#[derive(Debug)]
enum Frame {
    Extract {
        n: String,
        section: String,
        week: String,
        blocks: Vec<Block>,
    },
    Paragraph {
        id: String,
        sentences: Vec<Sentence>,
    },
    Sentence {
        id: u32,
        items: Vec<SentenceItem>,
    },
    Title {
        items: Vec<SentenceItem>,
    },
    Authors {
        items: Vec<SentenceItem>,
    },
    Mwe {
        attrs: AttrList,
        tokens: Vec<Token>,
    },
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Extract { .. } => "extract",
            Frame::Paragraph { .. } => "paragraph",
            Frame::Sentence { .. } => "sentence",
            Frame::Title { .. } => "title",
            Frame::Authors { .. } => "authors",
            Frame::Mwe { .. } => "multi-word expression",
        }
    }
}

/// Parser state: frame stack plus per-level counters.
#[derive(Debug)]
struct Machine {
    granularity: Granularity,
    config: CorpusConfig,
    stack: Vec<Frame>,
    line_num: u64,
    /// Sentence ordinal within the current paragraph (resets on `<p>`)
    sentence_seq: u32,
    /// Token position within the current token-bearing region
    /// (resets on `<s>`, `<t>` and `<a>`)
    token_pos: u32,
}

impl Machine {
    fn new(granularity: Granularity, config: CorpusConfig) -> Self {
        Self {
            granularity,
            config,
            stack: Vec::new(),
            line_num: 0,
            sentence_seq: 0,
            token_pos: 0,
        }
    }

    /// Process one line, appending anything emitted to `out`.
    fn feed(&mut self, line: &str, out: &mut VecDeque<Emitted>) -> Result<()> {
        self.line_num += 1;
        let line_num = self.line_num;

        match Tag::classify(line, line_num)? {
            Tag::ExtractOpen(attrs) => {
                let get = |key: &str| {
                    attrs
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default()
                };
                self.stack.push(Frame::Extract {
                    n: get("n"),
                    section: get("sec"),
                    week: get("sem"),
                    blocks: Vec::new(),
                });
            }
            Tag::ParagraphOpen(id) => {
                self.sentence_seq = 0;
                self.stack.push(Frame::Paragraph {
                    id,
                    sentences: Vec::new(),
                });
            }
            Tag::SentenceOpen => {
                self.sentence_seq += 1;
                self.token_pos = 0;
                self.stack.push(Frame::Sentence {
                    id: self.sentence_seq,
                    items: Vec::new(),
                });
            }
            Tag::TitleOpen => {
                self.token_pos = 0;
                self.stack.push(Frame::Title { items: Vec::new() });
            }
            Tag::AuthorsOpen => {
                self.token_pos = 0;
                self.stack.push(Frame::Authors { items: Vec::new() });
            }
            Tag::MweOpen(attrs) => {
                // MWEs never nest
                if matches!(self.stack.last(), Some(Frame::Mwe { .. })) {
                    return Err(CorpusError::unbalanced(
                        line_num,
                        "<mwe> opened inside an open multi-word expression",
                    ));
                }
                self.stack.push(Frame::Mwe {
                    attrs,
                    tokens: Vec::new(),
                });
            }
            Tag::ExtractClose => self.close_extract(line_num, out)?,
            Tag::ParagraphClose => self.close_paragraph(line_num, out)?,
            Tag::TitleClose => self.close_title(line_num, out)?,
            Tag::AuthorsClose => self.close_authors(line_num, out)?,
            Tag::SentenceClose => self.close_sentence(line_num, out)?,
            Tag::MweClose => self.close_mwe(line_num, out)?,
            Tag::Ignorable => {}
            Tag::Data(fields) => self.data_line(fields, line_num, out)?,
        }

        // Line granularity is a pass-through tap: every raw line verbatim,
        // interleaved with the structural pass above.
        if self.granularity == Granularity::Line {
            out.push_back(Emitted::Line(line.to_string()));
        }

        Ok(())
    }

    /// End-of-input check: any frame still open is an unterminated region.
    fn finish(&self) -> Result<()> {
        if let Some(frame) = self.stack.last() {
            return Err(CorpusError::unbalanced(
                self.line_num,
                format!("end of input with an unclosed {} region", frame.name()),
            ));
        }
        Ok(())
    }

    fn pop(&mut self, line: u64, closer: &str) -> Result<Frame> {
        self.stack
            .pop()
            .ok_or_else(|| CorpusError::unbalanced(line, format!("{closer} with no open region")))
    }

    fn mismatch(&self, line: u64, closer: &str, frame: &Frame) -> CorpusError {
        CorpusError::unbalanced(
            line,
            format!("{closer} found while a {} region is open", frame.name()),
        )
    }

    fn close_extract(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</ext>")? {
            Frame::Extract {
                n,
                section,
                week,
                blocks,
            } => {
                // Nothing encloses an extract, so the only non-trivial
                // emission here is a direct yield.
                if Emission::classify(self.granularity, Granularity::Extract) == Emission::Yield {
                    out.push_back(Emitted::Extract(Extract {
                        n,
                        section,
                        week,
                        blocks,
                    }));
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</ext>", &other)),
        }
    }

    fn close_paragraph(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</p>")? {
            Frame::Paragraph { id, sentences } => {
                match Emission::classify(self.granularity, Granularity::Paragraph) {
                    Emission::Yield => {
                        out.push_back(Emitted::Block(Block::Paragraph(Paragraph {
                            id,
                            sentences,
                        })))
                    }
                    Emission::Attach => {
                        self.attach_block(line, Block::Paragraph(Paragraph { id, sentences }))?
                    }
                    Emission::Discard => {}
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</p>", &other)),
        }
    }

    // Title and authors regions close at paragraph level: they are siblings
    // of paragraphs inside the extract.

    fn close_title(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</t>")? {
            Frame::Title { items } => {
                match Emission::classify(self.granularity, Granularity::Paragraph) {
                    Emission::Yield => {
                        if !self.config.suppress_titles {
                            out.push_back(Emitted::Block(Block::Title(Title { items })));
                        }
                    }
                    Emission::Attach => self.attach_block(line, Block::Title(Title { items }))?,
                    Emission::Discard => {}
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</t>", &other)),
        }
    }

    fn close_authors(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</a>")? {
            Frame::Authors { items } => {
                match Emission::classify(self.granularity, Granularity::Paragraph) {
                    Emission::Yield => {
                        if !self.config.suppress_authors {
                            out.push_back(Emitted::Block(Block::Authors(Authors { items })));
                        }
                    }
                    Emission::Attach => {
                        self.attach_block(line, Block::Authors(Authors { items }))?
                    }
                    Emission::Discard => {}
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</a>", &other)),
        }
    }

    /// Attach a finished block to the enclosing extract.
    fn attach_block(&mut self, line: u64, block: Block) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Extract { blocks, .. }) => {
                blocks.push(block);
                Ok(())
            }
            Some(frame) => {
                let name = frame.name();
                Err(CorpusError::unbalanced(
                    line,
                    format!("block closed inside a {name} region"),
                ))
            }
            None => Err(CorpusError::unbalanced(
                line,
                "block closed outside any extract",
            )),
        }
    }

    fn close_sentence(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</s>")? {
            Frame::Sentence { id, items } => {
                match Emission::classify(self.granularity, Granularity::Sentence) {
                    Emission::Yield => out.push_back(Emitted::Sentence(Sentence { id, items })),
                    Emission::Attach => match self.stack.last_mut() {
                        Some(Frame::Paragraph { sentences, .. }) => {
                            sentences.push(Sentence { id, items })
                        }
                        Some(frame) => {
                            let name = frame.name();
                            return Err(CorpusError::unbalanced(
                                line,
                                format!("sentence closed inside a {name} region"),
                            ));
                        }
                        None => {
                            return Err(CorpusError::unbalanced(
                                line,
                                "sentence closed outside any paragraph",
                            ))
                        }
                    },
                    Emission::Discard => {}
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</s>", &other)),
        }
    }

    fn close_mwe(&mut self, line: u64, out: &mut VecDeque<Emitted>) -> Result<()> {
        match self.pop(line, "</mwe>")? {
            Frame::Mwe { attrs, tokens } => {
                let mwe = MultiWordExpression { attrs, tokens };

                // Known corpus artifact: fully empty expressions are dropped
                // unconditionally, before any policy applies.
                if mwe.lemma().is_empty() && mwe.pos().is_empty() && mwe.tokens.is_empty() {
                    return Ok(());
                }

                match self.config.mwe_policy {
                    MwePolicy::Suppress => {}
                    MwePolicy::Simplify => {
                        // Constituents become ordinary tokens, each subject
                        // to the same granularity rule.
                        for token in mwe.tokens {
                            self.route_item(line, SentenceItem::Token(token), out)?;
                        }
                    }
                    MwePolicy::Keep => self.route_item(line, SentenceItem::Mwe(mwe), out)?,
                }
                Ok(())
            }
            other => Err(self.mismatch(line, "</mwe>", &other)),
        }
    }

    /// Token-level emission, shared by plain tokens and closed MWEs.
    fn route_item(
        &mut self,
        line: u64,
        item: SentenceItem,
        out: &mut VecDeque<Emitted>,
    ) -> Result<()> {
        match Emission::classify(self.granularity, Granularity::Token) {
            Emission::Yield => out.push_back(Emitted::Item(item)),
            Emission::Attach => match self.stack.last_mut() {
                Some(
                    Frame::Sentence { items, .. }
                    | Frame::Title { items }
                    | Frame::Authors { items },
                ) => items.push(item),
                Some(frame) => {
                    let name = frame.name();
                    return Err(CorpusError::unbalanced(
                        line,
                        format!("token inside a {name} region"),
                    ));
                }
                None => {
                    return Err(CorpusError::unbalanced(
                        line,
                        "token outside any sentence, title or authors region",
                    ))
                }
            },
            Emission::Discard => {}
        }
        Ok(())
    }

    fn data_line(
        &mut self,
        fields: DataFields,
        line: u64,
        out: &mut VecDeque<Emitted>,
    ) -> Result<()> {
        // A data line needs an open token-bearing region.
        if !matches!(
            self.stack.last(),
            Some(
                Frame::Mwe { .. }
                    | Frame::Sentence { .. }
                    | Frame::Title { .. }
                    | Frame::Authors { .. }
            )
        ) {
            return Err(CorpusError::unbalanced(
                line,
                "data line outside any sentence, title or authors region",
            ));
        }

        self.token_pos += 1;
        let token = Token {
            line,
            position: self.token_pos,
            word: fields.word,
            section: fields.section,
            week: fields.week,
            lemma: fields.lemma,
            pos: fields.pos,
            extra: fields.extra,
        };

        // Inside an MWE the token is captured by the expression's frame
        // instead of being routed to the enclosing region.
        if let Some(Frame::Mwe { tokens, .. }) = self.stack.last_mut() {
            tokens.push(token);
            return Ok(());
        }
        self.route_item(line, SentenceItem::Token(token), out)
    }
}

/// Pull iterator driving the machine over a line source.
///
/// The caller requests the next entity; the machine retains all accumulator
/// state between pulls. Dropping the iterator releases the line source.
/// After the first error the iterator is fused.
pub(crate) struct Parse<I> {
    lines: I,
    machine: Machine,
    pending: VecDeque<Emitted>,
    done: bool,
}

impl<I> Parse<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub(crate) fn new(lines: I, granularity: Granularity, config: CorpusConfig) -> Self {
        Self {
            lines,
            machine: Machine::new(granularity, config),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<I> Iterator for Parse<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Emitted>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(emitted) = self.pending.pop_front() {
                return Some(Ok(emitted));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Err(err) = self.machine.feed(&line, &mut self.pending) {
                        self.done = true;
                        self.pending.clear();
                        return Some(Err(err));
                    }
                }
                Some(Err(err)) => {
                    self.done = true;
                    self.pending.clear();
                    return Some(Err(err.into()));
                }
                None => {
                    self.done = true;
                    if let Err(err) = self.machine.finish() {
                        return Some(Err(err));
                    }
                    return None;
                }
            }
        }
    }
}
