//! Validate command implementation

use std::io;

use anyhow::Result;
use clap::Args;

use cetem_core::{Block, CorpusReader, Input};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Corpus file to check ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: String,
}

#[derive(Debug, Default)]
struct Counts {
    extracts: u64,
    titles: u64,
    authors: u64,
    paragraphs: u64,
    sentences: u64,
    tokens: u64,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating corpus: {}", self.input);

        let input = if self.input == "-" {
            Input::from_reader(io::stdin())
        } else {
            Input::from_file(self.input.as_str())
        };

        match self.count_entities(input) {
            Ok(counts) => {
                println!("✓ Corpus is well-formed!");
                println!("  Extracts:   {}", counts.extracts);
                println!("  Titles:     {}", counts.titles);
                println!("  Authors:    {}", counts.authors);
                println!("  Paragraphs: {}", counts.paragraphs);
                println!("  Sentences:  {}", counts.sentences);
                println!("  Tokens:     {}", counts.tokens);
                Ok(())
            }
            Err(err) => {
                println!("✗ Corpus is not well-formed!");
                println!("  Error: {err}");
                Err(anyhow::anyhow!("validation failed: {}", err))
            }
        }
    }

    /// Single pass at extract granularity, walking each finished extract.
    fn count_entities(&self, input: Input) -> cetem_core::Result<Counts> {
        let mut counts = Counts::default();
        for extract in CorpusReader::from_input(input)?.extracts() {
            let extract = extract?;
            counts.extracts += 1;
            for block in &extract.blocks {
                match block {
                    Block::Title(title) => {
                        counts.titles += 1;
                        counts.tokens +=
                            title.items.iter().flat_map(|i| i.tokens()).count() as u64;
                    }
                    Block::Authors(authors) => {
                        counts.authors += 1;
                        counts.tokens +=
                            authors.items.iter().flat_map(|i| i.tokens()).count() as u64;
                    }
                    Block::Paragraph(paragraph) => {
                        counts.paragraphs += 1;
                        for sentence in &paragraph.sentences {
                            counts.sentences += 1;
                            counts.tokens +=
                                sentence.items.iter().flat_map(|i| i.tokens()).count() as u64;
                        }
                    }
                }
            }
        }
        Ok(counts)
    }
}
