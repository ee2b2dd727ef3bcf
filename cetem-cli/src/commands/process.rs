//! Process command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cetem_core::{CorpusConfig, CorpusReader, Input, MwePolicy};

use crate::output::{JsonFormatter, OutputFormatter, Record, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Corpus file to read ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Granularity of the emitted entities
    #[arg(short, long, value_enum, default_value = "extract")]
    pub granularity: GranularityArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Multi-word expression policy
    #[arg(long, value_enum, default_value = "keep")]
    pub mwe: MweMode,

    /// Omit title regions from paragraph-granularity output
    #[arg(long)]
    pub no_titles: bool,

    /// Omit authors regions from paragraph-granularity output
    #[arg(long)]
    pub no_authors: bool,

    /// Stop after N entities
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Granularity selector
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum GranularityArg {
    /// Whole extracts
    Extract,
    /// Titles, authors and paragraphs
    Paragraph,
    /// Sentences
    Sentence,
    /// Tokens and multi-word expressions
    Token,
    /// Raw input lines
    Line,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical corpus markup
    Text,
    /// One JSON object per entity (NDJSON)
    Json,
}

/// Multi-word expression handling
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MweMode {
    /// Emit each expression as a single compound entity
    Keep,
    /// Decompose expressions into plain tokens
    Simplify,
    /// Drop expressions and their tokens
    Suppress,
}

impl From<MweMode> for MwePolicy {
    fn from(mode: MweMode) -> Self {
        match mode {
            MweMode::Keep => MwePolicy::Keep,
            MweMode::Simplify => MwePolicy::Simplify,
            MweMode::Suppress => MwePolicy::Suppress,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("processing {} at {:?} granularity", self.input, self.granularity);

        let config = CorpusConfig::builder()
            .mwe_policy(self.mwe.into())
            .suppress_titles(self.no_titles)
            .suppress_authors(self.no_authors)
            .build()?;

        let mut progress = ProgressReporter::new(self.quiet);
        let input = self.open_input(&mut progress)?;
        let reader = CorpusReader::from_input(input)?.with_config(config);

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        let count = match self.granularity {
            GranularityArg::Extract => {
                stream(reader.extracts(), Record::Extract, formatter.as_mut(), self.limit)?
            }
            GranularityArg::Paragraph => {
                stream(reader.paragraphs(), Record::Block, formatter.as_mut(), self.limit)?
            }
            GranularityArg::Sentence => {
                stream(reader.sentences(), Record::Sentence, formatter.as_mut(), self.limit)?
            }
            GranularityArg::Token => {
                stream(reader.tokens(), Record::Item, formatter.as_mut(), self.limit)?
            }
            GranularityArg::Line => {
                stream(reader.lines(), Record::Line, formatter.as_mut(), self.limit)?
            }
        };

        formatter.finish()?;
        progress.finish();
        log::info!("emitted {count} entities");

        Ok(())
    }

    fn open_input(&self, progress: &mut ProgressReporter) -> Result<Input> {
        if self.input == "-" {
            return Ok(Input::from_reader(io::stdin()));
        }
        let path = PathBuf::from(&self.input);
        progress.init_bytes(std::fs::metadata(&path).ok().map(|m| m.len()));
        let file = File::open(&path)
            .with_context(|| format!("failed to open corpus file: {}", path.display()))?;
        Ok(Input::from_reader(progress.wrap_read(file)))
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Drive one granularity iterator into the formatter, honoring the limit.
///
/// The limit is checked before each pull, so once it is reached no further
/// input is consumed from the source.
fn stream<T, I>(
    mut iter: I,
    wrap: fn(T) -> Record,
    formatter: &mut dyn OutputFormatter,
    limit: Option<u64>,
) -> Result<u64>
where
    I: Iterator<Item = cetem_core::Result<T>>,
{
    let mut count = 0u64;
    while limit.map_or(true, |limit| count < limit) {
        let Some(item) = iter.next() else {
            break;
        };
        formatter.write_record(&wrap(item?))?;
        count += 1;
    }
    Ok(count)
}
