//! Granularity levels and the emission policy
//!
//! The requested granularity drives a single trinary decision applied at
//! every closing boundary of the state machine: yield the finished entity,
//! attach it to the enclosing accumulator, or flatten past it entirely.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CorpusError;

/// Nesting depth at which entities are materialized and emitted.
///
/// Ordered from coarsest to finest: `Extract < Paragraph < Sentence <
/// Token < Line`. Title and authors regions close at [`Paragraph`] level;
/// multi-word expressions close at [`Token`] level.
///
/// [`Paragraph`]: Granularity::Paragraph
/// [`Token`]: Granularity::Token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
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

impl Granularity {
    /// Numeric nesting level, `Extract = 0` through `Line = 4`.
    pub const fn level(self) -> u8 {
        match self {
            Granularity::Extract => 0,
            Granularity::Paragraph => 1,
            Granularity::Sentence => 2,
            Granularity::Token => 3,
            Granularity::Line => 4,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Extract => "extract",
            Granularity::Paragraph => "paragraph",
            Granularity::Sentence => "sentence",
            Granularity::Token => "token",
            Granularity::Line => "line",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extract" | "ext" => Ok(Granularity::Extract),
            "paragraph" | "par" => Ok(Granularity::Paragraph),
            "sentence" | "sent" => Ok(Granularity::Sentence),
            "token" => Ok(Granularity::Token),
            "line" => Ok(Granularity::Line),
            other => Err(CorpusError::UnknownGranularity(other.to_string())),
        }
    }
}

/// What to do with an entity at its closing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Entity is at the requested level: build it and hand it to the caller
    Yield,
    /// Entity is deeper than requested: build it and append it to the
    /// next-enclosing open accumulator
    Attach,
    /// Entity is shallower than requested: its children were already routed
    /// individually; the boundary only resets per-level counters
    Discard,
}

impl Emission {
    /// The uniform boundary rule: compare the requested granularity with the
    /// closing entity's own nesting level.
    pub fn classify(requested: Granularity, entity: Granularity) -> Emission {
        match requested.level().cmp(&entity.level()) {
            Ordering::Equal => Emission::Yield,
            Ordering::Less => Emission::Attach,
            Ordering::Greater => Emission::Discard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_ordering() {
        assert!(Granularity::Extract < Granularity::Paragraph);
        assert!(Granularity::Paragraph < Granularity::Sentence);
        assert!(Granularity::Sentence < Granularity::Token);
        assert!(Granularity::Token < Granularity::Line);
    }

    #[test]
    fn test_from_str_and_display_agree() {
        for g in [
            Granularity::Extract,
            Granularity::Paragraph,
            Granularity::Sentence,
            Granularity::Token,
            Granularity::Line,
        ] {
            assert_eq!(g.to_string().parse::<Granularity>().unwrap(), g);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "word".parse::<Granularity>().unwrap_err();
        assert!(matches!(err, CorpusError::UnknownGranularity(_)));
    }

    #[test]
    fn test_emission_matrix() {
        use Granularity::*;

        // Requested level equals the closing entity's level
        assert_eq!(Emission::classify(Sentence, Sentence), Emission::Yield);
        // Requested level is coarser: the entity becomes a child
        assert_eq!(Emission::classify(Extract, Sentence), Emission::Attach);
        assert_eq!(Emission::classify(Paragraph, Token), Emission::Attach);
        // Requested level is finer: flatten past the boundary
        assert_eq!(Emission::classify(Token, Paragraph), Emission::Discard);
        assert_eq!(Emission::classify(Line, Extract), Emission::Discard);
    }
}
