//! Reader configuration

use crate::error::{CorpusError, Result};

/// What to do with a closed multi-word expression.
///
/// The three policies are mutually exclusive. The empty-MWE corpus artifact
/// (empty lemma, empty pos, zero tokens) is dropped unconditionally before
/// any of them applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MwePolicy {
    /// Emit the multi-word expression as a single compound entity
    #[default]
    Keep,
    /// Decompose it into its constituent tokens, each then handled as an
    /// ordinary token
    Simplify,
    /// Drop the expression and its tokens entirely
    Suppress,
}

/// Configuration for a corpus reading pass.
#[derive(Debug, Clone, Default)]
pub struct CorpusConfig {
    /// Multi-word expression output policy
    pub mwe_policy: MwePolicy,
    /// Omit title regions from paragraph-granularity output
    pub suppress_titles: bool,
    /// Omit authors regions from paragraph-granularity output
    pub suppress_authors: bool,
}

impl CorpusConfig {
    /// Create a builder.
    pub fn builder() -> CorpusConfigBuilder {
        CorpusConfigBuilder::default()
    }
}

/// Builder for [`CorpusConfig`].
///
/// `simplify_mwes` and `suppress_mwes` are mutually exclusive; requesting
/// both is a [`CorpusError::Config`] at build time.
#[derive(Debug, Default)]
pub struct CorpusConfigBuilder {
    mwe_policy: Option<MwePolicy>,
    conflicted: bool,
    suppress_titles: bool,
    suppress_authors: bool,
}

impl CorpusConfigBuilder {
    /// Set the multi-word expression policy explicitly.
    pub fn mwe_policy(mut self, policy: MwePolicy) -> Self {
        self.mwe_policy = Some(policy);
        self
    }

    /// Decompose multi-word expressions into plain tokens.
    pub fn simplify_mwes(mut self) -> Self {
        if matches!(self.mwe_policy, Some(MwePolicy::Suppress)) {
            // Remembered until build() so the builder chain stays infallible
            self.conflicted = true;
        }
        self.mwe_policy = Some(MwePolicy::Simplify);
        self
    }

    /// Drop multi-word expressions and their tokens.
    pub fn suppress_mwes(mut self) -> Self {
        if matches!(self.mwe_policy, Some(MwePolicy::Simplify)) {
            self.conflicted = true;
        }
        self.mwe_policy = Some(MwePolicy::Suppress);
        self
    }

    /// Omit title regions from paragraph-granularity output.
    pub fn suppress_titles(mut self, yes: bool) -> Self {
        self.suppress_titles = yes;
        self
    }

    /// Omit authors regions from paragraph-granularity output.
    pub fn suppress_authors(mut self, yes: bool) -> Self {
        self.suppress_authors = yes;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CorpusConfig> {
        if self.conflicted {
            return Err(CorpusError::Config(
                "simplify_mwes and suppress_mwes are mutually exclusive".to_string(),
            ));
        }
        Ok(CorpusConfig {
            mwe_policy: self.mwe_policy.unwrap_or_default(),
            suppress_titles: self.suppress_titles,
            suppress_authors: self.suppress_authors,
        })
    }
}
