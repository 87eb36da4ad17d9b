use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Placeholder marking the gene-name position in a prefix pattern.
pub const DEFAULT_GENE_PLACEHOLDER: &str = "{gene}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixCategory {
    ExperimentalContext,
    Species,
    GenericDescriptor,
    MrnaGrounding,
    ProteinState,
    Inhibition,
}

impl PrefixCategory {
    pub const ALL: [PrefixCategory; 6] = [
        Self::ExperimentalContext,
        Self::Species,
        Self::GenericDescriptor,
        Self::MrnaGrounding,
        Self::ProteinState,
        Self::Inhibition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExperimentalContext => "experimental-context",
            Self::Species => "species",
            Self::GenericDescriptor => "generic-descriptor",
            Self::MrnaGrounding => "mrna-grounding",
            Self::ProteinState => "protein-state",
            Self::Inhibition => "inhibition",
        }
    }
}

impl fmt::Display for PrefixCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefixCategory {
    type Err = ModelError;

    /// Accepts both `protein-state` and the spreadsheet-friendly `protein_state`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCategory(raw.to_string()))
    }
}

/// A row of the gene prefix table. The category is kept raw so that unknown
/// tokens can be reported by the validator rather than dropped by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixPatternEntry {
    pub pattern: String,
    pub category: String,
    pub notes: String,
    pub line: usize,
}

impl PrefixPatternEntry {
    pub fn parsed_category(&self) -> Result<PrefixCategory, ModelError> {
        self.category.parse()
    }
}
