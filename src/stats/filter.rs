/*!
 * Filtering of loaded datasets.
 *
 * All functions here are pure: they return a new dataset and keep the
 * input module order.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::stats::{Dataset, LanguageStat, Module};

/// Keep modules whose name contains `name_substring` (case-insensitive) and
/// whose completeness is at least `min_completeness` percent
///
/// Language entries below the threshold are dropped; a module without any
/// remaining entry is dropped. `filter(dataset, "", 0.0)` returns the
/// dataset unchanged.
pub fn filter(dataset: &Dataset, name_substring: &str, min_completeness: f64) -> Dataset {
    let query = name_substring.to_lowercase();

    retain(dataset, |module| {
        if !query.is_empty() && !module.name.to_lowercase().contains(&query) {
            return None;
        }
        keep_stats(module, |stat| stat.percent() >= min_completeness)
    })
}

/// Quick filters offered next to the search box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    /// Anything with fuzzy or untranslated messages left
    Incomplete,
    Complete,
    HasFuzzy,
    /// Vertimus state is exactly "Translated"
    StateTranslated,
}

impl FilterMode {
    fn matches(&self, stat: &LanguageStat) -> bool {
        match self {
            Self::All => true,
            Self::Incomplete => !stat.is_complete(),
            Self::Complete => stat.is_complete(),
            Self::HasFuzzy => stat.fuzzy > 0,
            Self::StateTranslated => stat.state.eq_ignore_ascii_case("translated"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
            Self::HasFuzzy => "fuzzy",
            Self::StateTranslated => "state_translated",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "incomplete" => Ok(Self::Incomplete),
            "complete" => Ok(Self::Complete),
            "fuzzy" | "has_fuzzy" => Ok(Self::HasFuzzy),
            "state_translated" | "translated" => Ok(Self::StateTranslated),
            _ => Err(anyhow!("Invalid filter mode: {}", s)),
        }
    }
}

/// Everything the view filters on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Module name substring, matched case-insensitively
    pub query: String,
    /// Minimum completeness in percent
    pub min_completeness: f64,
    pub mode: FilterMode,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn min_completeness(mut self, percent: f64) -> Self {
        self.min_completeness = percent;
        self
    }

    pub fn mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Apply name, threshold and mode filters in one pass
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let narrowed = filter(dataset, &self.query, self.min_completeness);
        if self.mode == FilterMode::All {
            return narrowed;
        }
        retain(&narrowed, |module| keep_stats(module, |stat| self.mode.matches(stat)))
    }
}

fn keep_stats(module: &Module, keep: impl Fn(&LanguageStat) -> bool) -> Option<Module> {
    // A module without language entries counts as an empty 0% catalog
    if module.stats.is_empty() {
        return keep(&LanguageStat::new("", 0, 0, 0)).then(|| module.clone());
    }

    let stats: Vec<LanguageStat> = module.stats.iter().filter(|s| keep(s)).cloned().collect();
    if stats.is_empty() {
        return None;
    }
    Some(Module {
        stats,
        ..module.clone()
    })
}

fn retain(dataset: &Dataset, select: impl Fn(&Module) -> Option<Module>) -> Dataset {
    Dataset {
        release: dataset.release.clone(),
        language: dataset.language.clone(),
        modules: dataset.modules.iter().filter_map(select).collect(),
    }
}
