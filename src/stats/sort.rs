/*!
 * Sort orders for the module list.
 */

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::stats::{Dataset, LanguageStat, Module};

/// How the module list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Least translated first
    #[default]
    PercentAsc,
    PercentDesc,
    NameAsc,
    NameDesc,
    UntranslatedDesc,
    FuzzyDesc,
    TotalDesc,
    /// Alphabetical by vertimus state, modules without a state last
    State,
}

impl SortKey {
    /// All keys in menu order
    pub const ALL: [SortKey; 8] = [
        Self::PercentAsc,
        Self::PercentDesc,
        Self::NameAsc,
        Self::NameDesc,
        Self::UntranslatedDesc,
        Self::FuzzyDesc,
        Self::TotalDesc,
        Self::State,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PercentAsc => "pct_asc",
            Self::PercentDesc => "pct_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::UntranslatedDesc => "untrans_desc",
            Self::FuzzyDesc => "fuzzy_desc",
            Self::TotalDesc => "total_desc",
            Self::State => "state",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PercentAsc => "Completion % (low → high)",
            Self::PercentDesc => "Completion % (high → low)",
            Self::NameAsc => "Module name (A → Z)",
            Self::NameDesc => "Module name (Z → A)",
            Self::UntranslatedDesc => "Untranslated (most first)",
            Self::FuzzyDesc => "Fuzzy (most first)",
            Self::TotalDesc => "Total strings (most first)",
            Self::State => "State",
        }
    }

    fn compare(&self, a: &Module, b: &Module) -> Ordering {
        let (ta, tb) = (a.totals(), b.totals());
        match self {
            Self::PercentAsc => cmp_percent(&ta, &tb),
            Self::PercentDesc => cmp_percent(&tb, &ta),
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            Self::UntranslatedDesc => tb.untranslated.cmp(&ta.untranslated),
            Self::FuzzyDesc => tb.fuzzy.cmp(&ta.fuzzy),
            Self::TotalDesc => tb.total().cmp(&ta.total()),
            Self::State => state_rank(a.state()).cmp(&state_rank(b.state())),
        }
    }
}

fn cmp_percent(a: &LanguageStat, b: &LanguageStat) -> Ordering {
    a.percent().total_cmp(&b.percent())
}

fn state_rank(state: &str) -> (bool, String) {
    (state.is_empty(), state.to_lowercase())
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Invalid sort key: {}", s))
    }
}

/// Return a copy of the dataset ordered by `key`; ties keep dataset order
pub fn sort(dataset: &Dataset, key: SortKey) -> Dataset {
    let mut modules = dataset.modules.clone();
    modules.sort_by(|a, b| key.compare(a, b));
    Dataset {
        release: dataset.release.clone(),
        language: dataset.language.clone(),
        modules,
    }
}
