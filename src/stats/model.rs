/*!
 * Data model for translation statistics.
 *
 * A `Dataset` is what one (release, language) query returns: an ordered
 * list of modules, each carrying per-language message counts.
 */

use serde::{Deserialize, Serialize};

/// Base URL of the l10n web site, used to build browser and download links
pub const SITE_BASE: &str = "https://l10n.gnome.org";

/// A GNOME release as listed by the statistics service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release identifier, e.g. "gnome-49"
    pub name: String,

    /// Human readable description
    #[serde(default)]
    pub description: String,
}

impl Release {
    /// Label shown in release pickers
    pub fn display_name(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.description)
        }
    }
}

/// Message counts for one module in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    /// Language code as used by GNOME ("sv", "pt_BR", "sr@latin")
    pub language: String,
    pub translated: u32,
    pub fuzzy: u32,
    pub untranslated: u32,

    /// Vertimus workflow state, empty when none
    #[serde(default)]
    pub state: String,

    /// Site-relative path of the PO file, if published
    #[serde(default)]
    pub po_file: Option<String>,
}

impl LanguageStat {
    /// Create a stat entry with no state or PO file
    pub fn new(language: impl Into<String>, translated: u32, fuzzy: u32, untranslated: u32) -> Self {
        Self {
            language: language.into(),
            translated,
            fuzzy,
            untranslated,
            state: String::new(),
            po_file: None,
        }
    }

    /// Total message count; always the sum of the three counts
    pub fn total(&self) -> u64 {
        self.translated as u64 + self.fuzzy as u64 + self.untranslated as u64
    }

    /// Completeness in percent, 0.0 for an empty catalog
    pub fn percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.translated as f64 / total as f64 * 100.0
        }
    }

    /// Fully translated with nothing fuzzy left
    pub fn is_complete(&self) -> bool {
        self.fuzzy == 0 && self.untranslated == 0 && self.total() > 0
    }

    /// Download link of the PO file, when the service published one
    pub fn po_url(&self) -> Option<String> {
        self.po_file.as_deref().map(site_url)
    }
}

/// A GNOME module (one domain of one branch) with its language entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub release: String,
    pub branch: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    /// Site-relative path of the POT template, if published
    #[serde(default)]
    pub pot_file: Option<String>,

    pub stats: Vec<LanguageStat>,
}

fn default_domain() -> String {
    "po".to_string()
}

impl Module {
    /// Module with a single language entry, the shape one query returns
    pub fn with_stat(
        name: impl Into<String>,
        release: impl Into<String>,
        branch: impl Into<String>,
        stat: LanguageStat,
    ) -> Self {
        Self {
            name: name.into(),
            release: release.into(),
            branch: branch.into(),
            domain: default_domain(),
            pot_file: None,
            stats: vec![stat],
        }
    }

    /// Counts summed over every language entry
    pub fn totals(&self) -> LanguageStat {
        let mut sum = LanguageStat::new("", 0, 0, 0);
        for stat in &self.stats {
            sum.translated = sum.translated.saturating_add(stat.translated);
            sum.fuzzy = sum.fuzzy.saturating_add(stat.fuzzy);
            sum.untranslated = sum.untranslated.saturating_add(stat.untranslated);
        }
        if let [single] = self.stats.as_slice() {
            sum.language = single.language.clone();
            sum.state = single.state.clone();
        }
        sum
    }

    /// State of the first language entry, the one shown for single-language datasets
    pub fn state(&self) -> &str {
        self.stats.first().map(|s| s.state.as_str()).unwrap_or("")
    }

    /// Every language entry is complete
    pub fn is_complete(&self) -> bool {
        !self.stats.is_empty() && self.stats.iter().all(LanguageStat::is_complete)
    }

    /// Vertimus page for this module in the given language
    pub fn vertimus_url(&self, language: &str) -> String {
        format!(
            "{}/vertimus/{}/{}/{}/{}/",
            SITE_BASE, self.name, self.branch, self.domain, language
        )
    }

    pub fn pot_url(&self) -> Option<String> {
        self.pot_file.as_deref().map(site_url)
    }
}

/// Absolute URL for a site-relative path
pub fn site_url(path: &str) -> String {
    format!("{}{}", SITE_BASE, path)
}

/// Statistics returned for one (release, language) query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub release: String,
    pub language: String,
    pub modules: Vec<Module>,
}

impl Dataset {
    pub fn new(release: impl Into<String>, language: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            release: release.into(),
            language: language.into(),
            modules,
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate over (module, language entry) pairs in dataset order
    pub fn rows(&self) -> impl Iterator<Item = (&Module, &LanguageStat)> {
        self.modules
            .iter()
            .flat_map(|m| m.stats.iter().map(move |s| (m, s)))
    }
}
