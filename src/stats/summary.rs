/*!
 * Aggregate totals over a dataset.
 *
 * Module counts and summed message counts, as shown above the module list.
 */

use serde::Serialize;

use crate::stats::Dataset;

/// Aggregate counts over a whole dataset, shown above the module list
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub modules: usize,
    pub complete_modules: usize,
    pub translated: u64,
    pub fuzzy: u64,
    pub untranslated: u64,
}

impl Summary {
    pub fn of(dataset: &Dataset) -> Self {
        let mut summary = Self {
            modules: dataset.len(),
            ..Default::default()
        };

        for module in &dataset.modules {
            if module.is_complete() {
                summary.complete_modules += 1;
            }
            for stat in &module.stats {
                summary.translated += stat.translated as u64;
                summary.fuzzy += stat.fuzzy as u64;
                summary.untranslated += stat.untranslated as u64;
            }
        }

        summary
    }

    pub fn total(&self) -> u64 {
        self.translated + self.fuzzy + self.untranslated
    }

    /// Overall completeness in percent
    pub fn percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.translated as f64 / total as f64 * 100.0
        }
    }
}
