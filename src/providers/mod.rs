/*!
 * Sources of translation statistics.
 *
 * - `l10n`: HTTP client for the l10n.gnome.org REST API
 * - `mock`: in-memory source with scripted behavior, used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::StatsError;
use crate::stats::Dataset;

/// Anything that can produce the dataset for a (release, language) query
///
/// The cache layer only talks to this trait, so the HTTP client can be
/// swapped for a mock in tests.
#[async_trait]
pub trait StatsSource: Send + Sync + Debug {
    /// Fetch all module statistics for a release in one language
    ///
    /// # Arguments
    /// * `release` - Release identifier, e.g. "gnome-49"
    /// * `language` - GNOME language code, e.g. "sv"
    ///
    /// # Returns
    /// * `Result<Dataset, StatsError>` - The dataset or the reason it could not be loaded
    async fn fetch(&self, release: &str, language: &str) -> Result<Dataset, StatsError>;
}

pub mod l10n;
pub mod mock;
