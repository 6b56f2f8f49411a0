use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::language_utils;
use crate::providers::StatsSource;
use crate::providers::l10n::{L10nClient, ProgressCallback};
use crate::stats::export::default_file_name;
use crate::stats::{
    CacheKey, Dataset, FilterCriteria, Release, SortKey, StatsCache, Summary, sort, write_csv,
};

// @module: Application controller for the statistics pipeline

/// Main application controller: fetches through the cache, filters, sorts and exports
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Direct API access for release listings
    client: L10nClient,
    // @field: Where datasets come from on a cache miss
    source: Arc<dyn StatsSource>,
    cache: StatsCache,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let client = L10nClient::from_config(&config)?;
        Ok(Self::assemble(config, client.clone(), Arc::new(client)))
    }

    /// Create a controller whose API client reports per-module progress
    pub fn with_progress(config: Config, progress: ProgressCallback) -> Result<Self> {
        let client = L10nClient::from_config(&config)?.with_progress(progress);
        Ok(Self::assemble(config, client.clone(), Arc::new(client)))
    }

    /// Create a controller that loads datasets from an arbitrary source
    pub fn with_source(config: Config, source: Arc<dyn StatsSource>) -> Result<Self> {
        let client = L10nClient::from_config(&config)?;
        Ok(Self::assemble(config, client, source))
    }

    fn assemble(config: Config, client: L10nClient, source: Arc<dyn StatsSource>) -> Self {
        let cache = StatsCache::new(config.cache_ttl);
        Self {
            config,
            client,
            source,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// List GNOME releases, newest first
    pub async fn list_releases(&self) -> Result<Vec<Release>> {
        let releases = self
            .client
            .fetch_releases()
            .await
            .context("Failed to load releases")?;
        debug!("Found {} GNOME releases", releases.len());
        Ok(releases)
    }

    /// Load statistics for a release and language, through the cache
    ///
    /// With `refresh` set the cached entry is dropped first, as the refresh
    /// button does.
    pub async fn load_stats(&self, release: &str, language: &str, refresh: bool) -> Result<Dataset> {
        let language = language_utils::normalize_code(language)?;
        let key = CacheKey::new(release, &language);

        if refresh {
            self.cache.invalidate(&key);
        }

        let dataset = self
            .cache
            .get_or_fetch(&key, self.source.as_ref())
            .await
            .with_context(|| format!("Failed to load statistics for {}/{}", release, language))?;

        let summary = Summary::of(&dataset);
        info!(
            "{} modules, {} complete, {:.1}% translated ({}/{})",
            summary.modules,
            summary.complete_modules,
            summary.percent(),
            summary.translated,
            summary.total()
        );

        Ok(dataset)
    }

    /// Filter then sort a loaded dataset for display
    pub fn view(&self, dataset: &Dataset, criteria: &FilterCriteria, key: SortKey) -> Dataset {
        let filtered = criteria.apply(dataset);
        debug!("{} modules shown, {} total", filtered.len(), dataset.len());
        sort(&filtered, key)
    }

    /// Export every loaded module as CSV, in `key` order
    ///
    /// Filters of the current view do not apply to exports. When `target`
    /// is a directory the default file name is used inside it.
    pub fn export(&self, dataset: &Dataset, key: SortKey, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(default_file_name(&dataset.release, &dataset.language))
        } else {
            target.to_path_buf()
        };

        write_csv(&sort(dataset, key), &path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        Ok(path)
    }
}
