use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::app_config::Config;
use crate::errors::StatsError;
use crate::providers::StatsSource;
use crate::stats::{Dataset, LanguageStat, Module, Release};

/// Public API of the GNOME translation platform
pub const DEFAULT_API_BASE: &str = "https://l10n.gnome.org/api/v1";

/// Called after each module of a release is resolved, with (done, total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Client for the l10n.gnome.org statistics API
#[derive(Clone)]
pub struct L10nClient {
    /// HTTP client for API requests
    client: Client,
    /// API root, e.g. https://l10n.gnome.org/api/v1
    api_base: Url,
    /// Pause between per-module detail requests
    request_delay: Duration,
    /// Optional progress reporting while a release is loaded
    progress: Option<ProgressCallback>,
}

impl fmt::Debug for L10nClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L10nClient")
            .field("api_base", &self.api_base.as_str())
            .field("request_delay", &self.request_delay)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Message counts as the API spells them
#[derive(Debug, Default, Deserialize)]
struct RawCounts {
    #[serde(default)]
    trans: u32,
    #[serde(default)]
    fuzzy: u32,
    #[serde(default)]
    untrans: u32,
}

/// One module line of `releases/{release}/languages/{language}`
#[derive(Debug, Deserialize)]
struct ModuleEntry {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    /// Site-relative URL of the detail resource
    #[serde(default)]
    stats: Option<String>,
    /// Some deployments inline the counts in the listing
    #[serde(default)]
    statistics: Option<RawCounts>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    po_file: Option<String>,
    #[serde(default)]
    pot_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseLanguageResponse {
    #[serde(default)]
    modules: Vec<ModuleEntry>,
}

/// `modules/{m}/branches/{b}/domains/{d}/languages/{l}`
#[derive(Debug, Deserialize)]
struct ModuleDetail {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    statistics: RawCounts,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    po_file: Option<String>,
    #[serde(default)]
    pot_file: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Identity of a module, used to fill gaps in detail responses
struct ModuleKey<'a> {
    release: &'a str,
    module: &'a str,
    branch: &'a str,
    domain: &'a str,
    language: &'a str,
}

impl ModuleDetail {
    fn into_module(self, key: &ModuleKey<'_>) -> Module {
        let stat = LanguageStat {
            language: self.language.unwrap_or_else(|| key.language.to_string()),
            translated: self.statistics.trans,
            fuzzy: self.statistics.fuzzy,
            untranslated: self.statistics.untrans,
            state: self.state.unwrap_or_default(),
            po_file: non_empty(self.po_file),
        };

        Module {
            name: non_empty(self.module).unwrap_or_else(|| key.module.to_string()),
            release: key.release.to_string(),
            branch: non_empty(self.branch).unwrap_or_else(|| key.branch.to_string()),
            domain: non_empty(self.domain).unwrap_or_else(|| key.domain.to_string()),
            pot_file: non_empty(self.pot_file),
            stats: vec![stat],
        }
    }
}

impl L10nClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_base` - API root URL
    /// * `timeout_secs` - Per-request timeout
    pub fn new(api_base: &str, timeout_secs: u64) -> Result<Self, StatsError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| StatsError::InvalidUrl(format!("'{}': {}", api_base, e)))?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent(concat!("gnome-l10n/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            api_base,
            request_delay: Duration::ZERO,
            progress: None,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, StatsError> {
        Ok(Self::new(&config.api_base, config.request_timeout_secs)?
            .with_request_delay(Duration::from_millis(config.request_delay_ms)))
    }

    /// Set the pause between per-module detail requests
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Report (done, total) after each module while loading a release
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The API root this client talks to
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.as_str().trim_end_matches('/'), path)
    }

    /// Resolve a site-relative path ("/api/v1/...") against the API host
    fn site_path(&self, path: &str) -> Result<String, StatsError> {
        self.api_base
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| StatsError::InvalidUrl(format!("'{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StatsError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            StatsError::Network(format!("Failed to send request to {}: {}", url, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StatsError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Statistics API error ({}): {}", status, error_text);
            return Err(StatsError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| StatsError::Network(format!("Failed to read response from {}: {}", url, e)))?;

        parse_json(&body)
    }

    /// List GNOME releases, newest name first
    pub async fn fetch_releases(&self) -> Result<Vec<Release>, StatsError> {
        let releases: Vec<Release> = self.get_json(&self.endpoint("releases/")).await?;
        Ok(gnome_releases(releases))
    }

    /// Detailed counts for one module/domain in one language
    pub async fn fetch_module_stats(
        &self,
        module: &str,
        branch: &str,
        domain: &str,
        language: &str,
    ) -> Result<Module, StatsError> {
        let url = self.endpoint(&format!(
            "modules/{}/branches/{}/domains/{}/languages/{}",
            module, branch, domain, language
        ));
        let detail: ModuleDetail = self.get_json(&url).await?;

        Ok(detail.into_module(&ModuleKey {
            release: "",
            module,
            branch,
            domain,
            language,
        }))
    }

    /// Load every module of a release in one language
    ///
    /// The release listing decides the outcome: a 404 or malformed listing
    /// fails the whole call. Modules whose detail request fails are logged
    /// and left out.
    pub async fn fetch_dataset(&self, release: &str, language: &str) -> Result<Dataset, StatsError> {
        let url = self.endpoint(&format!("releases/{}/languages/{}", release, language));
        let listing: ReleaseLanguageResponse = self.get_json(&url).await?;

        let total = listing.modules.len();
        let mut modules = Vec::with_capacity(total);

        for (index, entry) in listing.modules.into_iter().enumerate() {
            let requested = entry.statistics.is_none() && entry.stats.is_some();

            match self.resolve_entry(entry, release, language).await {
                Ok(Some(module)) => modules.push(module),
                Ok(None) => {}
                Err(e) => warn!("Skipping module in {}/{}: {}", release, language, e),
            }

            if let Some(progress) = &self.progress {
                progress(index + 1, total);
            }

            if requested && !self.request_delay.is_zero() && index + 1 < total {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        debug!("Loaded {} of {} modules for {}/{}", modules.len(), total, release, language);
        Ok(Dataset::new(release, language, modules))
    }

    async fn resolve_entry(
        &self,
        entry: ModuleEntry,
        release: &str,
        language: &str,
    ) -> Result<Option<Module>, StatsError> {
        let name = non_empty(entry.module).unwrap_or_default();
        let branch = non_empty(entry.branch).unwrap_or_default();
        let domain = non_empty(entry.domain).unwrap_or_else(|| "po".to_string());
        let key = ModuleKey {
            release,
            module: &name,
            branch: &branch,
            domain: &domain,
            language,
        };

        if let Some(counts) = entry.statistics {
            let detail = ModuleDetail {
                module: None,
                branch: None,
                domain: None,
                language: None,
                statistics: counts,
                state: entry.state,
                po_file: entry.po_file,
                pot_file: entry.pot_file,
            };
            return Ok(Some(detail.into_module(&key)));
        }

        let Some(stats_path) = non_empty(entry.stats) else {
            debug!("Module '{}' has no statistics link", name);
            return Ok(None);
        };

        let detail: ModuleDetail = self.get_json(&self.site_path(&stats_path)?).await?;
        // The listing knows the language we asked for; detail responses may echo a variant
        let mut module = detail.into_module(&key);
        for stat in &mut module.stats {
            stat.language = language.to_string();
        }
        Ok(Some(module))
    }
}

#[async_trait]
impl StatsSource for L10nClient {
    async fn fetch(&self, release: &str, language: &str) -> Result<Dataset, StatsError> {
        self.fetch_dataset(release, language).await
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, StatsError> {
    Ok(serde_json::from_str(body)?)
}

/// Keep GNOME desktop releases and order them newest name first
pub fn gnome_releases(mut releases: Vec<Release>) -> Vec<Release> {
    releases.retain(|r| r.name.starts_with("gnome-"));
    releases.sort_by(|a, b| b.name.cmp(&a.name));
    releases
}
