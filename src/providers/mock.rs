/*!
 * Mock statistics source for testing.
 *
 * This module provides a source that simulates different behaviors:
 * - `MockSource::working(dataset)` - Always returns the given modules
 * - `MockSource::not_found()` - Always answers like an HTTP 404
 * - `MockSource::failing()` - Always fails with a network error
 * - `MockSource::intermittent(n, dataset)` - Fails every Nth request
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::StatsError;
use crate::providers::StatsSource;
use crate::stats::{Dataset, LanguageStat, Module};

/// Behavior mode for the mock source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with a network error
    Failing,
    /// Always reports the release/language as unknown
    NotFound,
    /// Always reports an unparseable payload
    Malformed,
}

/// Mock source returning a canned set of modules
#[derive(Debug, Clone)]
pub struct MockSource {
    /// Behavior mode
    behavior: MockBehavior,
    /// Modules returned on success
    modules: Vec<Module>,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockSource {
    /// Create a new mock source with the specified behavior
    pub fn new(behavior: MockBehavior, modules: Vec<Module>) -> Self {
        Self {
            behavior,
            modules,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock source
    pub fn working(modules: Vec<Module>) -> Self {
        Self::new(MockBehavior::Working, modules)
    }

    /// Create an intermittently failing mock source
    pub fn intermittent(fail_every: usize, modules: Vec<Module>) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every }, modules)
    }

    /// Create a mock source that always fails to connect
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing, Vec::new())
    }

    /// Create a mock source that answers 404
    pub fn not_found() -> Self {
        Self::new(MockBehavior::NotFound, Vec::new())
    }

    /// Create a mock source that returns garbage
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed, Vec::new())
    }

    /// A single "gedit" module for the given language: 80 translated, 10 fuzzy, 10 untranslated
    pub fn gedit_sample(language: &str) -> Vec<Module> {
        vec![Module::with_stat(
            "gedit",
            "gnome-49",
            "master",
            LanguageStat::new(language, 80, 10, 10),
        )]
    }

    /// Get the number of fetches made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsSource for MockSource {
    async fn fetch(&self, release: &str, language: &str) -> Result<Dataset, StatsError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => {}
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    return Err(StatsError::Network(format!(
                        "Simulated failure on request {}",
                        count
                    )));
                }
            }
            MockBehavior::Failing => {
                return Err(StatsError::Network("Simulated connection refused".to_string()));
            }
            MockBehavior::NotFound => {
                return Err(StatsError::NotFound(format!(
                    "releases/{}/languages/{}",
                    release, language
                )));
            }
            MockBehavior::Malformed => {
                return Err(StatsError::Parse("expected value at line 1 column 1".to_string()));
            }
        }

        let modules = self
            .modules
            .iter()
            .cloned()
            .map(|mut module| {
                module.release = release.to_string();
                module
            })
            .collect();

        Ok(Dataset::new(release, language, modules))
    }
}
