/*!
 * # gnome-l10n - GNOME translation statistics
 *
 * A Rust library for loading translation statistics of GNOME modules from
 * the l10n.gnome.org REST API.
 *
 * ## Features
 *
 * - List GNOME releases
 * - Load per-module message counts for a release and language
 * - Cache loaded statistics for a configurable time (1 hour by default)
 * - Filter by module name, completeness and translation state
 * - Sort by completeness, name, fuzzy/untranslated/total counts or state
 * - Export to CSV
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `stats`: Statistics pipeline:
 *   - `stats::model`: Releases, modules and per-language counts
 *   - `stats::cache`: Time-based cache of loaded datasets
 *   - `stats::filter`: Filtering of loaded datasets
 *   - `stats::sort`: Module list orderings
 *   - `stats::summary`: Totals over a dataset
 *   - `stats::export`: CSV export
 * - `providers`: Statistics sources:
 *   - `providers::l10n`: l10n.gnome.org API client
 *   - `providers::mock`: Scripted source for tests
 * - `app_controller`: Main application controller
 * - `language_utils`: GNOME locale code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod stats;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::StatsError;
pub use providers::StatsSource;
pub use providers::l10n::L10nClient;
pub use stats::{Dataset, FilterCriteria, FilterMode, LanguageStat, Module, Release, SortKey, StatsCache};
