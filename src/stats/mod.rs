/*!
 * Translation statistics pipeline.
 *
 * - `model`: releases, modules, per-language counts and datasets
 * - `cache`: time-based cache in front of a `StatsSource`
 * - `filter`: name/completeness filtering and quick filter modes
 * - `sort`: module list orderings
 * - `summary`: totals over a dataset
 * - `export`: CSV export
 */

// Re-export main types for easier usage
pub use self::cache::{CacheKey, StatsCache};
pub use self::export::{to_csv, write_csv};
pub use self::filter::{FilterCriteria, FilterMode, filter};
pub use self::model::{Dataset, LanguageStat, Module, Release};
pub use self::sort::{SortKey, sort};
pub use self::summary::Summary;

// Submodules
pub mod cache;
pub mod export;
pub mod filter;
pub mod model;
pub mod sort;
pub mod summary;
