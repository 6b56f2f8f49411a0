/*!
 * CSV export of a dataset.
 *
 * The text has a header row, one row per module/language pair in dataset
 * order and a single-field branding row at the end.
 */

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::StatsError;
use crate::stats::{Dataset, LanguageStat, Module};

/// Column names of the export, in order
pub const HEADER: [&str; 11] = [
    "Module",
    "Branch",
    "Domain",
    "Language",
    "State",
    "Translated",
    "Fuzzy",
    "Untranslated",
    "Total",
    "Percent",
    "Vertimus URL",
];

/// Last row of every export
pub fn branding() -> String {
    format!("GNOME L10n v{} — Daniel Nylander", env!("CARGO_PKG_VERSION"))
}

/// Suggested file name for an export of `release` in `language`
pub fn default_file_name(release: &str, language: &str) -> String {
    format!("gnome-l10n-{}-{}.csv", release, language)
}

/// One exported module/language row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Module")]
    pub module: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Translated")]
    pub translated: u32,
    #[serde(rename = "Fuzzy")]
    pub fuzzy: u32,
    #[serde(rename = "Untranslated")]
    pub untranslated: u32,
    #[serde(rename = "Total")]
    pub total: u64,
    /// Completeness with one decimal, e.g. "80.0"
    #[serde(rename = "Percent")]
    pub percent: String,
    #[serde(rename = "Vertimus URL")]
    pub vertimus_url: String,
}

impl ExportRow {
    pub fn new(module: &Module, stat: &LanguageStat) -> Self {
        Self {
            module: module.name.clone(),
            branch: module.branch.clone(),
            domain: module.domain.clone(),
            language: stat.language.clone(),
            state: stat.state.clone(),
            translated: stat.translated,
            fuzzy: stat.fuzzy,
            untranslated: stat.untranslated,
            total: stat.total(),
            percent: format!("{:.1}", stat.percent()),
            vertimus_url: module.vertimus_url(&stat.language),
        }
    }
}

/// Render the dataset as CSV text
pub fn to_csv(dataset: &Dataset) -> Result<String, StatsError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for (module, stat) in dataset.rows() {
        writer.serialize(ExportRow::new(module, stat))?;
    }
    writer.write_record([branding()])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| StatsError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| StatsError::Parse(e.to_string()))
}

/// Write the CSV export of `dataset` to `path`
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<(), StatsError> {
    let path = path.as_ref();
    let text = to_csv(dataset)?;
    std::fs::write(path, text)?;

    info!("Exported {} modules to {}", dataset.len(), path.display());
    Ok(())
}

/// Read the data rows of an export back, ignoring the branding row
pub fn parse_csv(text: &str) -> Result<Vec<ExportRow>, StatsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != HEADER.len() {
            continue;
        }
        rows.push(record.deserialize(Some(&headers))?);
    }
    Ok(rows)
}
