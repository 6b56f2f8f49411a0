/*!
 * Tests for CSV export
 */

use gnome_l10n::stats::export::{ExportRow, HEADER, branding, default_file_name, parse_csv, to_csv, write_csv};
use gnome_l10n::stats::{Dataset, LanguageStat};

use crate::common::{create_temp_dir, module, sample_dataset};

#[test]
fn test_toCsv_roundTrip_shouldReproduceRows() {
    let dataset = sample_dataset();
    let text = to_csv(&dataset).unwrap();
    let rows = parse_csv(&text).unwrap();

    let expected: Vec<ExportRow> = dataset.rows().map(|(m, s)| ExportRow::new(m, s)).collect();
    assert_eq!(rows, expected);
    assert_eq!(rows.len(), 5);
}

#[test]
fn test_toCsv_shouldStartWithHeaderAndEndWithBranding() {
    let text = to_csv(&sample_dataset()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], HEADER.join(","));
    assert_eq!(*lines.last().unwrap(), branding());
    assert_eq!(lines.len(), 1 + 5 + 1);
}

#[test]
fn test_toCsv_withGedit_shouldFormatPercentAndUrl() {
    let dataset = Dataset::new("gnome-49", "sv", vec![module("gedit", "sv", 80, 10, 10)]);
    let text = to_csv(&dataset).unwrap();
    let line = text.lines().nth(1).unwrap();

    assert_eq!(
        line,
        "gedit,master,po,sv,,80,10,10,100,80.0,https://l10n.gnome.org/vertimus/gedit/master/po/sv/"
    );
}

#[test]
fn test_toCsv_withCommasInState_shouldQuoteField() {
    let mut gedit = module("gedit", "sv", 1, 0, 0);
    gedit.stats[0].state = "Proofread, ready".to_string();
    let dataset = Dataset::new("gnome-49", "sv", vec![gedit]);

    let text = to_csv(&dataset).unwrap();
    assert!(text.contains("\"Proofread, ready\""));
    assert_eq!(parse_csv(&text).unwrap()[0].state, "Proofread, ready");
}

#[test]
fn test_toCsv_withSeveralLanguages_shouldEmitRowPerPair() {
    let mut gedit = module("gedit", "sv", 1, 0, 0);
    gedit.stats.push(LanguageStat::new("de", 2, 0, 0));
    let dataset = Dataset::new("gnome-49", "sv", vec![gedit]);

    let rows = parse_csv(&to_csv(&dataset).unwrap()).unwrap();
    let languages: Vec<_> = rows.iter().map(|r| r.language.as_str()).collect();
    assert_eq!(languages, vec!["sv", "de"]);
}

#[test]
fn test_toCsv_shouldBeDeterministic() {
    let dataset = sample_dataset();
    assert_eq!(to_csv(&dataset).unwrap(), to_csv(&dataset).unwrap());
}

#[test]
fn test_writeCsv_shouldWriteFile() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join(default_file_name("gnome-49", "sv"));

    write_csv(&sample_dataset(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, to_csv(&sample_dataset()).unwrap());
}

#[test]
fn test_writeCsv_withMissingDirectory_shouldFailWithIoError() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("missing").join("out.csv");

    let result = write_csv(&sample_dataset(), &path);
    assert!(matches!(result, Err(gnome_l10n::StatsError::Io(_))));
}
