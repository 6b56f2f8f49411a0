use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for GNOME locale codes
///
/// GNOME identifies translation teams by a base ISO 639 code, optionally
/// followed by a region (`pt_BR`) and/or a variant (`sr@latin`).
/// Languages offered in the language picker, with their display names
pub const KNOWN_LANGUAGES: [(&str, &str); 30] = [
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("nb", "Norwegian Bokmål"),
    ("fi", "Finnish"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("pt_BR", "Portuguese (Brazil)"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("zh_CN", "Chinese (Simplified)"),
    ("ko", "Korean"),
    ("uk", "Ukrainian"),
    ("cs", "Czech"),
    ("hu", "Hungarian"),
    ("ar", "Arabic"),
    ("he", "Hebrew"),
    ("tr", "Turkish"),
    ("pt", "Portuguese"),
    ("el", "Greek"),
    ("ca", "Catalan"),
    ("ro", "Romanian"),
    ("gl", "Galician"),
    ("eu", "Basque"),
    ("sl", "Slovenian"),
    ("hr", "Croatian"),
    ("sr", "Serbian"),
];

/// The ISO 639 part of a GNOME locale code ("pt" for "pt_BR", "sr" for "sr@latin")
pub fn base_code(code: &str) -> &str {
    let code = code.trim();
    let end = code.find(['_', '-', '@']).unwrap_or(code.len());
    &code[..end]
}

fn lookup(base: &str) -> Option<Language> {
    let base = base.to_lowercase();
    match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
}

/// Canonical GNOME spelling of a locale code
///
/// Lowercases the language, uppercases the region and uses `_` as the
/// separator: "PT-br" becomes "pt_BR". Variants after `@` are lowercased.
pub fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim();
    let (main, variant) = match code.split_once('@') {
        Some((main, variant)) => (main, Some(variant)),
        None => (code, None),
    };

    let mut parts = main.splitn(2, ['_', '-']);
    let language = parts.next().unwrap_or("").to_lowercase();
    if lookup(&language).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    let mut normalized = language;
    if let Some(region) = parts.next().filter(|r| !r.is_empty()) {
        normalized.push('_');
        normalized.push_str(&region.to_uppercase());
    }
    if let Some(variant) = variant.filter(|v| !v.is_empty()) {
        normalized.push('@');
        normalized.push_str(&variant.to_lowercase());
    }

    Ok(normalized)
}

/// Validate a GNOME locale code
pub fn validate_language_code(code: &str) -> Result<()> {
    normalize_code(code).map(|_| ())
}

/// Get the display name for a locale code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_code(code)?;

    if let Some((_, name)) = KNOWN_LANGUAGES.iter().find(|(c, _)| *c == normalized) {
        return Ok(name.to_string());
    }

    let lang = lookup(base_code(&normalized))
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;
    let suffix = &normalized[base_code(&normalized).len()..];

    if suffix.is_empty() {
        Ok(lang.to_name().to_string())
    } else {
        Ok(format!("{} ({})", lang.to_name(), suffix.trim_start_matches(['_', '@'])))
    }
}
