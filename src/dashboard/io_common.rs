use std::path::Path;

use likert_scoring::year_in_label;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

/// A human label derived from a file name. Survey exports are usually named
/// after their administration year, so a standalone `20xx` token becomes the
/// label; otherwise the stem is used, with underscores and dashes read as
/// word separators.
pub fn dataset_label(path: &str) -> String {
    let name = simplify_file_name(path);
    if let Some(year) = year_in_label(&name) {
        return year.to_string();
    }
    let stem = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path);
    let spaced = stem.replace('_', " ").replace('-', " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A short content fingerprint. Twelve hex characters keep re-uploads of
/// the same export apart from genuinely new files.
pub fn fingerprint(raw: &[u8]) -> String {
    let mut digest = sha256::digest(raw);
    digest.truncate(12);
    digest
}
