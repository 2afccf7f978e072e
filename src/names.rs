//! Free-text name normalization shared by the classifiers

/// Lowercase a part name and turn hyphens into spaces so that
/// "Ryzen 5-7600X" and "Ryzen 5 7600X" match the same patterns.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('-', " ")
}
