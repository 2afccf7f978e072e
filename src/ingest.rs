//! Dataset ingestion
//!
//! Reads a pc-part-dataset style directory (`cpu.json`, `video-card.json`,
//! ...), normalizes each category and stores it. A file that cannot be read
//! or parsed leaves its category empty; the other categories still load.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde_json::Value;
use walkdir::WalkDir;

use crate::catalog::normalize_catalog;
use crate::db;
use crate::error::{Error, Result};
use crate::models::Category;

/// Find the dataset file of every category present under a directory
///
/// When a stem appears more than once the first file in sorted walk order
/// wins.
pub fn find_dataset_files(dataset_dir: &Path) -> Vec<(Category, PathBuf)> {
    let mut files: Vec<(Category, PathBuf)> = Vec::new();

    for entry in WalkDir::new(dataset_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match Category::from_dataset_stem(stem) {
            Some(category) if !files.iter().any(|(c, _)| *c == category) => {
                files.push((category, path.to_path_buf()));
            }
            Some(category) => {
                tracing::debug!(%category, path = %path.display(), "ignoring duplicate dataset file");
            }
            None => tracing::debug!(path = %path.display(), "not a catalog file"),
        }
    }

    files.sort_by_key(|(category, _)| *category);
    files
}

/// Read the raw records of one dataset file
///
/// The file must hold a JSON array; anything else is treated as empty.
pub fn read_raw_records(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&content)? {
        Value::Array(records) => Ok(records),
        other => {
            tracing::warn!(path = %path.display(), kind = json_kind(&other), "expected a JSON array");
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize one category's raw records and store them
pub fn store_category(
    conn: &mut Connection,
    category: Category,
    records: &[Value],
) -> Result<CategoryStats> {
    let parts = normalize_catalog(records, category);
    db::replace_category(conn, category, &parts)?;
    Ok(CategoryStats {
        category,
        raw: records.len(),
        stored: parts.len(),
    })
}

/// Ingest every recognized catalog file under a dataset directory
pub fn ingest_directory(conn: &mut Connection, dataset_dir: &Path) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    tracing::info!(dir = %dataset_dir.display(), "scanning for catalog files");
    let files = find_dataset_files(dataset_dir);
    tracing::info!(count = files.len(), "found catalog files");

    for (category, path) in &files {
        let records = match read_raw_records(path) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(%category, error = %e, "category left empty");
                stats.errors += 1;
                Vec::new()
            }
        };

        let category_stats = store_category(conn, *category, &records)?;
        tracing::info!(
            %category,
            raw = category_stats.raw,
            stored = category_stats.stored,
            "ingested category"
        );
        stats.categories.push(category_stats);
    }

    stats.missing = Category::ALL
        .into_iter()
        .filter(|c| !files.iter().any(|(found, _)| found == c))
        .collect();
    Ok(stats)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub raw: usize,
    pub stored: usize,
}

impl CategoryStats {
    /// Records dropped for missing price or name, or as duplicates
    pub fn dropped(&self) -> usize {
        self.raw - self.stored
    }
}

#[derive(Debug, Default)]
pub struct IngestStats {
    pub categories: Vec<CategoryStats>,
    pub missing: Vec<Category>,
    pub errors: usize,
}

impl IngestStats {
    pub fn stored(&self) -> usize {
        self.categories.iter().map(|c| c.stored).sum()
    }
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.categories {
            writeln!(
                f,
                "  {:<12} {:>6} stored ({} dropped)",
                c.category.key(),
                c.stored,
                c.dropped()
            )?;
        }
        write!(
            f,
            "Ingested {} parts across {} categories. Missing: {}, Errors: {}",
            self.stored(),
            self.categories.len(),
            self.missing.len(),
            self.errors
        )
    }
}
