//! Error types for catalog storage and ingestion.
//!
//! The compatibility engine itself never fails; these cover the I/O around it.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Category;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown category '{0}' (expected one of cpu, gpu, motherboard, ram, storage, psu, case, cooler)")]
    UnknownCategory(String),

    #[error("no {category} named '{name}' in the catalog")]
    PartNotFound { category: Category, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
