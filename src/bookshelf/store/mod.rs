//! # Storage Layer
//!
//! The [`CatalogStore`] trait hides where the library lives. The catalog is small
//! and always handled as a whole: a store hands back every raw record on load and
//! receives the complete book list on save.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, a single JSON array in `library.json`
//!   - Saves write a temporary sibling and rename it over the target
//!   - A corrupt file is renamed to `library.json.corrupt-<timestamp>` before the
//!     store is reset to `[]`
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - Holds the raw text, so corruption can be simulated
//!   - Counts saves and can be told to fail them
//!
//! ## Raw Records
//!
//! `load` returns [`serde_json::Value`]s rather than books. Deciding which records
//! are usable is the job of [`crate::validate`], which keeps this layer ignorant
//! of the book schema.

use crate::error::Result;
use crate::model::Book;
use serde_json::Value;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// What the store had to do to recover from an unreadable library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Why the stored data could not be read
    pub reason: String,
    /// Where the unreadable data was preserved, if anywhere
    pub backup: Option<PathBuf>,
}

/// Raw result of reading the store.
#[derive(Debug, Default)]
pub struct RawLoad {
    pub records: Vec<Value>,
    pub recovery: Option<Recovery>,
}

/// Abstract interface for catalog persistence.
pub trait CatalogStore {
    /// Read every stored record. A missing store is empty, not an error.
    /// Unreadable data is reset to an empty array and reported in `recovery`.
    fn load(&mut self) -> Result<RawLoad>;

    /// Replace the stored library with `books`.
    fn save(&mut self, books: &[Book]) -> Result<()>;

    /// Human readable location of the store.
    fn location(&self) -> String;
}

/// Parses stored text into raw records. Anything but a JSON array is unreadable.
pub(crate) fn parse_records(text: &str) -> std::result::Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err("library root is not a JSON array".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
