//! # API Facade
//!
//! [`LibraryApi`] is the application state of a session: it owns the store and
//! the in-memory catalog, and every operation goes through it. There are no
//! globals; a UI creates one `LibraryApi` per session and passes it around.
//!
//! The facade:
//! - **Dispatches** to the command modules
//! - **Normalizes inputs**, turning selector strings such as `2`, `1-3` or an
//!   id prefix into [`BookSelector`]s
//! - **Returns structured types** (`Result<CmdResult>`), never strings to print
//!
//! `LibraryApi<S: CatalogStore>` is generic over storage:
//! - Production: `LibraryApi<FileStore>`
//! - Testing: `LibraryApi<InMemoryStore>`

use crate::catalog::{Catalog, SearchField};
use crate::commands;
use crate::error::{LibraryError, Result};
use crate::index::{self, BookSelector};
use crate::model::BookDraft;
use crate::store::CatalogStore;
use std::path::Path;

pub struct LibraryApi<S: CatalogStore> {
    store: S,
    catalog: Catalog,
}

impl<S: CatalogStore> LibraryApi<S> {
    /// Loads the library from `store`. The returned result carries the
    /// startup diagnostics (corruption notices, dropped records).
    pub fn open(mut store: S) -> Result<(Self, commands::CmdResult)> {
        let (catalog, result) = commands::open::run(&mut store)?;
        Ok((Self { store, catalog }, result))
    }

    pub fn add_book(&mut self, draft: BookDraft) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, &mut self.catalog, draft)
    }

    pub fn remove_books<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::remove::run(&mut self.store, &mut self.catalog, &selectors)
    }

    pub fn set_read_status<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        change: StatusChange,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::status::run(&mut self.store, &mut self.catalog, &selectors, change)
    }

    pub fn list_books(&self, filter: ReadFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.catalog, filter)
    }

    pub fn view_books<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.catalog, &selectors)
    }

    pub fn search_books(&self, term: &str, field: SearchField) -> Result<commands::CmdResult> {
        commands::search::run(&self.catalog, term, field)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Reads or changes the configuration in `data_dir`. Needs no open library.
pub fn config(data_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(data_dir, action)
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<BookSelector>> {
    if inputs.is_empty() {
        return Err(LibraryError::Api("No books selected".to_string()));
    }
    index::parse_selectors(inputs).map_err(LibraryError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ReadFilter;
pub use crate::commands::status::StatusChange;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
