//! # Bookshelf Architecture
//!
//! Bookshelf is a **UI-agnostic personal library catalog**. The terminal client in
//! `cli/` is one consumer of the library; nothing below `api.rs` knows about it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the application state (store + catalog)             │
//! │  - Normalizes inputs (selector strings → BookSelector)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutate the catalog, persist, return CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (catalog.rs, validate.rs, stats.rs, store/)           │
//! │  - In-memory catalog, load validation, aggregate stats      │
//! │  - CatalogStore trait: FileStore, InMemoryStore             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Users refer to books by their position in the listing (`1`, `2-4`) or by an id
//! prefix. Positions are resolved to stable UUIDs before anything is mutated, so a
//! multi-book removal never hits the wrong record after the first deletion shifts
//! the list. See `index.rs`.
//!
//! ## Startup
//!
//! Every session starts with [`api::LibraryApi::open`]: the store yields raw JSON
//! records, [`validate`] drops the malformed ones, and the filtered set is written
//! back so a bad record never survives a second load.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and application state
//! - [`commands`]: One module per operation
//! - [`catalog`]: In-memory ordered book collection and search
//! - [`index`]: Display positions and book selectors
//! - [`stats`]: Aggregate statistics
//! - [`validate`]: Load-time record filtering
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Book`, `Genre`, `AddedDate`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod stats;
pub mod store;
pub mod validate;
