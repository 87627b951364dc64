//! # CLI Behavior
//!
//! This is **one possible UI client** for bookshelf, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting. For the overall architecture, see the library docs.
//!
//! ## Naked Execution (`bookshelf`)
//!
//! Running `bookshelf` with no arguments lists the library.
//!
//! ## Selecting Books
//!
//! Per-book commands (`view`, `remove`, `read`, `unread`, `toggle`) take the
//! numbers shown by `list`, ranges like `2-4`, or the id prefix shown by `view`.
//! Numbers are resolved once, up front: `bookshelf rm 1 2` removes the first two
//! books as listed, not the first and the third.
//!
//! ## Data Location
//!
//! The library and its `config.json` live in the platform data directory, or in
//! `$BOOKSHELF_HOME` when set.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers that call the API
//! - `render`: Output formatting (lists, records, stats, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
