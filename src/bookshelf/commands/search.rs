use super::plural;
use crate::catalog::{Catalog, SearchField};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(catalog: &Catalog, term: &str, field: SearchField) -> Result<CmdResult> {
    let matches = catalog.search(term, field);
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::warning("No results found."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Found {}.",
            plural(matches.len(), "result")
        )));
    }
    Ok(result.with_listed_books(matches))
}
