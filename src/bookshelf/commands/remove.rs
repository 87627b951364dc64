use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::store::CatalogStore;
use std::collections::HashSet;

/// Removes the selected books.
///
/// All selectors are resolved against the current listing first, so `1 2`
/// removes the first two books rather than the first and the third.
pub fn run<S: CatalogStore>(
    store: &mut S,
    catalog: &mut Catalog,
    selectors: &[BookSelector],
) -> Result<CmdResult> {
    let resolved = catalog.resolve(selectors)?;
    let mut result = CmdResult::default();
    let mut seen = HashSet::new();

    for (position, id) in resolved {
        if !seen.insert(id) {
            continue;
        }
        let book = catalog.remove_by_id(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Book removed ({}): {}",
            position, book.title
        )));
        result.affected_books.push(book);
    }

    if !result.affected_books.is_empty() {
        store.save(catalog.books())?;
    }

    Ok(result)
}
