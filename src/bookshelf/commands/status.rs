use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::BookSelector;
use crate::store::CatalogStore;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Read,
    Unread,
    Toggle,
}

pub fn run<S: CatalogStore>(
    store: &mut S,
    catalog: &mut Catalog,
    selectors: &[BookSelector],
    change: StatusChange,
) -> Result<CmdResult> {
    let resolved = catalog.resolve(selectors)?;
    let mut result = CmdResult::default();
    let mut seen = HashSet::new();

    for (position, id) in resolved {
        if !seen.insert(id) {
            continue;
        }
        let current = catalog
            .position_of(&id)
            .and_then(|i| catalog.get(i))
            .map(|b| b.read_status)
            .unwrap_or_default();
        let read_status = match change {
            StatusChange::Read => true,
            StatusChange::Unread => false,
            StatusChange::Toggle => !current,
        };

        let book = catalog.update_read_status_by_id(&id, read_status)?.clone();
        let label = if read_status { "read" } else { "unread" };
        result.add_message(CmdMessage::success(format!(
            "Marked as {} ({}): {}",
            label, position, book.title
        )));
        result.affected_books.push(book);
    }

    if !result.affected_books.is_empty() {
        store.save(catalog.books())?;
    }

    Ok(result)
}
