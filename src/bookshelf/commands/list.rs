use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::index_books;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

/// Lists books in catalog order. Filtering keeps each book's catalog position.
pub fn run(catalog: &Catalog, filter: ReadFilter) -> Result<CmdResult> {
    let listed = index_books(catalog.books())
        .into_iter()
        .filter(|db| match filter {
            ReadFilter::All => true,
            ReadFilter::Read => db.book.read_status,
            ReadFilter::Unread => !db.book.read_status,
        })
        .collect();

    Ok(CmdResult::default().with_listed_books(listed))
}
