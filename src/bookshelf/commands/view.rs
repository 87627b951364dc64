use crate::catalog::Catalog;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{BookSelector, DisplayBook};

pub fn run(catalog: &Catalog, selectors: &[BookSelector]) -> Result<CmdResult> {
    let resolved = catalog.resolve(selectors)?;
    let listed = resolved
        .into_iter()
        .filter_map(|(index, id)| {
            let book = catalog.get(catalog.position_of(&id)?)?.clone();
            Some(DisplayBook { index, book })
        })
        .collect();
    Ok(CmdResult::default().with_listed_books(listed))
}
