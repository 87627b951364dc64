use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::stats::LibraryStats;

pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if catalog.is_empty() {
        result.add_message(CmdMessage::warning(
            "Your library is empty. Add some books first.",
        ));
    }
    Ok(result.with_stats(LibraryStats::compute(catalog.books())))
}
