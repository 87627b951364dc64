use super::plural;
use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CatalogStore;
use crate::validate::validate;

/// Loads and validates the stored library, then writes the filtered set back.
///
/// Unreadable data and failed write-backs become messages, not errors: the
/// session continues with whatever could be read.
pub fn run<S: CatalogStore>(store: &mut S) -> Result<(Catalog, CmdResult)> {
    let raw = store.load()?;
    let mut result = CmdResult::default();

    if let Some(recovery) = &raw.recovery {
        result.add_message(CmdMessage::error(format!(
            "Library at {} is corrupted ({}). Starting a new library.",
            store.location(),
            recovery.reason
        )));
        if let Some(backup) = &recovery.backup {
            result.add_message(CmdMessage::warning(format!(
                "The unreadable file was kept as {}",
                backup.display()
            )));
        }
    }

    let stored = raw.records.len();
    let validated = validate(raw.records);

    if validated.dropped > 0 {
        result.add_message(CmdMessage::info(format!(
            "Dropped {} out of {}.",
            plural(validated.dropped, "malformed record"),
            stored
        )));
    }

    // An empty or missing store has nothing to rewrite
    if stored > 0 {
        if let Err(e) = store.save(&validated.books) {
            result.add_message(CmdMessage::warning(format!(
                "Could not rewrite {}: {}",
                store.location(),
                e
            )));
        }
    }

    result.add_message(CmdMessage::info(format!(
        "Loaded {} from {}.",
        plural(validated.books.len(), "book"),
        store.location()
    )));

    Ok((Catalog::new(validated.books), result))
}
