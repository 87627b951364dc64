use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibraryError, Result};
use crate::model::{current_year, Book, BookDraft, MAX_TEXT_LEN, MIN_YEAR};
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(
    store: &mut S,
    catalog: &mut Catalog,
    draft: BookDraft,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let title = draft.title.trim().to_string();
    let author = draft.author.trim().to_string();

    if title.is_empty() || author.is_empty() {
        result.add_message(CmdMessage::warning(
            "Title and author are required. No book was added.",
        ));
        return Ok(result);
    }

    check_length("Title", &title)?;
    check_length("Author", &author)?;

    let max_year = current_year();
    if !(MIN_YEAR..=max_year).contains(&draft.publication_year) {
        return Err(LibraryError::InvalidBook(format!(
            "Publication year must be between {} and {}, got {}",
            MIN_YEAR, max_year, draft.publication_year
        )));
    }

    let book = Book::new(BookDraft {
        title,
        author,
        ..draft
    });
    let index = catalog.add(book.clone());
    store.save(catalog.books())?;

    result.add_message(CmdMessage::success(format!(
        "Book added ({}): {} by {}",
        index + 1,
        book.title,
        book.author
    )));
    result.affected_books.push(book);
    Ok(result)
}

fn check_length(field: &str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(LibraryError::InvalidBook(format!(
            "{} is {} characters long; the limit is {}",
            field, len, MAX_TEXT_LEN
        )));
    }
    Ok(())
}
