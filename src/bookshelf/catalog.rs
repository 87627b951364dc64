use crate::error::{LibraryError, Result};
use crate::index::{index_books, BookSelector, DisplayBook};
use crate::model::Book;
use std::str::FromStr;
use uuid::Uuid;

/// Which book field a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
    PublicationYear,
}

impl SearchField {
    pub fn name(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
            SearchField::PublicationYear => "publication_year",
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "genre" => Ok(SearchField::Genre),
            "publication_year" | "year" => Ok(SearchField::PublicationYear),
            other => Err(format!(
                "Unknown search field: {} (expected title, author, genre or publication_year)",
                other
            )),
        }
    }
}

/// The books of the current session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn position_of(&self, id: &Uuid) -> Option<usize> {
        self.books.iter().position(|b| &b.id == id)
    }

    pub fn add(&mut self, book: Book) -> usize {
        self.books.push(book);
        self.books.len() - 1
    }

    /// Removes the book at a 0-based `index`; later books shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Book> {
        self.check_index(index)?;
        Ok(self.books.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &Uuid) -> Result<Book> {
        let index = self
            .position_of(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;
        self.remove(index)
    }

    pub fn update_read_status(&mut self, index: usize, read_status: bool) -> Result<&Book> {
        self.check_index(index)?;
        let book = &mut self.books[index];
        book.set_read_status(read_status);
        Ok(book)
    }

    pub fn update_read_status_by_id(&mut self, id: &Uuid, read_status: bool) -> Result<&Book> {
        let index = self
            .position_of(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;
        self.update_read_status(index, read_status)
    }

    /// Case-insensitive substring search over one field.
    ///
    /// Years are matched as text, so `19` finds 1990 as well as 2019.
    pub fn search(&self, term: &str, field: SearchField) -> Vec<DisplayBook> {
        let term = term.to_lowercase();
        index_books(&self.books)
            .into_iter()
            .filter(|db| {
                let book = &db.book;
                match field {
                    SearchField::Title => book.title.to_lowercase().contains(&term),
                    SearchField::Author => book.author.to_lowercase().contains(&term),
                    SearchField::Genre => book.genre_label().to_lowercase().contains(&term),
                    SearchField::PublicationYear => {
                        book.year_text().to_lowercase().contains(&term)
                    }
                }
            })
            .collect()
    }

    /// Resolves selectors to `(position, id)` pairs without touching the books.
    ///
    /// Every selector must resolve; the first failure is returned. A range is
    /// expanded only once both of its ends are known to exist.
    pub fn resolve(&self, selectors: &[BookSelector]) -> Result<Vec<(usize, Uuid)>> {
        let mut resolved = Vec::new();
        for selector in selectors {
            match selector {
                BookSelector::Position(n) => {
                    let position = self.check_position(*n)?;
                    resolved.push((position, self.books[position - 1].id));
                }
                BookSelector::Range(start, end) => {
                    let first = self.check_position(*start)?;
                    let last = self.check_position(*end)?;
                    resolved.extend((first..=last).map(|p| (p, self.books[p - 1].id)));
                }
                BookSelector::Id(prefix) => resolved.push(self.resolve_prefix(prefix)?),
            }
        }
        Ok(resolved)
    }

    fn check_position(&self, n: i64) -> Result<usize> {
        let len = self.books.len();
        if n < 1 || n as u64 > len as u64 {
            return Err(LibraryError::IndexOutOfRange { index: n, len });
        }
        Ok(n as usize)
    }

    fn resolve_prefix(&self, prefix: &str) -> Result<(usize, Uuid)> {
        let mut matches = self
            .books
            .iter()
            .enumerate()
            .filter(|(_, b)| b.id.simple().to_string().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some((i, book)), None) => Ok((i + 1, book.id)),
            (None, _) => Err(LibraryError::BookNotFound(prefix.to_string())),
            (Some(_), Some(_)) => Err(LibraryError::Api(format!(
                "Id prefix {} matches more than one book",
                prefix
            ))),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.books.len() {
            return Err(LibraryError::IndexOutOfRange {
                index: index as i64,
                len: self.books.len(),
            });
        }
        Ok(())
    }
}
