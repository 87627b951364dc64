use super::{parse_records, CatalogStore, RawLoad, Recovery};
use crate::error::{LibraryError, Result};
use crate::model::Book;

/// Keeps the library as raw JSON text in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    content: Option<String>,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given stored text, as if it had been read from disk.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail with an IO error.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CatalogStore for InMemoryStore {
    fn load(&mut self) -> Result<RawLoad> {
        let Some(content) = &self.content else {
            return Ok(RawLoad::default());
        };

        match parse_records(content) {
            Ok(records) => Ok(RawLoad {
                records,
                recovery: None,
            }),
            Err(reason) => {
                self.content = Some("[]".to_string());
                Ok(RawLoad {
                    records: Vec::new(),
                    recovery: Some(Recovery {
                        reason,
                        backup: None,
                    }),
                })
            }
        }
    }

    fn save(&mut self, books: &[Book]) -> Result<()> {
        if self.fail_saves {
            return Err(LibraryError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.content = Some(serde_json::to_string_pretty(books)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{BookDraft, Genre};

    /// Builds stored library text from a list of books.
    pub struct StoreFixture {
        books: Vec<Book>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self { books: Vec::new() }
        }

        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = BookDraft::new(format!("Test Book {}", i + 1), "Test Author")
                    .year(1990 + i as i32);
                self.books.push(Book::new(draft));
            }
            self
        }

        pub fn with_book(mut self, title: &str, author: &str, year: i32, genre: Genre) -> Self {
            let draft = BookDraft::new(title, author).year(year).genre(genre);
            self.books.push(Book::new(draft));
            self
        }

        pub fn with_read_book(mut self, title: &str, author: &str) -> Self {
            let draft = BookDraft::new(title, author).year(2001).read(true);
            self.books.push(Book::new(draft));
            self
        }

        pub fn books(&self) -> &[Book] {
            &self.books
        }

        pub fn store(&self) -> InMemoryStore {
            let content = serde_json::to_string_pretty(&self.books).unwrap();
            InMemoryStore::with_content(content)
        }
    }
}
