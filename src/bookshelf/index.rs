//! # Display Positions and Selectors
//!
//! Books are shown numbered from 1 in catalog order. That number is what users
//! type, but it is not an identity: removing book 2 turns book 3 into book 2.
//! Commands therefore resolve every [`BookSelector`] to a book id before they
//! touch the catalog, and then act on ids only.
//!
//! Accepted selector forms:
//! - Position: `3` (1-based; `0` and negatives parse but never resolve)
//! - Range: `2-4` selects 2, 3 and 4; both ends are checked against the
//!   catalog before the range is expanded
//! - Id prefix: `6f1c1f5e` or a full hyphenated UUID (at least four hex digits,
//!   and not all digits, since those read as positions)

use crate::model::Book;
use std::str::FromStr;

/// A book paired with its 1-based position in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBook {
    pub index: usize,
    pub book: Book,
}

/// Numbers a list of books for display, starting at 1.
pub fn index_books(books: &[Book]) -> Vec<DisplayBook> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| DisplayBook {
            index: i + 1,
            book: book.clone(),
        })
        .collect()
}

/// A user reference to one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSelector {
    Position(i64),
    /// Inclusive range of positions, `start <= end`.
    Range(i64, i64),
    Id(String),
}

impl std::fmt::Display for BookSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookSelector::Position(n) => write!(f, "{}", n),
            BookSelector::Range(start, end) => write!(f, "{}-{}", start, end),
            BookSelector::Id(prefix) => write!(f, "#{}", prefix),
        }
    }
}

const MIN_ID_PREFIX: usize = 4;

impl FromStr for BookSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(BookSelector::Position(n));
        }

        let hex: String = s.chars().filter(|c| *c != '-').collect();
        let is_uuid_like = s.len() == 36 || !s.contains('-');
        if is_uuid_like
            && hex.len() >= MIN_ID_PREFIX
            && hex.len() <= 32
            && hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Ok(BookSelector::Id(hex.to_ascii_lowercase()));
        }

        Err(format!("Invalid book selector: {}", s))
    }
}

/// Parses a single selector or a position range such as `2-4`.
///
/// Range rules:
/// - Both endpoints must be positive positions
/// - Start must be <= end (`3-3` is valid, `3-2` is an error)
/// - Whether the positions exist is checked later, during resolution
pub fn parse_selector_or_range(s: &str) -> Result<BookSelector, String> {
    let s = s.trim();
    if let Some(dash_pos) = s.find('-') {
        // A leading '-' is a negative position, a 36 char input is a full UUID
        if dash_pos > 0 && s.len() != 36 {
            let start_str = &s[..dash_pos];
            let end_str = &s[dash_pos + 1..];
            if let (Ok(start), Ok(end)) = (start_str.parse::<i64>(), end_str.parse::<i64>()) {
                if start > end {
                    return Err(format!(
                        "Invalid range: start ({}) must be <= end ({})",
                        start, end
                    ));
                }
                return Ok(BookSelector::Range(start, end));
            }
        }
    }

    BookSelector::from_str(s)
}

/// Parses every input in the order given.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<BookSelector>, String> {
    inputs
        .iter()
        .map(|input| parse_selector_or_range(input.as_ref()))
        .collect()
}
