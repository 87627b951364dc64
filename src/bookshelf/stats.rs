//! Aggregate statistics over the catalog.
//!
//! Computing stats never touches the store. Genre and author tallies are sorted by
//! count, most frequent first; equal counts keep the order in which the keys
//! were first seen. Decades are sorted oldest first; books whose year is not a
//! number are left out of them.

use crate::model::Book;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub read_books: usize,
    pub percent_read: f64,
    pub genres: Vec<(String, usize)>,
    pub authors: Vec<(String, usize)>,
    pub decades: Vec<(i32, usize)>,
}

impl LibraryStats {
    pub fn compute(books: &[Book]) -> Self {
        let mut read_books = 0;
        let mut genres = Tally::default();
        let mut authors = Tally::default();
        let mut decades: BTreeMap<i32, usize> = BTreeMap::new();

        for book in books {
            if book.read_status {
                read_books += 1;
            }
            genres.bump(book.genre_label());
            authors.bump(book.author.clone());
            if let Some(decade) = book.decade() {
                *decades.entry(decade).or_insert(0) += 1;
            }
        }

        let total_books = books.len();
        let percent_read = if total_books == 0 {
            0.0
        } else {
            read_books as f64 / total_books as f64 * 100.0
        };

        Self {
            total_books,
            read_books,
            percent_read,
            genres: genres.into_sorted(),
            authors: authors.into_sorted(),
            decades: decades.into_iter().collect(),
        }
    }

    pub fn top_authors(&self, n: usize) -> &[(String, usize)] {
        &self.authors[..n.min(self.authors.len())]
    }
}

/// Counts keys while remembering the order they were first seen in.
struct Tally<K> {
    counts: Vec<(K, usize)>,
    slots: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    fn bump(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    fn into_sorted(mut self) -> Vec<(K, usize)> {
        // sort_by is stable: ties stay in discovery order
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
    }
}
