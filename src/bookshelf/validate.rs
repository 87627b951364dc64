//! Load-time filtering of stored records.
//!
//! A record survives if it is a JSON object carrying all six book fields. The
//! values themselves are not checked: [`Book::from_record`] keeps whatever it
//! cannot type. Everything else is dropped without comment; callers only learn
//! how many records went missing.

use crate::model::Book;
use serde_json::Value;

pub const REQUIRED_FIELDS: [&str; 6] = [
    "title",
    "author",
    "publication_year",
    "genre",
    "read_status",
    "added_date",
];

#[derive(Debug, Default)]
pub struct Validated {
    pub books: Vec<Book>,
    pub dropped: usize,
}

pub fn validate(records: Vec<Value>) -> Validated {
    let mut result = Validated::default();

    for record in records {
        match decode(record) {
            Some(book) => result.books.push(book),
            None => result.dropped += 1,
        }
    }

    result
}

fn decode(record: Value) -> Option<Book> {
    let Value::Object(object) = record else {
        return None;
    };
    if !REQUIRED_FIELDS.iter().all(|field| object.contains_key(*field)) {
        return None;
    }
    Book::from_record(object).ok()
}
