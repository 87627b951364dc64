use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum length, in characters, of a title or author.
pub const MAX_TEXT_LEN: usize = 100;
/// Oldest publication year accepted for new books.
pub const MIN_YEAR: i32 = 1000;
/// On-disk format of `added_date`.
pub const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The closed set of genre labels a book can carry.
///
/// Labels are stored verbatim in `library.json`, including the lowercase
/// `philosophical` and `spiritual novel` entries that older libraries contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    #[default]
    Fiction,
    Philosophical,
    SpiritualNovel,
    NonFiction,
    Science,
    History,
    Biography,
    Fantasy,
    Mystery,
    Technology,
    Romance,
    SelfHelp,
    Poetry,
    Travel,
    Art,
    Adventure,
    Religion,
    Cooking,
    Health,
    Childrens,
    GraphicNovel,
    Comics,
    Drama,
    Thriller,
    Horror,
    Classic,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 27] = [
        Genre::Fiction,
        Genre::Philosophical,
        Genre::SpiritualNovel,
        Genre::NonFiction,
        Genre::Science,
        Genre::History,
        Genre::Biography,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Technology,
        Genre::Romance,
        Genre::SelfHelp,
        Genre::Poetry,
        Genre::Travel,
        Genre::Art,
        Genre::Adventure,
        Genre::Religion,
        Genre::Cooking,
        Genre::Health,
        Genre::Childrens,
        Genre::GraphicNovel,
        Genre::Comics,
        Genre::Drama,
        Genre::Thriller,
        Genre::Horror,
        Genre::Classic,
        Genre::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::Philosophical => "philosophical",
            Genre::SpiritualNovel => "spiritual novel",
            Genre::NonFiction => "Non-Fiction",
            Genre::Science => "Science",
            Genre::History => "History",
            Genre::Biography => "Biography",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Technology => "Technology",
            Genre::Romance => "Romance",
            Genre::SelfHelp => "Self-Help",
            Genre::Poetry => "Poetry",
            Genre::Travel => "Travel",
            Genre::Art => "Art",
            Genre::Adventure => "Adventure",
            Genre::Religion => "Religion",
            Genre::Cooking => "Cooking",
            Genre::Health => "Health",
            Genre::Childrens => "Children's",
            Genre::GraphicNovel => "Graphic Novel",
            Genre::Comics => "Comics",
            Genre::Drama => "Drama",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Classic => "Classic",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .iter()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| format!("Unknown genre: {}", s))
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Genre::from_str(&label).map_err(serde::de::Error::custom)
    }
}

/// Local timestamp recorded when a book is added, at whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddedDate(NaiveDateTime);

impl AddedDate {
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        AddedDate(now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, ADDED_DATE_FORMAT).map(AddedDate)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for AddedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ADDED_DATE_FORMAT))
    }
}

impl Serialize for AddedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AddedDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// One catalog entry.
///
/// Records loaded from disk are taken as they are: a field whose stored value
/// does not fit its Rust type gets a fallback here (`None`, [`Genre::Other`],
/// the JSON text) while the stored value itself is kept and written back
/// unchanged. Keys this program does not know live in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// `None` when the stored value is not a whole number.
    pub publication_year: Option<i32>,
    pub genre: Genre,
    pub read_status: bool,
    /// `None` when the stored value is not in [`ADDED_DATE_FORMAT`].
    pub added_date: Option<AddedDate>,
    pub extra: Map<String, Value>,
    // Stored values that did not fit their field, written back in its place
    stored: Map<String, Value>,
}

impl Book {
    pub fn new(draft: BookDraft) -> Self {
        Self {
            id: new_id(),
            title: draft.title,
            author: draft.author,
            publication_year: Some(draft.publication_year),
            genre: draft.genre,
            read_status: draft.read_status,
            added_date: Some(AddedDate::now()),
            extra: Map::new(),
            stored: Map::new(),
        }
    }

    /// Builds a book from a stored record. Only the presence of the six book
    /// fields is required; their values may have any JSON type.
    pub fn from_record(mut record: Map<String, Value>) -> Result<Self, String> {
        let id = record.remove("id");
        let title = take(&mut record, "title")?;
        let author = take(&mut record, "author")?;
        let year = take(&mut record, "publication_year")?;
        let genre = take(&mut record, "genre")?;
        let read_status = take(&mut record, "read_status")?;
        let added_date = take(&mut record, "added_date")?;

        let mut stored = Map::new();
        let id = match id {
            Some(value) => fit(&mut stored, "id", value, |v| {
                let text = v.as_str().unwrap_or_default();
                match Uuid::parse_str(text) {
                    Ok(id) => (id, id.to_string() == text),
                    Err(_) => (new_id(), false),
                }
            }),
            // Libraries written before ids existed get one on their first load
            None => new_id(),
        };

        Ok(Self {
            id,
            title: fit(&mut stored, "title", title, text),
            author: fit(&mut stored, "author", author, text),
            publication_year: fit(&mut stored, "publication_year", year, |v| match v {
                Value::Number(n) => match n.as_i64().and_then(|y| i32::try_from(y).ok()) {
                    Some(y) => (Some(y), true),
                    None => (None, false),
                },
                Value::String(s) => (s.trim().parse().ok(), false),
                _ => (None, false),
            }),
            genre: fit(&mut stored, "genre", genre, |v| match v.as_str() {
                Some(label) => match Genre::from_str(label) {
                    Ok(genre) => (genre, genre.label() == label),
                    Err(_) => (Genre::Other, false),
                },
                None => (Genre::Other, false),
            }),
            read_status: fit(&mut stored, "read_status", read_status, |v| match v {
                Value::Bool(b) => (*b, true),
                other => (truthy(other), false),
            }),
            added_date: fit(&mut stored, "added_date", added_date, |v| {
                match v.as_str().and_then(|s| AddedDate::parse(s).ok()) {
                    Some(date) => (Some(date), true),
                    None => (None, false),
                }
            }),
            extra: record,
            stored,
        })
    }

    /// First eight hex digits of the id, enough to select a book from the CLI.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn decade(&self) -> Option<i32> {
        self.publication_year.map(|y| y.div_euclid(10) * 10)
    }

    pub fn set_read_status(&mut self, read_status: bool) {
        self.read_status = read_status;
        self.stored.remove("read_status");
    }

    /// The year as it reads in the library file.
    pub fn year_text(&self) -> String {
        self.stored_text("publication_year")
            .or_else(|| self.publication_year.map(|y| y.to_string()))
            .unwrap_or_default()
    }

    /// The genre label as it reads in the library file.
    pub fn genre_label(&self) -> String {
        self.stored_text("genre")
            .unwrap_or_else(|| self.genre.label().to_string())
    }

    pub fn added_text(&self) -> String {
        self.stored_text("added_date")
            .or_else(|| self.added_date.map(|d| d.to_string()))
            .unwrap_or_default()
    }

    /// True when some field kept a stored value of the wrong type.
    pub fn has_stored_values(&self) -> bool {
        !self.stored.is_empty()
    }

    fn stored_text(&self, field: &str) -> Option<String> {
        self.stored.get(field).map(|v| text(v).0)
    }
}

fn take(record: &mut Map<String, Value>, field: &str) -> Result<Value, String> {
    record
        .remove(field)
        .ok_or_else(|| format!("missing field `{}`", field))
}

/// Decodes `value` for `field`; values that do not decode exactly are kept in
/// `stored`.
fn fit<T>(
    stored: &mut Map<String, Value>,
    field: &str,
    value: Value,
    decode: impl FnOnce(&Value) -> (T, bool),
) -> T {
    let (typed, exact) = decode(&value);
    if !exact {
        stored.insert(field.to_string(), value);
    }
    typed
}

fn text(value: &Value) -> (String, bool) {
    match value {
        Value::String(s) => (s.clone(), true),
        other => (other.to_string(), false),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = self.extra.clone();
        record.insert("id".into(), Value::String(self.id.to_string()));
        record.insert("title".into(), Value::String(self.title.clone()));
        record.insert("author".into(), Value::String(self.author.clone()));
        if let Some(year) = self.publication_year {
            record.insert("publication_year".into(), Value::from(year));
        }
        record.insert("genre".into(), Value::String(self.genre.label().to_string()));
        record.insert("read_status".into(), Value::Bool(self.read_status));
        if let Some(date) = self.added_date {
            record.insert("added_date".into(), Value::String(date.to_string()));
        }
        for (field, value) in &self.stored {
            record.insert(field.clone(), value.clone());
        }
        record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Book {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Book::from_record(record).map_err(serde::de::Error::custom)
    }
}

/// User input for a new book, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: Genre,
    pub read_status: bool,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year: current_year(),
            genre: Genre::default(),
            read_status: false,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.publication_year = year;
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn read(mut self, read_status: bool) -> Self {
        self.read_status = read_status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_parses_case_insensitively() {
        assert_eq!("fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!(
            "Spiritual Novel".parse::<Genre>().unwrap(),
            Genre::SpiritualNovel
        );
        assert_eq!("children's".parse::<Genre>().unwrap(), Genre::Childrens);
        assert!("Cyberpunk".parse::<Genre>().is_err());
    }

    #[test]
    fn genre_serializes_as_label() {
        let json = serde_json::to_string(&Genre::SelfHelp).unwrap();
        assert_eq!(json, "\"Self-Help\"");
        let back: Genre = serde_json::from_str("\"philosophical\"").unwrap();
        assert_eq!(back, Genre::Philosophical);
    }

    #[test]
    fn added_date_uses_fixed_format() {
        let date = AddedDate::parse("2024-03-09 07:05:01").unwrap();
        assert_eq!(date.to_string(), "2024-03-09 07:05:01");
        assert!(AddedDate::parse("2024-03-09T07:05:01").is_err());
    }

    #[test]
    fn added_date_now_has_no_fraction() {
        let now = AddedDate::now();
        assert_eq!(now.as_naive().nanosecond(), 0);
        assert_eq!(AddedDate::parse(&now.to_string()).unwrap(), now);
    }

    #[test]
    fn book_without_id_gets_one() {
        let json = r#"{
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "genre": "Fiction",
            "read_status": true,
            "added_date": "2024-01-01 10:00:00"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(!book.id.is_nil());
        assert_eq!(book.decade(), Some(1960));
    }

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn odd_values_are_kept_and_written_back() {
        let original = serde_json::json!({
            "id": "6f1c1f5e-3f0b-4d7f-9a55-1b2c3d4e5f60",
            "title": "Neuromancer",
            "author": "William Gibson",
            "publication_year": "1984",
            "genre": "Sci-Fi",
            "read_status": "yes",
            "added_date": "last spring"
        });
        let book = Book::from_record(record(original.clone())).unwrap();

        assert_eq!(book.publication_year, Some(1984));
        assert_eq!(book.genre, Genre::Other);
        assert_eq!(book.genre_label(), "Sci-Fi");
        assert!(book.read_status);
        assert_eq!(book.added_date, None);
        assert_eq!(book.added_text(), "last spring");
        assert!(book.has_stored_values());

        assert_eq!(serde_json::to_value(&book).unwrap(), original);
    }

    #[test]
    fn unknown_keys_round_trip() {
        let original = serde_json::json!({
            "id": "6f1c1f5e-3f0b-4d7f-9a55-1b2c3d4e5f60",
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "genre": "Fiction",
            "read_status": false,
            "added_date": "2024-01-01 10:00:00",
            "notes": "signed copy"
        });
        let book = Book::from_record(record(original.clone())).unwrap();
        assert!(!book.has_stored_values());
        assert_eq!(book.extra["notes"], Value::from("signed copy"));
        assert_eq!(serde_json::to_value(&book).unwrap(), original);
    }

    #[test]
    fn unparseable_year_has_no_decade() {
        let book = Book::from_record(record(serde_json::json!({
            "title": "Untitled",
            "author": "Anonymous",
            "publication_year": "unknown",
            "genre": "Poetry",
            "read_status": false,
            "added_date": "2024-01-01 10:00:00"
        })))
        .unwrap();
        assert_eq!(book.publication_year, None);
        assert_eq!(book.decade(), None);
        assert_eq!(book.year_text(), "unknown");
    }

    #[test]
    fn setting_read_status_replaces_stored_value() {
        let mut book = Book::from_record(record(serde_json::json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "genre": "Fiction",
            "read_status": 0,
            "added_date": "2024-01-01 10:00:00"
        })))
        .unwrap();
        assert!(!book.read_status);
        book.set_read_status(true);
        assert!(!book.has_stored_values());
        assert_eq!(serde_json::to_value(&book).unwrap()["read_status"], Value::Bool(true));
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = Book::from_record(record(serde_json::json!({"title": "B"}))).unwrap_err();
        assert!(err.contains("author"));
    }

    #[test]
    fn short_id_is_prefix_of_id() {
        let book = Book::new(BookDraft::new("A", "B"));
        assert_eq!(book.short_id().len(), 8);
        assert!(book.id.simple().to_string().starts_with(&book.short_id()));
    }
}
