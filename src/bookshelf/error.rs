use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Index {index} is out of range (library has {len} book(s))")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Invalid book: {0}")]
    InvalidBook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
