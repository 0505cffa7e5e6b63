//! Book (catalog entry) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
    pub genre: Option<String>,
    /// False while an open loan references this book
    pub available: bool,
}

impl Book {
    pub fn new(id: i32, book: CreateBook) -> Self {
        Self {
            id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            publication_date: book.publication_date,
            genre: book.genre,
            available: true,
        }
    }

    /// Case-insensitive substring match on the author name.
    /// `needle` must already be lowercased.
    pub fn author_matches(&self, needle: &str) -> bool {
        self.author.to_lowercase().contains(needle)
    }

    pub fn isbn_matches(&self, isbn: &str) -> bool {
        normalize_isbn(&self.isbn) == normalize_isbn(isbn)
    }
}

/// Register book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub publication_date: NaiveDate,
    pub genre: Option<String>,
}

/// Book query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive author substring
    pub author: Option<String>,
    /// ISBN, with or without separators
    pub isbn: Option<String>,
}

/// Strip separators so `978-2-07-040850-4` and `9782070408504` compare equal
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
