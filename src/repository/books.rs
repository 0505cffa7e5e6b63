//! Catalog store

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

use super::IdSequence;

#[derive(Debug, Clone, Default)]
pub struct BooksRepository {
    books: IndexMap<i32, Book>,
    ids: IdSequence,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new book; it starts out available
    pub fn create(&mut self, book: CreateBook) -> AppResult<&Book> {
        let id = self.ids.next_id()?;
        Ok(self.books.entry(id).or_insert(Book::new(id, book)))
    }

    /// Get book by ID
    pub fn get_by_id(&self, id: i32) -> AppResult<&Book> {
        self.books.get(&id).ok_or(AppError::NoSuchBook(id))
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> AppResult<&mut Book> {
        self.books.get_mut(&id).ok_or(AppError::NoSuchBook(id))
    }

    /// All books in registration order
    pub fn list(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn find_by_author(&self, substring: &str) -> Vec<&Book> {
        let needle = substring.to_lowercase();
        self.books
            .values()
            .filter(|book| book.author_matches(&needle))
            .collect()
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.values().find(|book| book.isbn_matches(isbn))
    }

    pub fn count(&self) -> usize {
        self.books.len()
    }

    pub fn count_available(&self) -> usize {
        self.books.values().filter(|book| book.available).count()
    }
}
