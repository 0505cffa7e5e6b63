//! Repository layer: in-memory stores keyed by id

pub mod books;
pub mod loans;
pub mod members;

use crate::error::{AppError, AppResult};

/// Monotonic id allocator starting at 1
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: i32,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hands out ids up to `i32::MAX - 1`, then fails without wrapping
    pub fn next_id(&mut self) -> AppResult<i32> {
        let id = self.next;
        self.next = id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("Id space exhausted".to_string()))?;
        Ok(id)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the catalog, member and loan stores
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub members: members::MembersRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }
}
