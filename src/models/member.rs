//! Member (borrower) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registered borrower
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registered_at: DateTime<Utc>,
    /// Ids of the books held on open loans, in borrowing order
    pub borrowed_books: Vec<i32>,
}

impl Member {
    pub fn new(id: i32, member: CreateMember, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: member.name,
            email: member.email,
            phone: member.phone,
            registered_at,
            borrowed_books: Vec::new(),
        }
    }

    pub fn holds(&self, book_id: i32) -> bool {
        self.borrowed_books.contains(&book_id)
    }
}

/// Register member request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
}
