//! Data models for the lending desk

pub mod book;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBook};
pub use loan::{CreateLoan, Loan, LoanQuery, LoanStatus};
pub use member::{CreateMember, Member};
