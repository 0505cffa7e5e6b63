//! Lending service: the only writer of the catalog, member and loan stores.
//!
//! Every mutation keeps two invariants:
//! - a book is unavailable iff an open loan references it;
//! - a member's `borrowed_books` lists exactly the books of their open loans.
//!
//! Failed operations log a diagnostic and leave all stores untouched.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook},
        loan::Loan,
        member::{CreateMember, Member},
    },
    repository::Repository,
};

#[derive(Debug, Clone)]
pub struct LendingService {
    repository: Repository,
    config: LoansConfig,
    loan_duration: Duration,
}

impl LendingService {
    /// Out-of-range loan lengths are clamped (and logged) rather than
    /// producing due dates before the loan date.
    pub fn new(config: LoansConfig) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!("{}; clamping", e);
        }
        Self {
            repository: Repository::new(),
            loan_duration: config.duration(),
            config,
        }
    }

    fn loan_duration(&self) -> Duration {
        self.loan_duration
    }

    /// Read-only access to the stores
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Add a book to the catalog
    pub fn register_book(&mut self, book: CreateBook) -> AppResult<Book> {
        let book = self.repository.books.create(book)?.clone();
        tracing::info!(book_id = book.id, "Registered book \"{}\"", book.title);
        Ok(book)
    }

    /// Add a member with no loans
    pub fn register_member(&mut self, member: CreateMember) -> AppResult<Member> {
        let member = self.repository.members.create(member, Utc::now())?.clone();
        tracing::info!(member_id = member.id, "Registered member {}", member.name);
        Ok(member)
    }

    /// Lend an available book to a member
    pub fn create_loan(&mut self, book_id: i32, member_id: i32) -> AppResult<Loan> {
        let result = self.try_create_loan(book_id, member_id);
        match &result {
            Ok(loan) => tracing::info!(
                loan_id = loan.id,
                book_id,
                member_id,
                "Loan created, due {}",
                loan.due_date.format("%Y-%m-%d")
            ),
            Err(e) => tracing::warn!(book_id, member_id, "Loan refused: {}", e),
        }
        result
    }

    fn try_create_loan(&mut self, book_id: i32, member_id: i32) -> AppResult<Loan> {
        let duration = self.loan_duration();
        let Repository {
            books,
            members,
            loans,
        } = &mut self.repository;

        let book = books.get_mut(book_id)?;
        let member = members.get_mut(member_id)?;
        if !book.available {
            return Err(AppError::BookNotAvailable(book_id));
        }

        let loan = loans.create(book_id, member_id, Utc::now(), duration)?.clone();
        book.available = false;
        member.borrowed_books.push(book_id);
        Ok(loan)
    }

    /// Close an open loan and make the book available again
    pub fn return_loan(&mut self, loan_id: i32) -> AppResult<Loan> {
        let result = self.try_return_loan(loan_id);
        match &result {
            Ok(loan) => tracing::info!(loan_id, book_id = loan.book_id, "Loan returned"),
            Err(e) => tracing::warn!(loan_id, "Return refused: {}", e),
        }
        result
    }

    fn try_return_loan(&mut self, loan_id: i32) -> AppResult<Loan> {
        let Repository {
            books,
            members,
            loans,
        } = &mut self.repository;

        let loan = loans.get_mut(loan_id)?;
        if loan.returned {
            return Err(AppError::LoanAlreadyReturned(loan_id));
        }
        let (book_id, member_id) = (loan.book_id, loan.member_id);
        let book = books.get_mut(book_id).map_err(|_| {
            AppError::Internal(format!("Loan {} references unknown book {}", loan_id, book_id))
        })?;
        let member = members.get_mut(member_id).map_err(|_| {
            AppError::Internal(format!("Loan {} references unknown member {}", loan_id, member_id))
        })?;

        loan.mark_returned(Utc::now());
        book.available = true;
        member.borrowed_books.retain(|&id| id != book_id);
        Ok(loan.clone())
    }

    /// Push an open loan's due date to now + one loan duration
    pub fn renew_loan(&mut self, loan_id: i32) -> AppResult<Loan> {
        let duration = self.loan_duration();
        let max = self.config.max_renews;

        let result = self.repository.loans.get_mut(loan_id).and_then(|loan| {
            if loan.returned {
                return Err(AppError::LoanAlreadyReturned(loan_id));
            }
            if loan.renewals >= max {
                return Err(AppError::MaxRenewsReached { loan_id, max });
            }
            loan.renew(Utc::now(), duration);
            Ok(loan.clone())
        });

        match &result {
            Ok(loan) => tracing::info!(
                loan_id,
                renewals = loan.renewals,
                "Loan renewed, due {}",
                loan.due_date.format("%Y-%m-%d")
            ),
            Err(e) => tracing::warn!(loan_id, "Renewal refused: {}", e),
        }
        result
    }

    /// Books whose author contains `substring`, ignoring case
    pub fn find_books_by_author(&self, substring: &str) -> Vec<Book> {
        self.repository
            .books
            .find_by_author(substring)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn find_book_by_isbn(&self, isbn: &str) -> Option<Book> {
        self.repository.books.find_by_isbn(isbn).cloned()
    }

    /// Books currently held by a member; empty when the member is unknown
    pub fn books_on_loan_for(&self, member_id: i32) -> Vec<Book> {
        let member = match self.repository.members.get_by_id(member_id) {
            Ok(member) => member,
            Err(e) => {
                tracing::error!(member_id, "Cannot list borrowed books: {}", e);
                return Vec::new();
            }
        };

        member
            .borrowed_books
            .iter()
            .filter_map(|&book_id| self.repository.books.get_by_id(book_id).ok())
            .cloned()
            .collect()
    }

    pub fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).cloned()
    }

    pub fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).cloned()
    }

    pub fn get_loan(&self, id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).cloned()
    }

    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().cloned().collect()
    }

    pub fn list_members(&self) -> Vec<Member> {
        self.repository.members.list().cloned().collect()
    }

    /// Full ledger history
    pub fn list_loans(&self) -> Vec<Loan> {
        self.repository.loans.list().cloned().collect()
    }

    /// Loans not yet returned
    pub fn active_loans(&self) -> Vec<Loan> {
        self.repository.loans.active().cloned().collect()
    }

    pub fn overdue_loans(&self) -> Vec<Loan> {
        self.overdue_loans_at(Utc::now())
    }

    /// Open loans whose due date is before `now`
    pub fn overdue_loans_at(&self, now: DateTime<Utc>) -> Vec<Loan> {
        self.repository.loans.overdue_at(now).cloned().collect()
    }
}

impl Default for LendingService {
    fn default() -> Self {
        Self::new(LoansConfig::default())
    }
}
