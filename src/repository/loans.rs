//! Loan ledger

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

use super::IdSequence;

#[derive(Debug, Clone, Default)]
pub struct LoansRepository {
    loans: IndexMap<i32, Loan>,
    ids: IdSequence,
}

impl LoansRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new open loan
    pub fn create(
        &mut self,
        book_id: i32,
        member_id: i32,
        loan_date: DateTime<Utc>,
        duration: Duration,
    ) -> AppResult<&Loan> {
        let id = self.ids.next_id()?;
        Ok(self
            .loans
            .entry(id)
            .or_insert(Loan::new(id, book_id, member_id, loan_date, duration)))
    }

    /// Get loan by ID
    pub fn get_by_id(&self, id: i32) -> AppResult<&Loan> {
        self.loans.get(&id).ok_or(AppError::NoSuchLoan(id))
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> AppResult<&mut Loan> {
        self.loans.get_mut(&id).ok_or(AppError::NoSuchLoan(id))
    }

    /// Whole ledger, returned loans included
    pub fn list(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values().filter(|loan| loan.is_active())
    }

    pub fn overdue_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Loan> {
        self.loans.values().filter(move |loan| loan.is_overdue_at(now))
    }

    /// Open loan on a book, if any
    pub fn active_for_book(&self, book_id: i32) -> Option<&Loan> {
        self.active().find(|loan| loan.book_id == book_id)
    }

    pub fn count(&self) -> usize {
        self.loans.len()
    }

    pub fn count_active(&self) -> usize {
        self.active().count()
    }

    pub fn count_overdue_at(&self, now: DateTime<Utc>) -> usize {
        self.overdue_at(now).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_and_overdue() {
        let mut repo = LoansRepository::new();
        let now = Utc::now();
        repo.create(1, 1, now - Duration::days(30), Duration::days(14)).unwrap();
        repo.create(2, 1, now, Duration::days(14)).unwrap();
        repo.get_mut(2).unwrap().mark_returned(now);
        repo.create(3, 2, now, Duration::days(14)).unwrap();

        assert_eq!(repo.count(), 3);
        assert_eq!(repo.count_active(), 2);
        assert_eq!(repo.count_overdue_at(now), 1);
        assert_eq!(repo.active_for_book(2), None);
        assert_eq!(repo.active_for_book(3).map(|l| l.id), Some(3));
    }

    #[test]
    fn test_get_unknown() {
        let repo = LoansRepository::new();
        assert_eq!(repo.get_by_id(4), Err(AppError::NoSuchLoan(4)));
    }
}
