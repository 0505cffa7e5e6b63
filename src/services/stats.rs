//! Statistics service

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::lending::LendingService;

/// Statistics response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Catalog statistics
    pub books: BookStats,
    /// Member statistics
    pub members: MemberStats,
    /// Loan statistics
    pub loans: LoanStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookStats {
    pub total: usize,
    pub available: usize,
    pub on_loan: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MemberStats {
    pub total: usize,
    /// Members holding at least one book
    pub borrowing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoanStats {
    /// Every loan ever recorded
    pub total: usize,
    pub active: usize,
    pub overdue: usize,
    pub returned: usize,
}

#[derive(Clone, Default)]
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, lending: &LendingService) -> StatsResponse {
        self.compute_at(lending, Utc::now())
    }

    /// Counters as seen at `now` (only the overdue count depends on it)
    pub fn compute_at(&self, lending: &LendingService, now: DateTime<Utc>) -> StatsResponse {
        let repository = lending.repository();

        let total_books = repository.books.count();
        let available = repository.books.count_available();
        let total_loans = repository.loans.count();
        let active = repository.loans.count_active();

        StatsResponse {
            books: BookStats {
                total: total_books,
                available,
                on_loan: total_books - available,
            },
            members: MemberStats {
                total: repository.members.count(),
                borrowing: repository.members.count_borrowing(),
            },
            loans: LoanStats {
                total: total_loans,
                active,
                overdue: repository.loans.count_overdue_at(now),
                returned: total_loans - active,
            },
        }
    }
}
