//! Loan (borrow) model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Ledger entry linking one book to one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned: bool,
    pub returned_at: Option<DateTime<Utc>>,
    pub renewals: u16,
}

impl Loan {
    pub fn new(
        id: i32,
        book_id: i32,
        member_id: i32,
        loan_date: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            loan_date,
            due_date: loan_date + duration,
            returned: false,
            returned_at: None,
            renewals: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.returned
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.due_date < now
    }

    pub(crate) fn mark_returned(&mut self, at: DateTime<Utc>) {
        self.returned = true;
        self.returned_at = Some(at);
    }

    pub(crate) fn renew(&mut self, from: DateTime<Utc>, duration: Duration) {
        self.due_date = from + duration;
        self.renewals += 1;
    }
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub book_id: i32,
    pub member_id: i32,
}

/// Which slice of the ledger to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Active,
    Overdue,
    All,
}

/// Loan query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LoanQuery {
    /// `active` (default), `overdue` or `all`
    pub status: Option<LoanStatus>,
}
