//! Error types for the lending desk

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes returned in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchMember = 4,
    NoSuchBook = 5,
    BookNotAvailable = 7,
    BadValue = 18,
    NoSuchLoan = 20,
    LoanAlreadyReturned = 22,
    MaxRenewsReached = 23,
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Book with id {0} not found")]
    NoSuchBook(i32),

    #[error("Member with id {0} not found")]
    NoSuchMember(i32),

    #[error("Loan with id {0} not found")]
    NoSuchLoan(i32),

    #[error("Book {0} is already on loan")]
    BookNotAvailable(i32),

    #[error("Loan {0} has already been returned")]
    LoanAlreadyReturned(i32),

    #[error("Maximum renewals reached for loan {loan_id} ({max}/{max})")]
    MaxRenewsReached { loan_id: i32, max: u16 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NoSuchBook(_) => ErrorCode::NoSuchBook,
            AppError::NoSuchMember(_) => ErrorCode::NoSuchMember,
            AppError::NoSuchLoan(_) => ErrorCode::NoSuchLoan,
            AppError::BookNotAvailable(_) => ErrorCode::BookNotAvailable,
            AppError::LoanAlreadyReturned(_) => ErrorCode::LoanAlreadyReturned,
            AppError::MaxRenewsReached { .. } => ErrorCode::MaxRenewsReached,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorCode::BadValue,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoSuchBook(_) | AppError::NoSuchMember(_) | AppError::NoSuchLoan(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::BookNotAvailable(_)
            | AppError::LoanAlreadyReturned(_)
            | AppError::MaxRenewsReached { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (self.status(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
