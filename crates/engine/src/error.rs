//! The module contains the errors the engine can throw.
//!
//! [`NotFound`] and [`BudgetExceeded`] are the expected domain outcomes and
//! are surfaced verbatim to the caller; [`Database`] wraps store failures and
//! propagates as fatal for the request.
//!
//! [`NotFound`]: EngineError::NotFound
//! [`BudgetExceeded`]: EngineError::BudgetExceeded
//! [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Monthly budget exceeded: {0}")]
    BudgetExceeded(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::BudgetExceeded(a), Self::BudgetExceeded(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
