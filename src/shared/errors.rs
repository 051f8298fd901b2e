//! Error handling for the application

use alloy::primitives::Address;
use thiserror::Error;

/// Pool-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool not found for pair {token_a} / {token_b}")]
    PoolNotFound { token_a: Address, token_b: Address },

    #[error("Pool {0} has an empty reserve")]
    EmptyPool(Address),

    #[error("Pool {pool} does not hold token {token}")]
    TokenMismatch { pool: Address, token: Address },
}

/// Price-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price calculation overflowed: {0}")]
    Overflow(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Execution-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Transaction failed: {0}")]
    TransactionFailure(String),

    #[error("Network error: {0}")]
    NetworkFailure(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl AppError {
    pub fn network(msg: impl Into<String>) -> Self {
        AppError::Execution(ExecutionError::NetworkFailure(msg.into()))
    }

    pub fn transaction(msg: impl Into<String>) -> Self {
        AppError::Execution(ExecutionError::TransactionFailure(msg.into()))
    }
}
