//! Shared types and errors

pub mod errors;
pub mod types;

pub use errors::{AppError, ExecutionError, PoolError, PriceError};
pub use types::{Price, ReservePair, Token, TxOutcome};
