//! Transaction validation before submission

use chrono::{DateTime, Utc};

use super::SwapRequest;
use crate::shared::errors::ExecutionError;

/// Rejects swap requests the router would revert anyway
pub struct TransactionValidator;

impl TransactionValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_request(&self, request: &SwapRequest) -> Result<(), ExecutionError> {
        self.validate_request_at(request, Utc::now())
    }

    pub fn validate_request_at(
        &self,
        request: &SwapRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ExecutionError> {
        if request.deadline <= now {
            return Err(ExecutionError::TransactionFailure(format!(
                "deadline expired at {}",
                request.deadline.to_rfc3339()
            )));
        }
        if request.amount_in.is_zero() {
            return Err(ExecutionError::TransactionFailure(
                "amount in must be positive".to_string(),
            ));
        }
        if request.path.len() < 2 {
            return Err(ExecutionError::TransactionFailure(
                "swap path needs at least two tokens".to_string(),
            ));
        }
        if request.path.windows(2).any(|hop| hop[0] == hop[1]) {
            return Err(ExecutionError::TransactionFailure(
                "swap path repeats a token".to_string(),
            ));
        }
        if request.gas_limit == 0 {
            return Err(ExecutionError::TransactionFailure("gas limit is zero".to_string()));
        }
        Ok(())
    }
}

impl Default for TransactionValidator {
    fn default() -> Self {
        Self::new()
    }
}
