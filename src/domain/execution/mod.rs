//! Execution domain - swap requests and their validation

mod transaction_validator;

pub use transaction_validator::TransactionValidator;

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::ExecutionError;

/// Parameters of a `swapExactTokensForTokens` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub recipient: Address,
    pub deadline: DateTime<Utc>,
    pub gas_limit: u64,
}

impl SwapRequest {
    /// Direct token_in -> token_out swap expiring `ttl` from now
    pub fn direct(
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        recipient: Address,
        ttl: Duration,
        gas_limit: u64,
    ) -> Result<Self, ExecutionError> {
        let deadline = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            ExecutionError::TransactionFailure(format!("deadline {}s from now is out of range", ttl.num_seconds()))
        })?;
        Ok(Self {
            amount_in,
            amount_out_min: U256::ZERO,
            path: vec![token_in, token_out],
            recipient,
            deadline,
            gas_limit,
        })
    }

    pub fn with_amount_out_min(mut self, amount_out_min: U256) -> Self {
        self.amount_out_min = amount_out_min;
        self
    }

    pub fn token_in(&self) -> Option<Address> {
        self.path.first().copied()
    }

    pub fn token_out(&self) -> Option<Address> {
        self.path.last().copied()
    }

    /// Deadline as the unix timestamp the router expects
    pub fn deadline_secs(&self) -> U256 {
        U256::from(self.deadline.timestamp().max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_deadline_is_rejected() {
        let err = SwapRequest::direct(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            U256::from(1u64),
            Address::repeat_byte(3),
            Duration::seconds(10_000_000_000_000),
            450_000,
        )
        .unwrap_err();
        assert!(matches!(err, ExecutionError::TransactionFailure(_)));
    }
}
