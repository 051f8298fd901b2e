//! Resolves a token pair to its deployed pair contract

use alloy::primitives::Address;
use tracing::{debug, info};

use super::PoolReference;
use crate::domain::dex::PairFactory;
use crate::shared::errors::{AppError, PoolError};

/// Looks pairs up through a factory
pub struct PairResolver<'a> {
    factory: &'a dyn PairFactory,
}

impl<'a> PairResolver<'a> {
    pub fn new(factory: &'a dyn PairFactory) -> Self {
        Self { factory }
    }

    pub async fn resolve_pair(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<PoolReference, AppError> {
        debug!("Looking up pair {} / {} in factory {}", token_a, token_b, self.factory.address());

        let pair = self.factory.get_pair(token_a, token_b).await?;
        if pair == Address::ZERO {
            return Err(PoolError::PoolNotFound { token_a, token_b }.into());
        }

        info!("Resolved pair contract {}", pair);
        Ok(PoolReference::new(pair, token_a, token_b, self.factory.pool_at(pair)))
    }
}
