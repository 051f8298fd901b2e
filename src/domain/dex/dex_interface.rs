//! Capabilities of the remote exchange contracts

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::execution::SwapRequest;
use crate::shared::errors::AppError;
use crate::shared::types::{ReservePair, Token, TxOutcome};

/// A deployed pair contract
#[async_trait]
pub trait PoolReader: Send + Sync {
    fn address(&self) -> Address;

    async fn token0(&self) -> Result<Address, AppError>;

    async fn token1(&self) -> Result<Address, AppError>;

    /// Both reserves from the same block
    async fn get_reserves(&self) -> Result<ReservePair, AppError>;
}

/// Looks up pair contracts by token pair
#[async_trait]
pub trait PairFactory: Send + Sync {
    fn address(&self) -> Address;

    /// Zero address when no pair is deployed
    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, AppError>;

    fn pool_at(&self, pair: Address) -> Arc<dyn PoolReader>;
}

/// Read-only ERC-20 metadata and balances
#[async_trait]
pub trait TokenInfo: Send + Sync {
    async fn symbol(&self, token: Address) -> Result<String, AppError>;

    async fn name(&self, token: Address) -> Result<String, AppError>;

    async fn decimals(&self, token: Address) -> Result<u8, AppError>;

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, AppError>;

    async fn fetch_token(&self, chain_id: u64, token: Address) -> Result<Token, AppError> {
        let symbol = self.symbol(token).await?;
        let name = self.name(token).await?;
        let decimals = self.decimals(token).await?;
        Ok(Token::new(chain_id, token, decimals, symbol, name))
    }
}

/// Router transactions sent on behalf of `sender`
#[async_trait]
pub trait SwapRouter: Send + Sync {
    fn address(&self) -> Address;

    /// `approve(router, amount)` on the source token
    async fn approve(&self, token: Address, amount: U256, sender: Address) -> Result<TxOutcome, AppError>;

    async fn swap_exact_tokens_for_tokens(
        &self,
        request: &SwapRequest,
        sender: Address,
    ) -> Result<TxOutcome, AppError>;
}
