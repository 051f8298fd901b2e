//! ERC-20 metadata and balance reader

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;

use super::contracts::IERC20;
use super::rpc_client::read_error;
use crate::domain::dex::TokenInfo;
use crate::shared::errors::AppError;

/// Reads token contracts through the shared provider
pub struct TokenMetadataReader {
    provider: DynProvider,
}

impl TokenMetadataReader {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TokenInfo for TokenMetadataReader {
    async fn symbol(&self, token: Address) -> Result<String, AppError> {
        IERC20::new(token, self.provider.clone())
            .symbol()
            .call()
            .await
            .map_err(|e| read_error(&format!("symbol() of {}", token), e))
    }

    async fn name(&self, token: Address) -> Result<String, AppError> {
        IERC20::new(token, self.provider.clone())
            .name()
            .call()
            .await
            .map_err(|e| read_error(&format!("name() of {}", token), e))
    }

    async fn decimals(&self, token: Address) -> Result<u8, AppError> {
        IERC20::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .map_err(|e| read_error(&format!("decimals() of {}", token), e))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, AppError> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| read_error(&format!("balanceOf({}) of {}", owner, token), e))
    }
}
