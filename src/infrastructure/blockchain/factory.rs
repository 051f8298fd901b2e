//! Uniswap V2 factory adapter

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use async_trait::async_trait;
use std::sync::Arc;

use super::contracts::IUniswapV2Factory::{self, IUniswapV2FactoryInstance};
use super::pair_contract::PairContract;
use super::rpc_client::read_error;
use crate::domain::dex::{PairFactory, PoolReader};
use crate::shared::errors::AppError;

pub struct UniswapV2Factory {
    contract: IUniswapV2FactoryInstance<DynProvider>,
    provider: DynProvider,
}

impl UniswapV2Factory {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV2Factory::new(address, provider.clone()),
            provider,
        }
    }
}

#[async_trait]
impl PairFactory for UniswapV2Factory {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, AppError> {
        self.contract
            .getPair(token_a, token_b)
            .call()
            .await
            .map_err(|e| read_error("getPair()", e))
    }

    fn pool_at(&self, pair: Address) -> Arc<dyn PoolReader> {
        Arc::new(PairContract::new(pair, self.provider.clone()))
    }
}
