//! Uniswap V2 pair contract reader

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;

use super::contracts::IUniswapV2Pair::{self, IUniswapV2PairInstance};
use super::rpc_client::read_error;
use crate::domain::dex::PoolReader;
use crate::shared::errors::AppError;
use crate::shared::types::ReservePair;

pub struct PairContract {
    contract: IUniswapV2PairInstance<DynProvider>,
}

impl PairContract {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV2Pair::new(address, provider),
        }
    }
}

#[async_trait]
impl PoolReader for PairContract {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn token0(&self) -> Result<Address, AppError> {
        self.contract
            .token0()
            .call()
            .await
            .map_err(|e| read_error("token0()", e))
    }

    async fn token1(&self) -> Result<Address, AppError> {
        self.contract
            .token1()
            .call()
            .await
            .map_err(|e| read_error("token1()", e))
    }

    async fn get_reserves(&self) -> Result<ReservePair, AppError> {
        let reserves = self
            .contract
            .getReserves()
            .call()
            .await
            .map_err(|e| read_error("getReserves()", e))?;

        Ok(ReservePair {
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            block_timestamp_last: reserves.blockTimestampLast,
        })
    }
}
