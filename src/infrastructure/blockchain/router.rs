//! Uniswap V2 Router02 adapter: approve then swap

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;
use tracing::{debug, info};

use super::contracts::IUniswapV2Router02::{self, IUniswapV2Router02Instance};
use super::contracts::IERC20;
use super::rpc_client::{into_outcome, receipt_error, send_error};
use crate::domain::dex::SwapRouter;
use crate::domain::execution::SwapRequest;
use crate::shared::errors::AppError;
use crate::shared::types::TxOutcome;

pub struct UniswapV2Router {
    contract: IUniswapV2Router02Instance<DynProvider>,
    provider: DynProvider,
}

impl UniswapV2Router {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV2Router02::new(address, provider.clone()),
            provider,
        }
    }

    /// Factory the router was deployed against
    pub async fn factory(&self) -> Result<Address, AppError> {
        self.contract
            .factory()
            .call()
            .await
            .map_err(|e| super::rpc_client::read_error("factory()", e))
    }
}

#[async_trait]
impl SwapRouter for UniswapV2Router {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn approve(&self, token: Address, amount: U256, sender: Address) -> Result<TxOutcome, AppError> {
        let spender = self.address();
        debug!("approve({}, {}) on {} from {}", spender, amount, token, sender);

        let erc20 = IERC20::new(token, self.provider.clone());
        let receipt = erc20
            .approve(spender, amount)
            .from(sender)
            .send()
            .await
            .map_err(|e| send_error("approve()", e))?
            .get_receipt()
            .await
            .map_err(|e| receipt_error("approve()", e))?;

        let outcome = into_outcome("approve()", receipt)?;
        info!("Approval mined in {}", outcome.tx_hash);
        Ok(outcome)
    }

    async fn swap_exact_tokens_for_tokens(
        &self,
        request: &SwapRequest,
        sender: Address,
    ) -> Result<TxOutcome, AppError> {
        debug!("swapExactTokensForTokens({:?}) from {}", request, sender);

        let receipt = self
            .contract
            .swapExactTokensForTokens(
                request.amount_in,
                request.amount_out_min,
                request.path.clone(),
                request.recipient,
                request.deadline_secs(),
            )
            .from(sender)
            .gas(request.gas_limit)
            .send()
            .await
            .map_err(|e| send_error("swapExactTokensForTokens()", e))?
            .get_receipt()
            .await
            .map_err(|e| receipt_error("swapExactTokensForTokens()", e))?;

        into_outcome("swapExactTokensForTokens()", receipt)
    }
}
