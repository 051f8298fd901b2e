//! Application services and use cases

use alloy::primitives::{Address, U256};
use chrono::Duration;
use tracing::{info, warn};

use crate::domain::dex::{DexType, PairFactory, SwapRouter, TokenInfo};
use crate::domain::execution::{SwapRequest, TransactionValidator};
use crate::domain::pool::{PairResolver, PoolReference};
use crate::domain::price::PriceCalculator;
use crate::math;
use crate::report::{PriceShiftReport, SwapDetails};
use crate::shared::errors::AppError;
use crate::shared::types::{Price, Token, TxOutcome};

/// Everything one run needs, resolved before any chain call
#[derive(Debug, Clone)]
pub struct ShiftPlan {
    pub exchange: DexType,
    pub chain_id: u64,
    pub token: Address,
    pub weth: Address,
    /// Whole tokens to sell, converted with the token's decimals
    pub amount: String,
    /// Whole WETH, converted with WETH decimals
    pub amount_out_min: String,
    pub gas_limit: u64,
    pub deadline: Duration,
    pub sender: Address,
    pub recipient: Address,
    pub precision: u8,
    pub dry_run: bool,
}

/// Price before, one large swap, price after
pub struct PriceShiftService<'a> {
    factory: &'a dyn PairFactory,
    router: &'a dyn SwapRouter,
    tokens: &'a dyn TokenInfo,
    validator: TransactionValidator,
}

impl<'a> PriceShiftService<'a> {
    pub fn new(factory: &'a dyn PairFactory, router: &'a dyn SwapRouter, tokens: &'a dyn TokenInfo) -> Self {
        Self {
            factory,
            router,
            tokens,
            validator: TransactionValidator::new(),
        }
    }

    pub async fn run(&self, plan: &ShiftPlan) -> Result<PriceShiftReport, AppError> {
        let pool = PairResolver::new(self.factory)
            .resolve_pair(plan.token, plan.weth)
            .await?;

        let token = self.tokens.fetch_token(plan.chain_id, plan.token).await?;
        let weth = self.tokens.fetch_token(plan.chain_id, plan.weth).await?;

        let price_before = PriceCalculator::calculate_price(&pool, &weth, &token).await?;
        info!("Price before: {}", price_before.describe(plan.precision));

        if plan.dry_run {
            warn!("Dry run - no transaction will be sent");
            let balance = self.balance(&weth, plan.recipient).await?;
            return Ok(self.base_report(plan, &pool, &price_before, balance, &weth));
        }

        let balance_before = self.tokens.balance_of(weth.address, plan.recipient).await?;
        let (approve_tx, swap_tx, amount_in) = self.alter_price(plan, &token, &weth).await?;

        let price_after = PriceCalculator::calculate_price(&pool, &weth, &token).await?;
        info!("Price after: {}", price_after.describe(plan.precision));

        let balance_after = self.tokens.balance_of(weth.address, plan.recipient).await?;
        let received = balance_after.saturating_sub(balance_before);

        let change_bps = price_before.change_bps(&price_after)?;
        let balance = math::from_base_units(balance_after, weth.decimals)?;
        let report = self
            .base_report(plan, &pool, &price_before, balance, &weth)
            .with_price_after(price_after.describe(plan.precision), change_bps)
            .with_swap(SwapDetails {
                input_symbol: token.symbol.clone(),
                output_symbol: weth.symbol.clone(),
                amount_in: math::from_base_units(amount_in, token.decimals)?,
                amount_received: math::from_base_units(received, weth.decimals)?,
                approve_tx: approve_tx.tx_hash,
                swap_tx: swap_tx.tx_hash,
                gas_used: approve_tx.gas_used + swap_tx.gas_used,
            });

        Ok(report)
    }

    /// Approve the router then sell `plan.amount` of `token` for `weth`
    async fn alter_price(
        &self,
        plan: &ShiftPlan,
        token: &Token,
        weth: &Token,
    ) -> Result<(TxOutcome, TxOutcome, U256), AppError> {
        info!("Beginning Swap...");
        info!("Input Token: {}", token.symbol);
        info!("Output Token: {}", weth.symbol);

        let amount_in = math::to_base_units(&plan.amount, token.decimals)?;
        let amount_out_min = math::to_base_units(&plan.amount_out_min, weth.decimals)?;
        let request = SwapRequest::direct(
            token.address,
            weth.address,
            amount_in,
            plan.recipient,
            plan.deadline,
            plan.gas_limit,
        )?
        .with_amount_out_min(amount_out_min);

        self.validator.validate_request(&request)?;

        let approve_tx = self.router.approve(token.address, amount_in, plan.sender).await?;
        let swap_tx = self
            .router
            .swap_exact_tokens_for_tokens(&request, plan.sender)
            .await?;

        info!("Swap Complete! ({})", swap_tx.tx_hash);
        Ok((approve_tx, swap_tx, amount_in))
    }

    async fn balance(&self, token: &Token, owner: Address) -> Result<String, AppError> {
        let raw = self.tokens.balance_of(token.address, owner).await?;
        Ok(math::from_base_units(raw, token.decimals)?)
    }

    fn base_report(
        &self,
        plan: &ShiftPlan,
        pool: &PoolReference,
        price_before: &Price,
        balance: String,
        weth: &Token,
    ) -> PriceShiftReport {
        PriceShiftReport::new(
            plan.exchange.as_str(),
            pool.address,
            price_before.describe(plan.precision),
            plan.recipient,
            balance,
            weth.symbol.clone(),
        )
    }
}
