//! In-memory exchange used by unit tests

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{PairFactory, PoolReader, SwapRouter, TokenInfo};
use crate::domain::execution::SwapRequest;
use crate::math;
use crate::shared::errors::AppError;
use crate::shared::types::{ReservePair, TxOutcome};

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn units(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * math::pow10(decimals).unwrap()
}

pub struct FakePool {
    address: Address,
    token0: Address,
    token1: Address,
    reserves: Mutex<ReservePair>,
    pub reads: Mutex<u32>,
}

impl FakePool {
    pub fn new(address: Address, token0: Address, token1: Address, reserve0: U256, reserve1: U256) -> Self {
        Self {
            address,
            token0,
            token1,
            reserves: Mutex::new(ReservePair::new(reserve0, reserve1)),
            reads: Mutex::new(0),
        }
    }

    pub fn reserves(&self) -> ReservePair {
        *self.reserves.lock().unwrap()
    }

    pub fn set_reserves(&self, reserve0: U256, reserve1: U256) {
        *self.reserves.lock().unwrap() = ReservePair::new(reserve0, reserve1);
    }
}

#[async_trait]
impl PoolReader for FakePool {
    fn address(&self) -> Address {
        self.address
    }

    async fn token0(&self) -> Result<Address, AppError> {
        Ok(self.token0)
    }

    async fn token1(&self) -> Result<Address, AppError> {
        Ok(self.token1)
    }

    async fn get_reserves(&self) -> Result<ReservePair, AppError> {
        *self.reads.lock().unwrap() += 1;
        Ok(self.reserves())
    }
}

pub struct FakeFactory {
    address: Address,
    pools: Vec<Arc<FakePool>>,
}

impl FakeFactory {
    pub fn new(pools: Vec<Arc<FakePool>>) -> Self {
        Self {
            address: addr(0xfa),
            pools,
        }
    }
}

#[async_trait]
impl PairFactory for FakeFactory {
    fn address(&self) -> Address {
        self.address
    }

    async fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, AppError> {
        let found = self.pools.iter().find(|p| {
            (p.token0 == token_a && p.token1 == token_b) || (p.token0 == token_b && p.token1 == token_a)
        });
        Ok(found.map(|p| p.address).unwrap_or(Address::ZERO))
    }

    fn pool_at(&self, pair: Address) -> Arc<dyn PoolReader> {
        match self.pools.iter().find(|p| p.address == pair) {
            Some(pool) => pool.clone() as Arc<dyn PoolReader>,
            None => Arc::new(FakePool::new(pair, Address::ZERO, Address::ZERO, U256::ZERO, U256::ZERO)),
        }
    }
}

#[derive(Default)]
pub struct FakeTokens {
    meta: HashMap<Address, (String, String, u8)>,
    balances: Mutex<HashMap<(Address, Address), U256>>,
    allowances: Mutex<HashMap<(Address, Address), U256>>,
}

impl FakeTokens {
    pub fn with_token(mut self, token: Address, symbol: &str, name: &str, decimals: u8) -> Self {
        self.meta.insert(token, (symbol.to_string(), name.to_string(), decimals));
        self
    }

    pub fn mint(&self, token: Address, owner: Address, amount: U256) {
        let mut balances = self.balances.lock().unwrap();
        let entry = balances.entry((token, owner)).or_insert(U256::ZERO);
        *entry += amount;
    }

    fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn set_allowance(&self, token: Address, owner: Address, amount: U256) {
        self.allowances.lock().unwrap().insert((token, owner), amount);
    }

    fn allowance(&self, token: Address, owner: Address) -> U256 {
        self.allowances
            .lock()
            .unwrap()
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn transfer(&self, token: Address, from: Address, to: Address, amount: U256) -> Result<(), AppError> {
        let mut balances = self.balances.lock().unwrap();
        let from_balance = balances.get(&(token, from)).copied().unwrap_or(U256::ZERO);
        if from_balance < amount {
            return Err(AppError::transaction("execution reverted: TRANSFER_FROM_FAILED"));
        }
        balances.insert((token, from), from_balance - amount);
        let entry = balances.entry((token, to)).or_insert(U256::ZERO);
        *entry += amount;
        Ok(())
    }

    fn meta(&self, token: Address) -> Result<&(String, String, u8), AppError> {
        self.meta
            .get(&token)
            .ok_or_else(|| AppError::transaction(format!("no contract at {}", token)))
    }
}

#[async_trait]
impl TokenInfo for FakeTokens {
    async fn symbol(&self, token: Address) -> Result<String, AppError> {
        Ok(self.meta(token)?.0.clone())
    }

    async fn name(&self, token: Address) -> Result<String, AppError> {
        Ok(self.meta(token)?.1.clone())
    }

    async fn decimals(&self, token: Address) -> Result<u8, AppError> {
        Ok(self.meta(token)?.2)
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, AppError> {
        Ok(self.balance(token, owner))
    }
}

/// Single-pair router applying the Uniswap V2 fee and constant product
pub struct FakeRouter {
    address: Address,
    pool: Arc<FakePool>,
    tokens: Arc<FakeTokens>,
    pub submitted: Mutex<u32>,
}

impl FakeRouter {
    pub fn new(pool: Arc<FakePool>, tokens: Arc<FakeTokens>) -> Self {
        Self {
            address: addr(0xee),
            pool,
            tokens,
            submitted: Mutex::new(0),
        }
    }

    fn outcome(&self) -> TxOutcome {
        let mut submitted = self.submitted.lock().unwrap();
        *submitted += 1;
        TxOutcome {
            tx_hash: B256::repeat_byte(*submitted as u8),
            block_number: Some(u64::from(*submitted)),
            gas_used: 21_000,
            success: true,
        }
    }
}

#[async_trait]
impl SwapRouter for FakeRouter {
    fn address(&self) -> Address {
        self.address
    }

    async fn approve(&self, token: Address, amount: U256, sender: Address) -> Result<TxOutcome, AppError> {
        self.tokens.set_allowance(token, sender, amount);
        Ok(self.outcome())
    }

    async fn swap_exact_tokens_for_tokens(
        &self,
        request: &SwapRequest,
        sender: Address,
    ) -> Result<TxOutcome, AppError> {
        if request.deadline.timestamp() < chrono::Utc::now().timestamp() {
            return Err(AppError::transaction("execution reverted: UniswapV2Router: EXPIRED"));
        }
        let (Some(token_in), Some(token_out)) = (request.token_in(), request.token_out()) else {
            return Err(AppError::transaction("execution reverted: UniswapV2Library: INVALID_PATH"));
        };
        if self.tokens.allowance(token_in, sender) < request.amount_in {
            return Err(AppError::transaction("execution reverted: TRANSFER_FROM_FAILED"));
        }

        let reserves = self.pool.reserves();
        let in_is_token0 = self.pool.token0 == token_in;
        let (reserve_in, reserve_out) = if in_is_token0 {
            (reserves.reserve0, reserves.reserve1)
        } else {
            (reserves.reserve1, reserves.reserve0)
        };
        let amount_out = math::constant_product_out(request.amount_in, reserve_in, reserve_out);
        if amount_out < request.amount_out_min {
            return Err(AppError::transaction(
                "execution reverted: UniswapV2Router: INSUFFICIENT_OUTPUT_AMOUNT",
            ));
        }

        self.tokens.transfer(token_in, sender, self.pool.address, request.amount_in)?;
        self.tokens.mint(token_out, request.recipient, amount_out);

        let (new_in, new_out) = (reserve_in + request.amount_in, reserve_out - amount_out);
        if in_is_token0 {
            self.pool.set_reserves(new_in, new_out);
        } else {
            self.pool.set_reserves(new_out, new_in);
        }

        Ok(self.outcome())
    }
}
