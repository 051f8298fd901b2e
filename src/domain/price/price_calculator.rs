//! Spot price from pair reserves

use tracing::debug;

use crate::domain::pool::PoolReference;
use crate::math;
use crate::shared::errors::{AppError, PoolError};
use crate::shared::types::{Price, Token};

/// Reads reserves and turns them into a decimal-adjusted price
pub struct PriceCalculator;

impl PriceCalculator {
    /// Units of `quote` per one `base`, from the pool's current reserves
    pub async fn calculate_price(
        pool: &PoolReference,
        base: &Token,
        quote: &Token,
    ) -> Result<Price, AppError> {
        let reader = pool.reader();
        let token0 = reader.token0().await?;
        let token1 = reader.token1().await?;

        let base_is_token0 = if (token0, token1) == (base.address, quote.address) {
            true
        } else if (token0, token1) == (quote.address, base.address) {
            false
        } else {
            let token = if base.address != token0 && base.address != token1 {
                base.address
            } else {
                quote.address
            };
            return Err(PoolError::TokenMismatch { pool: pool.address, token }.into());
        };

        let reserves = reader.get_reserves().await?;
        let (reserve_base, reserve_quote) = if base_is_token0 {
            (reserves.reserve0, reserves.reserve1)
        } else {
            (reserves.reserve1, reserves.reserve0)
        };

        if reserves.is_empty() {
            return Err(PoolError::EmptyPool(pool.address).into());
        }

        debug!(
            "Reserves of {}: {} {} / {} {}",
            pool.address, reserve_base, base.symbol, reserve_quote, quote.symbol
        );

        let scaled = math::reserve_ratio(reserve_base, base.decimals, reserve_quote, quote.decimals)?;
        Ok(Price::new(base.clone(), quote.clone(), scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dex::testing::{addr, units, FakeFactory, FakePool};
    use crate::domain::pool::PairResolver;
    use crate::math::PRICE_SCALE;
    use alloy::primitives::U256;
    use std::sync::Arc;

    fn shib() -> Token {
        Token::new(1, addr(1), 18, "SHIB", "SHIBA INU")
    }

    fn weth() -> Token {
        Token::new(1, addr(2), 18, "WETH", "Wrapped Ether")
    }

    async fn reference(pool: Arc<FakePool>) -> PoolReference {
        let factory = FakeFactory::new(vec![pool]);
        PairResolver::new(&factory)
            .resolve_pair(addr(1), addr(2))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_price_in_shib_per_weth() {
        // token0 = SHIB, token1 = WETH
        let pool = Arc::new(FakePool::new(addr(0x10), addr(1), addr(2), units(1_000_000, 18), units(10, 18)));
        let pool_ref = reference(pool).await;

        let price = PriceCalculator::calculate_price(&pool_ref, &weth(), &shib()).await.unwrap();
        assert_eq!(price.scaled, U256::from(100_000u64) * PRICE_SCALE);
        assert_eq!(price.describe(0), "1 WETH = 100000 SHIB");

        let inverse = PriceCalculator::calculate_price(&pool_ref, &shib(), &weth()).await.unwrap();
        assert_eq!(inverse.to_fixed(5), "0.00001");
    }

    #[tokio::test]
    async fn test_decimals_are_applied() {
        let usdc = Token::new(1, addr(1), 6, "USDC", "USD Coin");
        let pool = Arc::new(FakePool::new(addr(0x10), addr(1), addr(2), units(3_500, 6), units(1, 18)));
        let pool_ref = reference(pool).await;

        let price = PriceCalculator::calculate_price(&pool_ref, &weth(), &usdc).await.unwrap();
        assert_eq!(price.to_fixed(2), "3500.00");
    }

    #[tokio::test]
    async fn test_empty_pool() {
        let pool = Arc::new(FakePool::new(addr(0x10), addr(1), addr(2), U256::ZERO, U256::ZERO));
        let pool_ref = reference(pool).await;

        let err = PriceCalculator::calculate_price(&pool_ref, &weth(), &shib()).await.unwrap_err();
        assert!(matches!(err, AppError::Pool(PoolError::EmptyPool(a)) if a == addr(0x10)));
    }

    #[tokio::test]
    async fn test_foreign_tokens_are_rejected() {
        let pool = Arc::new(FakePool::new(addr(0x10), addr(1), addr(2), units(1, 18), units(1, 18)));
        let pool_ref = reference(pool).await;
        let other = Token::new(1, addr(7), 18, "DAI", "Dai");

        let err = PriceCalculator::calculate_price(&pool_ref, &other, &other).await.unwrap_err();
        assert!(matches!(err, AppError::Pool(PoolError::TokenMismatch { .. })));
    }

    #[tokio::test]
    async fn test_every_call_rereads_reserves() {
        let pool = Arc::new(FakePool::new(addr(0x10), addr(1), addr(2), units(1_000_000, 18), units(10, 18)));
        let pool_ref = reference(pool.clone()).await;

        let before = PriceCalculator::calculate_price(&pool_ref, &weth(), &shib()).await.unwrap();
        pool.set_reserves(units(2_000_000, 18), units(5, 18));
        let after = PriceCalculator::calculate_price(&pool_ref, &weth(), &shib()).await.unwrap();

        assert_eq!(*pool.reads.lock().unwrap(), 2);
        assert!(after.scaled > before.scaled);
        assert_eq!(after.to_fixed(0), "400000");
    }
}
