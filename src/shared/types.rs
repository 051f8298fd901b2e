//! Common types used across the application

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::math;
use crate::shared::errors::PriceError;

/// ERC-20 token identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: Address,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Both reserves of a pair, read in a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservePair {
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: u32,
}

impl ReservePair {
    pub fn new(reserve0: U256, reserve1: U256) -> Self {
        Self {
            reserve0,
            reserve1,
            block_timestamp_last: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }
}

/// Units of `quote` per one unit of `base`, fixed point with PRICE_DECIMALS digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub base: Token,
    pub quote: Token,
    pub scaled: U256,
}

impl Price {
    pub fn new(base: Token, quote: Token, scaled: U256) -> Self {
        Self {
            base,
            quote,
            scaled,
        }
    }

    pub fn to_fixed(&self, places: u8) -> String {
        math::format_fixed(self.scaled, places)
    }

    /// Units of `base` per one unit of `quote`
    pub fn inverse(&self) -> Result<Price, PriceError> {
        if self.scaled.is_zero() {
            return Err(PriceError::InvalidAmount("cannot invert a zero price".to_string()));
        }
        let one = math::PRICE_SCALE;
        let scaled = one
            .checked_mul(one)
            .ok_or_else(|| PriceError::Overflow("price inversion".to_string()))?
            / self.scaled;
        Ok(Price::new(self.quote.clone(), self.base.clone(), scaled))
    }

    pub fn change_bps(&self, later: &Price) -> Result<i64, PriceError> {
        math::change_bps(self.scaled, later.scaled)
    }

    /// "1 WETH = 100000 SHIB"
    pub fn describe(&self, places: u8) -> String {
        format!(
            "1 {} = {} {}",
            self.base.symbol,
            self.to_fixed(places),
            self.quote.symbol
        )
    }
}

/// Result of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, byte: u8) -> Token {
        Token::new(1, Address::repeat_byte(byte), 18, symbol, symbol)
    }

    #[test]
    fn test_price_describe_and_inverse() {
        let price = Price::new(
            token("WETH", 1),
            token("SHIB", 2),
            U256::from(100_000u64) * math::PRICE_SCALE,
        );
        assert_eq!(price.describe(0), "1 WETH = 100000 SHIB");

        let inverse = price.inverse().unwrap();
        assert_eq!(inverse.base.symbol, "SHIB");
        assert_eq!(inverse.to_fixed(5), "0.00001");
    }

    #[test]
    fn test_zero_price_cannot_be_inverted() {
        let price = Price::new(token("A", 1), token("B", 2), U256::ZERO);
        assert!(price.inverse().is_err());
    }

    #[test]
    fn test_reserve_pair_empty() {
        assert!(ReservePair::new(U256::ZERO, U256::from(1u64)).is_empty());
        assert!(!ReservePair::new(U256::from(1u64), U256::from(1u64)).is_empty());
    }
}
