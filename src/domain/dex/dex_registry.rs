//! DEX Registry for Ethereum mainnet deployments

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Supported Uniswap V2 style exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DexType {
    Uniswap,
    Sushiswap,
}

impl DexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DexType::Uniswap => "uniswap",
            DexType::Sushiswap => "sushiswap",
        }
    }
}

impl fmt::Display for DexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DexType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniswap" | "uniswap_v2" | "uni" => Ok(DexType::Uniswap),
            "sushiswap" | "sushi" => Ok(DexType::Sushiswap),
            other => Err(AppError::ConfigError(format!("Unsupported exchange: {}", other))),
        }
    }
}

/// Factory and router of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DexInfo {
    pub dex_type: DexType,
    pub factory: Address,
    pub router: Address,
}

/// Well-known mainnet deployments
pub struct DexRegistry;

impl DexRegistry {
    pub const WETH_MAINNET: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

    pub fn get(dex_type: DexType) -> DexInfo {
        match dex_type {
            DexType::Uniswap => DexInfo {
                dex_type,
                factory: address!("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
                router: address!("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D"),
            },
            DexType::Sushiswap => DexInfo {
                dex_type,
                factory: address!("0xC0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac"),
                router: address!("0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F"),
            },
        }
    }
}
