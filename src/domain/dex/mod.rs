//! DEX domain - Uniswap V2 style exchange capabilities

mod dex_interface;
mod dex_registry;

#[cfg(test)]
pub mod testing;

pub use dex_interface::{PairFactory, PoolReader, SwapRouter, TokenInfo};
pub use dex_registry::{DexInfo, DexRegistry, DexType};
