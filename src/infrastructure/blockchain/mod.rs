//! Uniswap V2 contract adapters over alloy

pub mod contracts;
pub mod factory;
pub mod pair_contract;
pub mod router;
pub mod rpc_client;
pub mod token_metadata;

pub use factory::UniswapV2Factory;
pub use pair_contract::PairContract;
pub use router::UniswapV2Router;
pub use rpc_client::EvmRpcClient;
pub use token_metadata::TokenMetadataReader;
