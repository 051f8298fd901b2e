use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::domain::dex::{DexInfo, DexRegistry, DexType};

/// Environment variable naming the token to sell
pub const ARB_AGAINST_ENV: &str = "ARB_AGAINST";
pub const RPC_URL_ENV: &str = "RPC_URL";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7545";
pub const DEFAULT_AMOUNT: &str = "40500000000000";
pub const DEFAULT_GAS_LIMIT: u64 = 450_000;
pub const DEFAULT_DEADLINE_SECS: i64 = 60 * 20;
pub const MAX_DEADLINE_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExchangeCfg {
    pub factory: Address,
    pub router: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesCfg {
    pub uniswap: ExchangeCfg,
    pub sushiswap: ExchangeCfg,
}

impl ExchangesCfg {
    pub fn get(&self, dex_type: DexType) -> DexInfo {
        let cfg = match dex_type {
            DexType::Uniswap => self.uniswap,
            DexType::Sushiswap => self.sushiswap,
        };
        DexInfo {
            dex_type,
            factory: cfg.factory,
            router: cfg.router,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensCfg {
    pub weth: Address,
    pub token: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwapCfg {
    #[serde(default = "default_exchange")]
    pub exchange: DexType,
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_amount_out_min")]
    pub amount_out_min: String,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: i64,
}

/// Who sends the approve and swap transactions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SignerCfg {
    /// Account already unlocked on a dev node
    Unlocked { from: Address },
    /// Hex private key read from the named environment variable
    PrivateKey { env: String },
}

/// Receiver of the swap output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipientCfg {
    pub address: Option<Address>,
    #[serde(default = "default_account_index")]
    pub account_index: usize,
}

impl Default for RecipientCfg {
    fn default() -> Self {
        Self {
            address: None,
            account_index: default_account_index(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportCfg {
    #[serde(default)]
    pub precision: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcCfg,
    pub exchanges: ExchangesCfg,
    pub tokens: TokensCfg,
    pub swap: SwapCfg,
    pub signer: SignerCfg,
    #[serde(default)]
    pub recipient: RecipientCfg,
    #[serde(default)]
    pub report: ReportCfg,
}

fn default_exchange() -> DexType {
    DexType::Uniswap
}

fn default_amount() -> String {
    DEFAULT_AMOUNT.to_string()
}

fn default_amount_out_min() -> String {
    "0".to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_deadline_secs() -> i64 {
    DEFAULT_DEADLINE_SECS
}

fn default_account_index() -> usize {
    1
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        Ok(cfg)
    }

    /// Mainnet deployments against a local fork, no token and no sender chosen
    pub fn default_mainnet(signer: SignerCfg) -> Self {
        let uniswap = DexRegistry::get(DexType::Uniswap);
        let sushiswap = DexRegistry::get(DexType::Sushiswap);
        Self {
            rpc: RpcCfg {
                url: DEFAULT_RPC_URL.to_string(),
            },
            exchanges: ExchangesCfg {
                uniswap: ExchangeCfg {
                    factory: uniswap.factory,
                    router: uniswap.router,
                },
                sushiswap: ExchangeCfg {
                    factory: sushiswap.factory,
                    router: sushiswap.router,
                },
            },
            tokens: TokensCfg {
                weth: DexRegistry::WETH_MAINNET,
                token: None,
            },
            swap: SwapCfg {
                exchange: default_exchange(),
                amount: default_amount(),
                amount_out_min: default_amount_out_min(),
                gas_limit: DEFAULT_GAS_LIMIT,
                deadline_secs: DEFAULT_DEADLINE_SECS,
            },
            signer,
            recipient: RecipientCfg::default(),
            report: ReportCfg::default(),
        }
    }

    /// Overlay `ARB_AGAINST` and `RPC_URL` from the environment
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(token) = env::var(ARB_AGAINST_ENV) {
            let token = token
                .trim()
                .parse()
                .with_context(|| format!("{} is not an address: {}", ARB_AGAINST_ENV, token))?;
            self.tokens.token = Some(token);
        }
        if let Ok(url) = env::var(RPC_URL_ENV) {
            self.rpc.url = url;
        }
        Ok(())
    }
}
