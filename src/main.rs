use alloy::primitives::Address;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pairshift::app::{self, AppCfg};
use pairshift::config::{Config, SignerCfg};
use pairshift::domain::dex::DexType;

#[derive(Parser, Debug)]
#[command(version, about = "Move a Uniswap V2 pair price with one large swap and report before/after")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// RPC endpoint URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Exchange to use (uniswap, sushiswap)
    #[arg(long)]
    exchange: Option<DexType>,

    /// Token to sell against WETH (overrides ARB_AGAINST)
    #[arg(long)]
    token: Option<Address>,

    /// Amount to sell, in whole tokens
    #[arg(long)]
    amount: Option<String>,

    /// Minimum WETH to receive, in whole WETH
    #[arg(long)]
    amount_out_min: Option<String>,

    /// Gas limit of the swap transaction
    #[arg(long)]
    gas_limit: Option<u64>,

    /// Seconds until the swap expires
    #[arg(long)]
    deadline_secs: Option<i64>,

    /// Unlocked account that sends the transactions
    #[arg(long, conflicts_with = "private_key_env")]
    from: Option<Address>,

    /// Environment variable holding the sender's private key
    #[arg(long)]
    private_key_env: Option<String>,

    /// Recipient of the WETH
    #[arg(long, conflicts_with = "account_index")]
    recipient: Option<Address>,

    /// Index into the node's accounts used as recipient
    #[arg(long)]
    account_index: Option<usize>,

    /// Decimal places shown for prices
    #[arg(long)]
    precision: Option<u8>,

    /// Only resolve and price the pair
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn signer(&self) -> Option<SignerCfg> {
        if let Some(from) = self.from {
            return Some(SignerCfg::Unlocked { from });
        }
        self.private_key_env
            .clone()
            .map(|env| SignerCfg::PrivateKey { env })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // stdout carries only the report
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Priority: CLI args > environment > config file > defaults
    let mut cfg = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        let signer = args.signer().ok_or_else(|| {
            anyhow::anyhow!("--from or --private-key-env is required when not using --config")
        })?;
        Config::default_mainnet(signer)
    };
    cfg.apply_env()?;

    if let Some(exchange) = args.exchange {
        cfg.swap.exchange = exchange;
    }
    if let Some(signer) = args.signer() {
        cfg.signer = signer;
    }
    if let Some(recipient) = args.recipient {
        cfg.recipient.address = Some(recipient);
    }
    if let Some(index) = args.account_index {
        cfg.recipient.address = None;
        cfg.recipient.account_index = index;
    }

    let mut app_cfg = AppCfg::from_config(cfg, args.dry_run, args.json);

    if let Some(rpc_url) = args.rpc_url {
        app_cfg.rpc_url = rpc_url;
    }
    if let Some(token) = args.token {
        app_cfg.token = Some(token);
    }
    if let Some(amount) = args.amount {
        app_cfg.amount = amount;
    }
    if let Some(amount_out_min) = args.amount_out_min {
        app_cfg.amount_out_min = amount_out_min;
    }
    if let Some(gas_limit) = args.gas_limit {
        app_cfg.gas_limit = gas_limit;
    }
    if let Some(deadline_secs) = args.deadline_secs {
        app_cfg.deadline_secs = deadline_secs;
    }
    if let Some(precision) = args.precision {
        app_cfg.precision = precision;
    }

    app::run(app_cfg).await
}
