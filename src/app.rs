// src/app.rs
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use chrono::Duration;
use std::env;
use tracing::{error, info, warn};

use crate::application::{PriceShiftService, ShiftPlan};
use crate::config::{Config, RecipientCfg, SignerCfg, MAX_DEADLINE_SECS};
use crate::domain::dex::DexInfo;
use crate::infrastructure::blockchain::{
    EvmRpcClient, TokenMetadataReader, UniswapV2Factory, UniswapV2Router,
};

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub dex: DexInfo,
    pub weth: Address,
    pub token: Option<Address>,
    pub amount: String,
    pub amount_out_min: String,
    pub gas_limit: u64,
    pub deadline_secs: i64,
    pub signer: SignerCfg,
    pub recipient: RecipientCfg,
    pub precision: u8,
    pub dry_run: bool,
    pub json: bool,
}

impl AppCfg {
    pub fn from_config(cfg: Config, dry_run: bool, json: bool) -> Self {
        Self {
            rpc_url: cfg.rpc.url,
            dex: cfg.exchanges.get(cfg.swap.exchange),
            weth: cfg.tokens.weth,
            token: cfg.tokens.token,
            amount: cfg.swap.amount,
            amount_out_min: cfg.swap.amount_out_min,
            gas_limit: cfg.swap.gas_limit,
            deadline_secs: cfg.swap.deadline_secs,
            signer: cfg.signer,
            recipient: cfg.recipient,
            precision: cfg.report.precision,
            dry_run,
            json,
        }
    }

    pub fn validate(&self) -> Result<Address> {
        let token = match self.token {
            Some(token) => token,
            None => bail!("No token to sell: set ARB_AGAINST, [tokens].token or --token"),
        };
        if token == self.weth {
            bail!("Token to sell must differ from WETH ({})", self.weth);
        }
        if self.deadline_secs <= 0 {
            bail!("Deadline must be in the future, got {}s", self.deadline_secs);
        }
        if self.deadline_secs > MAX_DEADLINE_SECS {
            bail!("Deadline is at most {}s, got {}s", MAX_DEADLINE_SECS, self.deadline_secs);
        }
        if self.precision > crate::math::PRICE_DECIMALS {
            bail!("Precision is at most {} digits", crate::math::PRICE_DECIMALS);
        }
        Ok(token)
    }
}

fn connect(app_cfg: &AppCfg) -> Result<(EvmRpcClient, Address)> {
    match &app_cfg.signer {
        SignerCfg::Unlocked { from } => {
            warn!("Sending from {} which must be unlocked on the node", from);
            Ok((EvmRpcClient::connect(&app_cfg.rpc_url)?, *from))
        }
        SignerCfg::PrivateKey { env: var } => {
            let key = env::var(var).with_context(|| format!("{} is not set", var))?;
            let signer: PrivateKeySigner = key
                .trim()
                .parse()
                .with_context(|| format!("{} does not hold a valid private key", var))?;
            let client = EvmRpcClient::connect_with_signer(&app_cfg.rpc_url, signer)?;
            let sender = client
                .signer_address()
                .context("Local signer has no address")?;
            Ok((client, sender))
        }
    }
}

async fn resolve_recipient(client: &EvmRpcClient, recipient: &RecipientCfg) -> Result<Address> {
    if let Some(address) = recipient.address {
        return Ok(address);
    }
    let accounts = client.accounts().await?;
    accounts.get(recipient.account_index).copied().with_context(|| {
        format!(
            "Node exposes {} accounts, no recipient at index {}; set [recipient].address",
            accounts.len(),
            recipient.account_index
        )
    })
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Starting price shift on {}", app_cfg.dex.dex_type);
    info!("Configuration: {:?}", app_cfg);

    let token = app_cfg.validate()?;
    let (client, sender) = connect(&app_cfg)?;

    let chain_id = client.chain_id().await?;
    let block = client.block_number().await?;
    info!("Connected to chain {} at block {}", chain_id, block);

    let recipient = resolve_recipient(&client, &app_cfg.recipient).await?;
    info!("Sender: {}, recipient: {}", sender, recipient);

    let factory = UniswapV2Factory::new(app_cfg.dex.factory, client.provider());
    let router = UniswapV2Router::new(app_cfg.dex.router, client.provider());
    let tokens = TokenMetadataReader::new(client.provider());

    match router.factory().await {
        Ok(f) if f != app_cfg.dex.factory => {
            warn!("Router {} reports factory {}, configured {}", app_cfg.dex.router, f, app_cfg.dex.factory)
        }
        Ok(_) => {}
        Err(e) => warn!("Could not read router factory: {}", e),
    }

    let deadline = Duration::try_seconds(app_cfg.deadline_secs)
        .with_context(|| format!("Deadline of {}s is out of range", app_cfg.deadline_secs))?;
    let plan = ShiftPlan {
        exchange: app_cfg.dex.dex_type,
        chain_id,
        token,
        weth: app_cfg.weth,
        amount: app_cfg.amount.clone(),
        amount_out_min: app_cfg.amount_out_min.clone(),
        gas_limit: app_cfg.gas_limit,
        deadline,
        sender,
        recipient,
        precision: app_cfg.precision,
        dry_run: app_cfg.dry_run,
    };

    let service = PriceShiftService::new(&factory, &router, &tokens);
    let report = match service.run(&plan).await {
        Ok(report) => report,
        Err(e) => {
            error!("❌ Run failed: {}", e);
            return Err(e.into());
        }
    };

    if app_cfg.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dex::DexRegistry;

    fn cfg() -> AppCfg {
        let mut config = Config::default_mainnet(SignerCfg::Unlocked { from: Address::repeat_byte(0x0e) });
        config.tokens.token = Some(Address::repeat_byte(0x95));
        AppCfg::from_config(config, false, false)
    }

    #[test]
    fn test_from_config_picks_selected_exchange() {
        let app_cfg = cfg();
        assert_eq!(app_cfg.dex, DexRegistry::get(crate::domain::dex::DexType::Uniswap));
        assert_eq!(app_cfg.gas_limit, 450_000);
        assert_eq!(app_cfg.deadline_secs, 1200);
    }

    #[test]
    fn test_validate_requires_token() {
        let mut app_cfg = cfg();
        assert_eq!(app_cfg.validate().unwrap(), Address::repeat_byte(0x95));

        app_cfg.token = None;
        assert!(app_cfg.validate().is_err());

        app_cfg.token = Some(app_cfg.weth);
        assert!(app_cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_past_deadline_and_precision() {
        let mut app_cfg = cfg();
        app_cfg.deadline_secs = 0;
        assert!(app_cfg.validate().is_err());

        let mut app_cfg = cfg();
        app_cfg.deadline_secs = i64::MAX;
        assert!(app_cfg.validate().is_err());

        let mut app_cfg = cfg();
        app_cfg.deadline_secs = MAX_DEADLINE_SECS;
        assert!(app_cfg.validate().is_ok());

        let mut app_cfg = cfg();
        app_cfg.precision = 19;
        assert!(app_cfg.validate().is_err());
    }

    #[tokio::test]
    async fn test_private_key_sender_is_the_signer() {
        let signer = PrivateKeySigner::random();
        let expected = signer.address();
        env::set_var("PAIRSHIFT_TEST_SET_KEY", signer.to_bytes().to_string());

        let mut app_cfg = cfg();
        app_cfg.signer = SignerCfg::PrivateKey {
            env: "PAIRSHIFT_TEST_SET_KEY".to_string(),
        };
        let (_, sender) = connect(&app_cfg).unwrap();
        assert_eq!(sender, expected);
    }

    #[test]
    fn test_missing_private_key_env_fails() {
        let mut app_cfg = cfg();
        app_cfg.signer = SignerCfg::PrivateKey {
            env: "PAIRSHIFT_TEST_UNSET_KEY".to_string(),
        };
        assert!(connect(&app_cfg).is_err());
    }
}
