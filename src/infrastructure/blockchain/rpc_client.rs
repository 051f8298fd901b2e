//! EVM JSON-RPC client and error mapping

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, PendingTransactionError, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use alloy::transports::RpcError;
use tracing::info;

use crate::shared::errors::AppError;
use crate::shared::types::TxOutcome;

/// Node connection shared by every contract adapter
#[derive(Clone)]
pub struct EvmRpcClient {
    provider: DynProvider,
    signer_address: Option<Address>,
}

impl EvmRpcClient {
    /// Connect without a local key. Transactions go through `eth_sendTransaction`.
    pub fn connect(rpc_url: &str) -> Result<Self, AppError> {
        let url = parse_url(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self {
            provider,
            signer_address: None,
        })
    }

    /// Connect with a local key that signs every transaction
    pub fn connect_with_signer(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, AppError> {
        let url = parse_url(rpc_url)?;
        let signer_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        info!("Signing locally as {}", signer_address);
        Ok(Self {
            provider,
            signer_address: Some(signer_address),
        })
    }

    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    pub async fn chain_id(&self) -> Result<u64, AppError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| AppError::network(format!("Failed to get chain id: {}", e)))
    }

    /// Accounts managed by the node (unlocked on dev nodes)
    pub async fn accounts(&self) -> Result<Vec<Address>, AppError> {
        self.provider
            .get_accounts()
            .await
            .map_err(|e| AppError::network(format!("Failed to get accounts: {}", e)))
    }

    pub async fn block_number(&self) -> Result<u64, AppError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| AppError::network(format!("Failed to get block number: {}", e)))
    }
}

fn parse_url(rpc_url: &str) -> Result<Url, AppError> {
    rpc_url
        .parse()
        .map_err(|e| AppError::ConfigError(format!("Invalid RPC url {}: {}", rpc_url, e)))
}

/// Failed view call. Only transport problems are network failures; a revert
/// or undecodable return data (not a contract, wrong ABI) is the call failing.
pub(crate) fn read_error(context: &str, err: alloy::contract::Error) -> AppError {
    match err {
        alloy::contract::Error::TransportError(RpcError::Transport(kind)) => {
            AppError::network(format!("{}: {}", context, kind))
        }
        other => AppError::transaction(format!("{} call failed: {}", context, other)),
    }
}

/// Failed submission. Transport problems are network failures, everything
/// the node answers with (rejection, revert) is a transaction failure.
pub(crate) fn send_error(context: &str, err: alloy::contract::Error) -> AppError {
    match err {
        alloy::contract::Error::TransportError(RpcError::Transport(kind)) => {
            AppError::network(format!("{}: {}", context, kind))
        }
        other => AppError::transaction(format!("{}: {}", context, other)),
    }
}

pub(crate) fn receipt_error(context: &str, err: PendingTransactionError) -> AppError {
    match err {
        PendingTransactionError::TransportError(RpcError::Transport(kind)) => {
            AppError::network(format!("{}: {}", context, kind))
        }
        other => AppError::transaction(format!("{}: {}", context, other)),
    }
}

/// Reverted receipts are failures
pub(crate) fn into_outcome(context: &str, receipt: TransactionReceipt) -> Result<TxOutcome, AppError> {
    let outcome = TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        success: receipt.status(),
    };
    if !outcome.success {
        return Err(AppError::transaction(format!(
            "{} reverted in transaction {}",
            context, outcome.tx_hash
        )));
    }
    Ok(outcome)
}
