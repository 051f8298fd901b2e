//! Pool domain - pair resolution

mod pair_resolver;

pub use pair_resolver::PairResolver;

use alloy::primitives::Address;
use std::fmt;
use std::sync::Arc;

use crate::domain::dex::PoolReader;

/// Handle to a deployed pair, addressed by the tokens it was resolved from
#[derive(Clone)]
pub struct PoolReference {
    pub address: Address,
    pub token_a: Address,
    pub token_b: Address,
    reader: Arc<dyn PoolReader>,
}

impl PoolReference {
    pub fn new(address: Address, token_a: Address, token_b: Address, reader: Arc<dyn PoolReader>) -> Self {
        Self {
            address,
            token_a,
            token_b,
            reader,
        }
    }

    pub fn reader(&self) -> &dyn PoolReader {
        self.reader.as_ref()
    }
}

impl fmt::Debug for PoolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolReference")
            .field("address", &self.address)
            .field("token_a", &self.token_a)
            .field("token_b", &self.token_b)
            .finish()
    }
}
