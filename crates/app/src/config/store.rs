//! Store Config

use clap::Args;
use till::transactions::StoreId;

/// Store context for the till.
#[derive(Debug, Clone, Copy, Args)]
pub struct StoreConfig {
    /// Store the till belongs to
    #[arg(long = "store-id", env = "TILL_STORE_ID")]
    pub store_id: Option<u32>,
}

impl StoreConfig {
    /// Configured store, if any.
    #[must_use]
    pub fn store(&self) -> Option<StoreId> {
        self.store_id.map(StoreId)
    }
}
