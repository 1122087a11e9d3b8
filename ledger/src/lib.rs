//! Ledger connectivity and transaction construction.
//!
//! - [`LedgerClient`]: fetches the checkpoint ("recent blockhash") a new
//!   transaction must reference.
//! - [`RpcLedgerClient`]: JSON-RPC implementation over HTTP.
//! - [`transfer`]: builds and encodes unsigned single-transfer transactions.

pub mod error;
pub mod rpc;
pub mod transfer;

use async_trait::async_trait;
use solana_sdk::hash::Hash;

pub use error::LedgerError;
pub use rpc::{RpcLedgerClient, DEFAULT_RPC_URL};
pub use transfer::{build_transfer, decode_transaction, encode_transaction};

/// A recent blockhash together with the last block height at which a
/// transaction referencing it is still accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Source of recent blockhashes.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the latest finalized blockhash.
    async fn latest_blockhash(&self) -> Result<LatestBlockhash, LedgerError>;

    /// Human-readable name of this client, for logs.
    fn name(&self) -> &str;
}
