//! Nullable ledger: hand out a fixed blockhash.

use async_trait::async_trait;
use blink_ledger::{LatestBlockhash, LedgerClient, LedgerError};
use solana_sdk::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A deterministic ledger for testing.
///
/// Returns the configured blockhash until told to fail.
pub struct NullLedger {
    latest: Mutex<LatestBlockhash>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl NullLedger {
    pub fn new(blockhash: Hash) -> Self {
        Self {
            latest: Mutex::new(LatestBlockhash {
                blockhash,
                last_valid_block_height: 1_000,
            }),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A ledger whose every call fails as unreachable.
    pub fn failing(reason: impl Into<String>) -> Self {
        let ledger = Self::default();
        ledger.fail_with(reason);
        ledger
    }

    /// Make subsequent calls fail.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(reason.into());
    }

    /// Set the blockhash returned by subsequent calls.
    pub fn set_blockhash(&self, blockhash: Hash) {
        self.latest.lock().unwrap().blockhash = blockhash;
    }

    pub fn blockhash(&self) -> Hash {
        self.latest.lock().unwrap().blockhash
    }

    /// Number of `latest_blockhash` calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new(Hash::new_from_array([42u8; 32]))
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn latest_blockhash(&self) -> Result<LatestBlockhash, LedgerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(LedgerError::Unreachable(reason));
        }
        Ok(*self.latest.lock().unwrap())
    }

    fn name(&self) -> &str {
        "null-ledger"
    }
}
