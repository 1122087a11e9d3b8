//! Unsigned transfer transactions.
//!
//! The transaction carries one system-program transfer, names the sender as
//! fee payer and references a recent blockhash. Signature slots are left
//! zeroed for the wallet to fill in.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use blink_types::{AccountAddress, Lamports};
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;

use crate::LedgerError;

/// Build an unsigned transaction moving `amount` from `from` to `to`.
///
/// `from` pays the fee.
pub fn build_transfer(
    from: &AccountAddress,
    to: &Pubkey,
    amount: Lamports,
    recent_blockhash: Hash,
) -> Transaction {
    let payer = from.pubkey();
    let instruction = system_instruction::transfer(payer, to, amount.raw());
    let message = Message::new_with_blockhash(&[instruction], Some(payer), &recent_blockhash);
    Transaction::new_unsigned(message)
}

/// Serialize to the ledger wire format and base64-encode for JSON transport.
pub fn encode_transaction(tx: &Transaction) -> Result<String, LedgerError> {
    let bytes = bincode::serialize(tx).map_err(|e| LedgerError::Serialization(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

/// Inverse of [`encode_transaction`].
pub fn decode_transaction(encoded: &str) -> Result<Transaction, LedgerError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| LedgerError::Serialization(format!("base64: {e}")))?;
    bincode::deserialize(&bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
}
