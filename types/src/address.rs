//! Account address type.

use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

/// A validated on-chain account address (base58-encoded 32-byte public key).
///
/// Off-curve keys are accepted, matching what wallets submit for program
/// derived accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountAddress(Pubkey);

impl AccountAddress {
    /// Parse a client-supplied address string.
    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        Pubkey::from_str(raw)
            .map(Self)
            .map_err(|e| ActionError::InvalidAccount(format!("{raw:?}: {e}")))
    }

    pub fn pubkey(&self) -> &Pubkey {
        &self.0
    }

    /// Canonical base58 form.
    pub fn to_base58(&self) -> String {
        self.0.to_string()
    }
}

impl From<Pubkey> for AccountAddress {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl FromStr for AccountAddress {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "3MKLb89FZvGeLTY8QHAfGevSTkqdmRVAYU97Qc1Roct2";

    #[test]
    fn parses_base58_address() {
        let addr = AccountAddress::parse(ADMIN).unwrap();
        assert_eq!(addr.to_base58(), ADMIN);
        assert_eq!(addr.to_string(), ADMIN);
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "not-an-address", "0OIl", "3MKLb89FZvGeLTY8QHAf"] {
            let err = AccountAddress::parse(raw).unwrap_err();
            assert!(matches!(err, ActionError::InvalidAccount(_)), "{raw}");
        }
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(AccountAddress::parse(&format!(" {ADMIN}")).is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let addr: AccountAddress = ADMIN.parse().unwrap();
        assert_eq!(addr, AccountAddress::parse(ADMIN).unwrap());
    }
}
