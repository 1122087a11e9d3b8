//! Lamport amounts.
//!
//! Amounts are represented as fixed-point integers (u64 lamports) to avoid
//! floating-point drift. Prices are parsed from decimal SOL strings with at
//! most 9 fractional digits, so every price maps to an exact lamport count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AmountError;

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Number of fractional SOL digits representable in lamports.
const SOL_DECIMALS: usize = 9;

/// An amount in the ledger's base unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lamports(u64);

impl Lamports {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by an integer quantity. `None` on overflow.
    pub fn checked_mul(self, quantity: u64) -> Option<Self> {
        self.0.checked_mul(quantity).map(Self)
    }

    /// Parse a decimal SOL string such as `"1.4214"` into exact lamports.
    pub fn from_sol_str(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDigit(s.to_string()));
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDigit(s.to_string()));
        }
        if frac.len() > SOL_DECIMALS {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let overflow = || AmountError::Overflow(s.to_string());
        let whole: u64 = whole.parse().map_err(|_| overflow())?;
        let frac_lamports: u64 = if frac.is_empty() {
            0
        } else {
            // Right-pad to 9 digits: "4214" -> "421400000".
            format!("{frac:0<width$}", width = SOL_DECIMALS)
                .parse()
                .map_err(|_| AmountError::InvalidDigit(s.to_string()))?
        };

        whole
            .checked_mul(LAMPORTS_PER_SOL)
            .and_then(|l| l.checked_add(frac_lamports))
            .map(Self)
            .ok_or_else(overflow)
    }

    /// Render as a decimal SOL string with trailing zeros trimmed.
    ///
    /// `7_107_000_000` lamports renders as `"7.107"`, whole amounts have no
    /// decimal point.
    pub fn to_sol_string(&self) -> String {
        let whole = self.0 / LAMPORTS_PER_SOL;
        let frac = self.0 % LAMPORTS_PER_SOL;
        if frac == 0 {
            return whole.to_string();
        }
        let digits = format!("{frac:0width$}", width = SOL_DECIMALS);
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SOL", self.to_sol_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_router_price_exactly() {
        let price = Lamports::from_sol_str("1.4214").unwrap();
        assert_eq!(price.raw(), 1_421_400_000);
    }

    #[test]
    fn parses_whole_and_fractional_forms() {
        assert_eq!(Lamports::from_sol_str("2").unwrap().raw(), 2 * LAMPORTS_PER_SOL);
        assert_eq!(Lamports::from_sol_str("0.000000001").unwrap().raw(), 1);
        assert_eq!(Lamports::from_sol_str(" 3.5 ").unwrap().raw(), 3_500_000_000);
        assert_eq!(Lamports::from_sol_str("1.").unwrap().raw(), LAMPORTS_PER_SOL);
    }

    #[test]
    fn rejects_malformed_prices() {
        assert_eq!(Lamports::from_sol_str(""), Err(AmountError::Empty));
        assert!(matches!(
            Lamports::from_sol_str("-1"),
            Err(AmountError::InvalidDigit(_))
        ));
        assert!(matches!(
            Lamports::from_sol_str(".5"),
            Err(AmountError::InvalidDigit(_))
        ));
        assert!(matches!(
            Lamports::from_sol_str("1.2.3"),
            Err(AmountError::InvalidDigit(_))
        ));
        assert!(matches!(
            Lamports::from_sol_str("0.0000000001"),
            Err(AmountError::TooPrecise(_))
        ));
        assert!(matches!(
            Lamports::from_sol_str("99999999999999999999"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn renders_sol_strings() {
        assert_eq!(Lamports::new(7_107_000_000).to_sol_string(), "7.107");
        assert_eq!(Lamports::new(1_421_400_000).to_sol_string(), "1.4214");
        assert_eq!(Lamports::new(14_214_000_000).to_sol_string(), "14.214");
        assert_eq!(Lamports::new(3 * LAMPORTS_PER_SOL).to_sol_string(), "3");
        assert_eq!(Lamports::new(1).to_sol_string(), "0.000000001");
        assert_eq!(Lamports::ZERO.to_sol_string(), "0");
    }

    #[test]
    fn checked_mul_detects_overflow() {
        let price = Lamports::new(1_421_400_000);
        assert_eq!(price.checked_mul(5), Some(Lamports::new(7_107_000_000)));
        assert_eq!(price.checked_mul(u64::MAX), None);
    }

    proptest! {
        /// Rendering then parsing yields the same lamport count.
        #[test]
        fn sol_string_roundtrip(raw in 0u64..u64::MAX) {
            let amount = Lamports::new(raw);
            let parsed = Lamports::from_sol_str(&amount.to_sol_string()).unwrap();
            prop_assert_eq!(parsed, amount);
        }

        /// Multiplying a price by a quantity is exact integer arithmetic.
        #[test]
        fn price_times_quantity_is_exact(quantity in 1u64..1_000_000) {
            let price = Lamports::from_sol_str("1.4214").unwrap();
            let total = price.checked_mul(quantity).unwrap();
            prop_assert_eq!(total.raw(), quantity * 1_421_400_000);
        }
    }
}
