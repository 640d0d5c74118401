use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value in the smallest indivisible unit of the host currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_base_units(&self) -> u128 {
        self.0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Builds an amount from `value * 10^-scale` units of a denomination with
    /// `decimals` places. Fails instead of rounding when precision would be lost.
    pub fn from_scaled(value: u128, scale: u32, decimals: u32) -> Option<Self> {
        if scale <= decimals {
            let factor = 10u128.checked_pow(decimals - scale)?;
            return value.checked_mul(factor).map(Amount);
        }
        let factor = 10u128.checked_pow(scale - decimals)?;
        if value % factor != 0 {
            return None;
        }
        Some(Amount(value / factor))
    }

    /// Parses `"250"`, `"1.5 ether"`, `"30gwei"` and similar.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let decimals = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "wei" => 0,
            "gwei" => 9,
            "ether" | "eth" => 18,
            _ => return None,
        };

        let mut parts = number.split('.');
        let int_part = parts.next()?;
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let frac_opt = parts.next();
        if parts.next().is_some() {
            return None;
        }

        let int_val: u128 = int_part.parse().ok()?;
        let (raw, scale) = match frac_opt {
            None => (int_val, 0),
            Some("") => return None,
            Some(frac) => {
                if !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let scale = u32::try_from(frac.len()).ok()?;
                let widened = int_val.checked_mul(10u128.checked_pow(scale)?)?;
                (widened.checked_add(frac.parse::<u128>().ok()?)?, scale)
            }
        };
        Amount::from_scaled(raw, scale, decimals)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(value)
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // u128 does not survive every JSON consumer, so go through a string.
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_decimal_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid amount format: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::Amount;

    #[test]
    fn parses_base_units_and_denominations() {
        assert_eq!(Amount::from_decimal_str("250"), Some(Amount(250)));
        assert_eq!(Amount::from_decimal_str(" 42 wei "), Some(Amount(42)));
        assert_eq!(Amount::from_decimal_str("3gwei"), Some(Amount(3_000_000_000)));
        assert_eq!(
            Amount::from_decimal_str("1.5 ether"),
            Some(Amount(1_500_000_000_000_000_000))
        );
    }

    #[test]
    fn rejects_precision_loss_instead_of_truncating() {
        assert_eq!(Amount::from_decimal_str("1.5"), None);
        assert_eq!(Amount::from_decimal_str("0.0000000001 gwei"), None);
        assert_eq!(Amount::from_decimal_str("2.50 wei"), None);
        assert_eq!(Amount::from_decimal_str("2.0 wei"), Some(Amount(2)));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "-5", "1.2.3", ".5", "5.", "12 dollars", "abc", "1e3"] {
            assert_eq!(Amount::from_decimal_str(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn checked_arithmetic_never_wraps() {
        assert_eq!(Amount(u128::MAX).checked_add(Amount(1)), None);
        assert_eq!(Amount(0).checked_sub(Amount(1)), None);
        assert_eq!(Amount(7).checked_sub(Amount(7)), Some(Amount::ZERO));
    }
}
