//! Fixed-point currency conversion.
//!
//! The ledger stores every amount as an integer count of the smallest
//! currency unit (10^-18 of the display unit). This module converts between
//! that representation and the human-readable decimal strings the dashboard
//! shows and accepts.
//!
//! `to_smallest_unit(to_decimal_string(x)) == x` holds for every `u128`.

use crate::errors::AmountError;

/// Fractional digits carried by the smallest-unit representation.
pub const DECIMALS: u32 = 18;

/// Smallest units per display unit.
const SCALE: u128 = 10u128.pow(DECIMALS);

/// Parse a human decimal amount (e.g. `"1.5"`) into smallest units.
///
/// Rejects empty input, signs, non-digit characters, more than [`DECIMALS`]
/// fractional digits, and values that overflow `u128`.
pub fn to_smallest_unit(decimal: &str) -> Result<u128, AmountError> {
    let s = decimal.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    // A lone "." carries no digits at all.
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::NotDecimal(s.to_string()));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AmountError::NotDecimal(s.to_string()));
    }
    if frac_part.len() as u32 > DECIMALS {
        return Err(AmountError::PrecisionLoss(DECIMALS));
    }

    let int: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac: u128 = if frac_part.is_empty() {
        0
    } else {
        // Right-pad to DECIMALS digits: "5" in the fraction of "1.5" is 5*10^17.
        let parsed: u128 = frac_part.parse().map_err(|_| AmountError::Overflow)?;
        parsed * 10u128.pow(DECIMALS - frac_part.len() as u32)
    };

    int.checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac))
        .ok_or(AmountError::Overflow)
}

/// Render smallest units as a decimal string, trimming trailing fractional
/// zeros but always keeping at least one fractional digit (`"1.0"`, `"2.5"`).
pub fn to_decimal_string(smallest: u128) -> String {
    let whole = smallest / SCALE;
    let frac = smallest % SCALE;

    let frac_str = format!("{frac:018}");
    let trimmed = frac_str.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Serde adapter: one `u128` amount as a decimal string field.
///
/// JSON numbers cannot carry full `u128` precision, so amounts cross every
/// JSON boundary (gateway wire format and API responses) as strings.
pub mod serde_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>().map_err(D::Error::custom)
    }
}

/// Serde adapter: a `Vec<u128>` as a sequence of decimal strings.
pub mod serde_string_vec {
    use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[u128], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for v in values {
            seq.serialize_element(&v.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u128>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|s| s.parse::<u128>().map_err(D::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(to_smallest_unit("1").unwrap(), SCALE);
        assert_eq!(to_smallest_unit("10").unwrap(), 10 * SCALE);
        assert_eq!(to_smallest_unit("0").unwrap(), 0);
    }

    #[test]
    fn parses_fractional_amounts() {
        assert_eq!(to_smallest_unit("1.5").unwrap(), SCALE + SCALE / 2);
        assert_eq!(to_smallest_unit("0.25").unwrap(), SCALE / 4);
        assert_eq!(to_smallest_unit(".5").unwrap(), SCALE / 2);
        assert_eq!(to_smallest_unit("2.").unwrap(), 2 * SCALE);
    }

    #[test]
    fn parses_smallest_representable_amount() {
        assert_eq!(to_smallest_unit("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(to_smallest_unit("").unwrap_err(), AmountError::Empty);
        assert_eq!(to_smallest_unit("   ").unwrap_err(), AmountError::Empty);
        assert!(matches!(
            to_smallest_unit("abc").unwrap_err(),
            AmountError::NotDecimal(_)
        ));
        assert!(matches!(
            to_smallest_unit("-1").unwrap_err(),
            AmountError::NotDecimal(_)
        ));
        assert!(matches!(
            to_smallest_unit("1.2.3").unwrap_err(),
            AmountError::NotDecimal(_)
        ));
        assert!(matches!(
            to_smallest_unit(".").unwrap_err(),
            AmountError::NotDecimal(_)
        ));
    }

    #[test]
    fn rejects_excess_precision() {
        // 19 fractional digits is below the smallest unit.
        assert_eq!(
            to_smallest_unit("0.0000000000000000001").unwrap_err(),
            AmountError::PrecisionLoss(DECIMALS)
        );
    }

    #[test]
    fn rejects_overflow() {
        // u128::MAX has 39 digits; this has 40.
        let huge = "9".repeat(40);
        assert_eq!(to_smallest_unit(&huge).unwrap_err(), AmountError::Overflow);
    }

    #[test]
    fn formats_with_trimmed_fraction() {
        assert_eq!(to_decimal_string(0), "0.0");
        assert_eq!(to_decimal_string(SCALE), "1.0");
        assert_eq!(to_decimal_string(SCALE + SCALE / 2), "1.5");
        assert_eq!(to_decimal_string(1), "0.000000000000000001");
    }

    #[test]
    fn round_trips_through_decimal_string() {
        let samples = [
            0u128,
            1,
            999,
            SCALE,
            SCALE / 4,
            2_500_000_000_000_000_000,
            10_000_000_000_000_000_000,
            u128::MAX,
        ];
        for x in samples {
            assert_eq!(to_smallest_unit(&to_decimal_string(x)).unwrap(), x);
        }
    }
}
