//! Checked narrowing for ledger-side wide integers.
//!
//! The ledger returns vote counts and thresholds as 256-bit unsigned values.
//! Cache rows and API callers use native widths, so every narrowing is
//! explicit and lossless: overflow is a hard error, never a wrap.

pub use ethereum_types::U256;

use crate::TypeError;

/// Convert a `U256` into a `u32`, failing on overflow.
pub fn u256_to_u32(value: U256) -> Result<u32, TypeError> {
    if value > U256::from(u32::MAX) {
        return Err(TypeError::NumericOverflow {
            value: value.to_string(),
            target: "u32",
        });
    }
    Ok(value.as_u32())
}

/// Convert a `U256` into a `u64`, failing on overflow.
pub fn u256_to_u64(value: U256) -> Result<u64, TypeError> {
    if value > U256::from(u64::MAX) {
        return Err(TypeError::NumericOverflow {
            value: value.to_string(),
            target: "u64",
        });
    }
    Ok(value.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_in_range_values() {
        assert_eq!(u256_to_u32(U256::from(2u64)).unwrap(), 2);
        assert_eq!(u256_to_u32(U256::from(u32::MAX)).unwrap(), u32::MAX);
        assert_eq!(u256_to_u64(U256::from(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn u32_overflow_is_an_error() {
        let too_big = U256::from(u32::MAX) + U256::one();
        let err = u256_to_u32(too_big).unwrap_err();
        assert!(matches!(err, TypeError::NumericOverflow { target: "u32", .. }));
    }

    #[test]
    fn u64_overflow_is_an_error() {
        let too_big = U256::from(u64::MAX) + U256::one();
        assert!(u256_to_u64(too_big).is_err());
    }

    #[test]
    fn max_value_is_an_error_for_both() {
        let huge = U256::max_value();
        assert!(u256_to_u32(huge).is_err());
        assert!(u256_to_u64(huge).is_err());
    }

    #[test]
    fn display_is_decimal() {
        assert_eq!(U256::from(1234u64).to_string(), "1234");
    }
}
