//! 16-bit decimal floating point used for amounts and fees in commitments
//!
//! A word holds a 4-bit exponent above a 12-bit mantissa, and stands for
//! `mantissa * 10^exponent`.

use alloy_primitives::U256;

use crate::error::EncodingError;

const MANTISSA_BITS: u16 = 12;
const MANTISSA_MASK: u16 = 0xfff;
const MAX_EXPONENT: u16 = 15;

/// Encode `value` as `exponent << 12 | mantissa`.
///
/// At most 15 trailing decimal zeros are stripped; values whose remaining
/// mantissa exceeds `0xfff` are not encodable.
pub fn encode_decimal(value: U256) -> Result<u16, EncodingError> {
    let ten = U256::from(10u8);
    let mut mantissa = value;
    let mut exponent = 0u16;

    while exponent < MAX_EXPONENT && !mantissa.is_zero() && (mantissa % ten).is_zero() {
        mantissa /= ten;
        exponent += 1;
    }

    if mantissa > U256::from(MANTISSA_MASK) {
        return Err(EncodingError::NotEncodable);
    }
    Ok((exponent << MANTISSA_BITS) | mantissa.to::<u16>())
}

/// Inverse of [`encode_decimal`]. Always exact.
pub fn decode_decimal(word: u16) -> U256 {
    let mantissa = U256::from(word & MANTISSA_MASK);
    let exponent = U256::from(word >> MANTISSA_BITS);
    mantissa * U256::from(10u8).pow(exponent)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_regression_value() {
        assert_eq!(encode_decimal(U256::from(123_400_000u64)).unwrap(), 0x54d2);
        assert_eq!(decode_decimal(0x54d2), U256::from(123_400_000u64));
    }

    #[test]
    fn test_zero() {
        assert_eq!(encode_decimal(U256::ZERO).unwrap(), 0);
        assert_eq!(decode_decimal(0), U256::ZERO);
    }

    #[test]
    fn test_small_values_keep_exponent_zero() {
        assert_eq!(encode_decimal(U256::from(1u8)).unwrap(), 0x0001);
        assert_eq!(encode_decimal(U256::from(4095u16)).unwrap(), 0x0fff);
        assert_eq!(encode_decimal(U256::from(100u8)).unwrap(), 0x2001);
    }

    #[test]
    fn test_not_encodable() {
        assert_eq!(encode_decimal(U256::from(4097u16)), Err(EncodingError::NotEncodable));
        assert_eq!(encode_decimal(U256::from(12_345u16)), Err(EncodingError::NotEncodable));
        assert!(encode_decimal(U256::MAX).is_err());
    }

    #[test]
    fn test_exponent_is_capped_at_fifteen() {
        // 10^16 strips 15 zeros and keeps a mantissa of 10
        let value = U256::from(10u8).pow(U256::from(16u8));
        assert_eq!(encode_decimal(value).unwrap(), 0xf00a);
        assert_eq!(decode_decimal(0xf00a), value);

        // 10^19 would need a mantissa of 10_000
        let value = U256::from(10u8).pow(U256::from(19u8));
        assert_eq!(encode_decimal(value), Err(EncodingError::NotEncodable));
    }

    #[test]
    fn test_decode_largest_word() {
        let expected = U256::from(4095u16) * U256::from(10u8).pow(U256::from(15u8));
        assert_eq!(decode_decimal(0xffff), expected);
    }

    proptest! {
        #[test]
        fn prop_round_trip(mantissa in 0u16..=0xfff, exponent in 0u16..=15) {
            let value = U256::from(mantissa) * U256::from(10u8).pow(U256::from(exponent));
            let word = encode_decimal(value).unwrap();
            prop_assert_eq!(decode_decimal(word), value);
        }

        #[test]
        fn prop_encoded_words_are_canonical(word in any::<u16>()) {
            let value = decode_decimal(word);
            let reencoded = encode_decimal(value).unwrap();
            prop_assert_eq!(decode_decimal(reencoded), value);
        }
    }
}
