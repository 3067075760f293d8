//! 512-bit intermediate helpers for exact `a * b / c`

use ethereum_types::{U256, U512};

/// `floor(a * b / denominator)` with a full-width product; `None` on zero
/// denominator or a quotient wider than 256 bits
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    narrow(a.full_mul(b) / U512::from(denominator))
}

/// Truncating conversion back to 256 bits, `None` if any high limb is set
pub fn narrow(value: U512) -> Option<U256> {
    let U512(ref limbs) = value;
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_exceeds_256_bit_product() {
        let max = U256::MAX;
        assert_eq!(mul_div(max, max, max), Some(max));
        assert_eq!(mul_div(max, U256::from(2u64), U256::from(4u64)), Some(max / 2));
    }

    #[test]
    fn test_mul_div_failures() {
        assert_eq!(mul_div(U256::one(), U256::one(), U256::zero()), None);
        assert_eq!(mul_div(U256::MAX, U256::from(2u64), U256::one()), None);
    }
}
