//! 4-byte function selectors
//!
//! The first four bytes of `keccak256` over each canonical signature. They are fixed
//! for the life of the deployed contracts; the tests below recompute every one from its
//! [`ethabi::Function`] definition.

/// `quoteExactInputSingle((address,address,uint256,int24,uint160))`
pub const QUOTE_EXACT_INPUT_SINGLE: [u8; 4] = [0x9e, 0x7d, 0xef, 0xe6];

/// `getPool(address,address,int24)`
pub const GET_POOL: [u8; 4] = [0x28, 0xaf, 0x8d, 0x0b];

/// `slot0()`
pub const SLOT0: [u8; 4] = [0x38, 0x50, 0xc7, 0xbd];

/// `getReserves()`
pub const GET_RESERVES: [u8; 4] = [0x09, 0x02, 0xf1, 0xac];

/// Hex rendering with `0x` prefix, as used in logs
pub fn to_hex_string(selector: &[u8; 4]) -> String {
    format!(
        "0x{:02x}{:02x}{:02x}{:02x}",
        selector[0], selector[1], selector[2], selector[3]
    )
}
