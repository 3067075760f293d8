//! Token identity and canonical pair ordering

use ethereum_types::H160;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable token descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: H160,
    pub decimals: u8,
    /// Chain-native currency (ETH/MATIC); routed through the wrapped-native token
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub symbol: String,
}

impl Token {
    pub fn new(address: H160, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            is_native: false,
            symbol: symbol.into(),
        }
    }

    /// Native currency descriptor. `address` is the placeholder used by the caller,
    /// never a pool token.
    pub fn native(address: H160, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            is_native: true,
            symbol: symbol.into(),
        }
    }

    /// Address used for pool lookups: native currency resolves to its wrapped token
    pub fn routing_address(&self, wrapped_native: H160) -> H160 {
        if self.is_native {
            wrapped_native
        } else {
            self.address
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "0x{}", hex::encode(self.address.as_bytes()))
        } else {
            f.write_str(&self.symbol)
        }
    }
}

/// Address parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid hex in address {input:?}")]
    InvalidHex { input: String },

    #[error("Address {input:?} is {len} bytes, expected 20")]
    InvalidLength { input: String, len: usize },
}

/// Parse a 20-byte hex address, with or without the `0x` prefix
pub fn parse_address(input: &str) -> Result<H160, AddressError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|_| AddressError::InvalidHex {
        input: input.to_string(),
    })?;
    if bytes.len() != 20 {
        return Err(AddressError::InvalidLength {
            input: input.to_string(),
            len: bytes.len(),
        });
    }
    Ok(H160::from_slice(&bytes))
}

/// Order two addresses canonically (`token0 < token1`)
pub fn sort_tokens(a: H160, b: H160) -> (H160, H160) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Trade direction resolved against canonical pool ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    pub token0: H160,
    pub token1: H160,
    /// `true` when the input token is token0 (price moves down)
    pub zero_for_one: bool,
}

impl TokenPair {
    pub fn new(token_in: &Token, token_out: &Token) -> Self {
        Self::from_addresses(token_in.address, token_out.address)
    }

    pub fn from_addresses(token_in: H160, token_out: H160) -> Self {
        let (token0, token1) = sort_tokens(token_in, token_out);
        Self {
            token0,
            token1,
            zero_for_one: token_in == token0,
        }
    }

    pub fn token_in(&self) -> H160 {
        if self.zero_for_one {
            self.token0
        } else {
            self.token1
        }
    }

    pub fn token_out(&self) -> H160 {
        if self.zero_for_one {
            self.token1
        } else {
            self.token0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_orders_by_address() {
        let low = H160::from_low_u64_be(0x10);
        let high = H160::from_low_u64_be(0xff);

        let pair = TokenPair::from_addresses(high, low);
        assert_eq!(pair.token0, low);
        assert_eq!(pair.token1, high);
        assert!(!pair.zero_for_one);
        assert_eq!(pair.token_in(), high);
        assert_eq!(pair.token_out(), low);

        let pair = TokenPair::from_addresses(low, high);
        assert!(pair.zero_for_one);
        assert_eq!(pair.token_in(), low);
    }

    #[test]
    fn test_native_routes_through_wrapped() {
        let wrapped = H160::from_low_u64_be(0xeeee);
        let eth = Token::native(H160::zero(), 18, "ETH");
        assert_eq!(eth.routing_address(wrapped), wrapped);

        let usdc = Token::new(H160::from_low_u64_be(7), 6, "USDC");
        assert_eq!(usdc.routing_address(wrapped), usdc.address);
    }

    #[test]
    fn test_parse_address() {
        let expected = H160::from_low_u64_be(0x4200);
        assert_eq!(
            parse_address("0x0000000000000000000000000000000000004200").unwrap(),
            expected
        );
        assert_eq!(
            parse_address(" 0000000000000000000000000000000000004200 ").unwrap(),
            expected
        );
        assert!(matches!(
            parse_address("0x1234"),
            Err(AddressError::InvalidLength { len: 2, .. })
        ));
        assert!(matches!(
            parse_address("0xzz00000000000000000000000000000000004200"),
            Err(AddressError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_display_falls_back_to_address() {
        let anon = Token::new(H160::from_low_u64_be(1), 18, "");
        assert_eq!(
            anon.to_string(),
            "0x0000000000000000000000000000000000000001"
        );
    }
}
