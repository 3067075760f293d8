//! Caller input for one quote

use crate::error::RouterError;
use ethereum_types::{H160, U256};
use types::{parse_units, Token, TokenPair};

/// What to swap, how much, and with which tolerance
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub token_in: Token,
    pub token_out: Token,
    /// Raw amount in the input token's smallest unit
    pub amount_in: U256,
    /// Falls back to the aggregator default when absent
    pub slippage_bps: Option<u16>,
    /// Overrides the configured multi-hop intermediates when non-empty
    pub intermediates: Vec<H160>,
}

impl QuoteRequest {
    pub fn new(token_in: Token, token_out: Token, amount_in: U256) -> Self {
        Self {
            token_in,
            token_out,
            amount_in,
            slippage_bps: None,
            intermediates: Vec::new(),
        }
    }

    /// Parse a human amount (`"1.5"`) at the input token's precision
    pub fn from_human(token_in: Token, token_out: Token, amount: &str) -> Result<Self, RouterError> {
        let amount_in = parse_units(amount, token_in.decimals)?;
        Ok(Self::new(token_in, token_out, amount_in))
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u16) -> Self {
        self.slippage_bps = Some(slippage_bps);
        self
    }

    pub fn with_intermediates(mut self, intermediates: Vec<H160>) -> Self {
        self.intermediates = intermediates;
        self
    }

    /// Pool-facing addresses, with native currency replaced by its wrapped token
    pub fn routing_addresses(&self, wrapped_native: H160) -> (H160, H160) {
        (
            self.token_in.routing_address(wrapped_native),
            self.token_out.routing_address(wrapped_native),
        )
    }

    pub fn pair(&self, wrapped_native: H160) -> TokenPair {
        let (token_in, token_out) = self.routing_addresses(wrapped_native);
        TokenPair::from_addresses(token_in, token_out)
    }

    /// Reject requests no source can serve
    pub fn validate(&self, wrapped_native: H160) -> Result<(), RouterError> {
        let (token_in, token_out) = self.routing_addresses(wrapped_native);
        if token_in == token_out {
            return Err(RouterError::InvalidRequest(format!(
                "input and output resolve to the same token {:?}",
                token_in
            )));
        }
        if self.amount_in.is_zero() {
            return Err(RouterError::InvalidRequest("amount_in is zero".to_string()));
        }
        Ok(())
    }
}
