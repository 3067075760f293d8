//! Shared fixtures for router integration tests

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use eddy_router::{CallBackend, QuoteRequest, RouterError, SourceQuoter};
use ethereum_types::{H160, U256};
use parking_lot::Mutex;
use std::time::Duration;
use types::{
    pow10, Hop, MarketSnapshot, PoolKey, Quote, QuoteMetadata, SourceKind, Token, V2PoolSnapshot,
    V3PoolSnapshot,
};

pub fn addr(n: u64) -> H160 {
    H160::from_low_u64_be(n)
}

pub fn word(value: U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}

/// 18-decimal input token, sorts first
pub fn token_a() -> Token {
    Token::new(addr(1), 18, "AAA")
}

/// 6-decimal output token
pub fn token_b() -> Token {
    Token::new(addr(2), 6, "BBB")
}

/// 18-decimal intermediate token
pub fn token_mid() -> Token {
    Token::new(addr(3), 18, "MID")
}

pub fn human(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * pow10(decimals).unwrap()
}

pub fn market_with_tokens() -> MarketSnapshot {
    let mut market = MarketSnapshot::new();
    for token in [token_a(), token_b(), token_mid()] {
        market.add_token(token);
    }
    market
}

pub fn add_v2(market: &mut MarketSnapshot, a: &Token, b: &Token, reserve_a: U256, reserve_b: U256, stable: bool) {
    let (reserve0, reserve1) = if a.address < b.address {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };
    market.insert_v2(
        a.address,
        b.address,
        V2PoolSnapshot {
            reserve0,
            reserve1,
            stable,
            fee_bps: None,
            address: None,
        },
    );
}

/// V3 pool priced at tick 0 (1:1 raw units)
pub fn add_v3_unit(market: &mut MarketSnapshot, a: H160, b: H160, tick_spacing: i32) {
    market.insert_v3(
        a,
        b,
        V3PoolSnapshot {
            sqrt_price_x96: U256::one() << 96,
            current_tick: 0,
            tick_spacing,
            exists: true,
            address: None,
        },
    );
}

/// Quoter with a canned answer and an optional delay before it
pub struct FixedQuoter {
    pub kind: SourceKind,
    pub amount_out: Option<u64>,
    pub delay: Option<Duration>,
    /// Only requests with this raw input are delayed
    pub delay_for_amount: Option<U256>,
}

impl FixedQuoter {
    pub fn new(kind: SourceKind, amount_out: Option<u64>) -> Self {
        Self {
            kind,
            amount_out,
            delay: None,
            delay_for_amount: None,
        }
    }

    pub fn slow_for(mut self, amount_in: U256, delay: Duration) -> Self {
        self.delay = Some(delay);
        self.delay_for_amount = Some(amount_in);
        self
    }
}

#[async_trait]
impl SourceQuoter for FixedQuoter {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn quote(&self, request: &QuoteRequest, _market: &MarketSnapshot) -> Result<Option<Quote>, RouterError> {
        if let (Some(delay), Some(amount)) = (self.delay, self.delay_for_amount) {
            if request.amount_in == amount {
                tokio::time::sleep(delay).await;
            }
        }
        Ok(self.amount_out.map(|amount_out| Quote {
            source: self.kind,
            amount_in: request.amount_in,
            amount_out: U256::from(amount_out),
            out_decimals: request.token_out.decimals,
            hops: vec![Hop {
                token_in: request.token_in.address,
                token_out: request.token_out.address,
                pool: PoolKey::v2(request.token_in.address, request.token_out.address, false),
            }],
            metadata: QuoteMetadata::default(),
        }))
    }
}

pub enum Reply {
    Words(Vec<[u8; 32]>),
    Raw(Vec<u8>),
    Revert,
}

/// Call backend that answers every call with one scripted reply and records calldata
pub struct RecordingBackend {
    reply: Reply,
    pub calls: Mutex<Vec<(H160, Vec<u8>)>>,
}

impl RecordingBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CallBackend for RecordingBackend {
    async fn call(&self, to: H160, data: Vec<u8>) -> Result<Vec<u8>> {
        self.calls.lock().push((to, data));
        match &self.reply {
            Reply::Words(words) => Ok(words.concat()),
            Reply::Raw(bytes) => Ok(bytes.clone()),
            Reply::Revert => bail!("execution reverted"),
        }
    }
}
