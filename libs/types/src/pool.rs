//! Point-in-time pool state supplied by the snapshot-fetching layer

use crate::token::{sort_tokens, Token};
use ethereum_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical address of one liquidity source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKey {
    V2 {
        token0: H160,
        token1: H160,
        stable: bool,
    },
    V3 {
        token0: H160,
        token1: H160,
        tick_spacing: i32,
    },
}

impl PoolKey {
    pub fn v2(token_a: H160, token_b: H160, stable: bool) -> Self {
        let (token0, token1) = sort_tokens(token_a, token_b);
        Self::V2 {
            token0,
            token1,
            stable,
        }
    }

    pub fn v3(token_a: H160, token_b: H160, tick_spacing: i32) -> Self {
        let (token0, token1) = sort_tokens(token_a, token_b);
        Self::V3 {
            token0,
            token1,
            tick_spacing,
        }
    }

    pub fn tokens(&self) -> (H160, H160) {
        match *self {
            Self::V2 { token0, token1, .. } | Self::V3 { token0, token1, .. } => (token0, token1),
        }
    }
}

/// Constant-function pool reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2PoolSnapshot {
    pub reserve0: U256,
    pub reserve1: U256,
    pub stable: bool,
    /// Pool fee override in basis points; the router default applies when absent
    #[serde(default)]
    pub fee_bps: Option<u16>,
    #[serde(default)]
    pub address: Option<H160>,
}

/// Concentrated-liquidity pool slot state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3PoolSnapshot {
    pub sqrt_price_x96: U256,
    pub current_tick: i32,
    pub tick_spacing: i32,
    /// Whether the factory has a pool deployed at this spacing
    pub exists: bool,
    #[serde(default)]
    pub address: Option<H160>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolStateSnapshot {
    V2(V2PoolSnapshot),
    V3(V3PoolSnapshot),
}

/// Every pool snapshot available to one quote request
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    tokens: HashMap<H160, Token>,
    pools: HashMap<PoolKey, PoolStateSnapshot>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: Token) {
        self.tokens.insert(token.address, token);
    }

    pub fn token(&self, address: &H160) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn insert_v2(&mut self, token_a: H160, token_b: H160, snapshot: V2PoolSnapshot) {
        let key = PoolKey::v2(token_a, token_b, snapshot.stable);
        self.pools.insert(key, PoolStateSnapshot::V2(snapshot));
    }

    pub fn insert_v3(&mut self, token_a: H160, token_b: H160, snapshot: V3PoolSnapshot) {
        let key = PoolKey::v3(token_a, token_b, snapshot.tick_spacing);
        self.pools.insert(key, PoolStateSnapshot::V3(snapshot));
    }

    pub fn v2_pool(&self, token_a: H160, token_b: H160, stable: bool) -> Option<&V2PoolSnapshot> {
        match self.pools.get(&PoolKey::v2(token_a, token_b, stable)) {
            Some(PoolStateSnapshot::V2(pool)) => Some(pool),
            _ => None,
        }
    }

    pub fn v3_pool(&self, token_a: H160, token_b: H160, tick_spacing: i32) -> Option<&V3PoolSnapshot> {
        match self.pools.get(&PoolKey::v3(token_a, token_b, tick_spacing)) {
            Some(PoolStateSnapshot::V3(pool)) => Some(pool),
            _ => None,
        }
    }

    /// Tick spacings with a snapshot for this pair, ascending
    pub fn v3_spacings(&self, token_a: H160, token_b: H160) -> Vec<i32> {
        let (token0, token1) = sort_tokens(token_a, token_b);
        let mut spacings: Vec<i32> = self
            .pools
            .keys()
            .filter_map(|key| match *key {
                PoolKey::V3 {
                    token0: t0,
                    token1: t1,
                    tick_spacing,
                } if t0 == token0 && t1 == token1 => Some(tick_spacing),
                _ => None,
            })
            .collect();
        spacings.sort_unstable();
        spacings
    }

    pub fn pools(&self) -> impl Iterator<Item = (&PoolKey, &PoolStateSnapshot)> {
        self.pools.iter()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }
}
