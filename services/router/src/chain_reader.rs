//! Refresh pool snapshots from chain state
//!
//! Fills a [`MarketSnapshot`] through plain `eth_call` reads: the V3 factory's
//! `getPool` followed by `slot0()` for every configured tick spacing, and
//! `getReserves()` for V2 pools whose address is known. Reads are concurrent; a
//! failed read leaves that pool's previous snapshot untouched.

use crate::backend::{call_typed, CallBackend};
use anyhow::{Context, Result};
use dex::{GetPool, GetPoolParams, GetReserves, Slot0};
use ethereum_types::{H160, U256};
use futures::future::join_all;
use std::sync::Arc;
use types::{MarketSnapshot, PoolKey, PoolStateSnapshot, V2PoolSnapshot, V3PoolSnapshot};

pub struct ChainReader {
    backend: Arc<dyn CallBackend>,
    factory: Option<H160>,
    tick_spacings: Vec<i32>,
}

impl ChainReader {
    pub fn new(backend: Arc<dyn CallBackend>, factory: Option<H160>, tick_spacings: Vec<i32>) -> Self {
        Self {
            backend,
            factory,
            tick_spacings,
        }
    }

    /// Current slot state of the pool at one tick spacing
    ///
    /// A spacing without a deployed pool comes back with `exists = false`.
    pub async fn read_v3_pool(
        &self,
        token_a: H160,
        token_b: H160,
        tick_spacing: i32,
    ) -> Result<V3PoolSnapshot> {
        let factory = self.factory.context("No V3 factory address configured")?;

        let params = GetPoolParams {
            token_a,
            token_b,
            tick_spacing,
        };
        let Some(pool) = call_typed::<GetPool>(self.backend.as_ref(), factory, &params)
            .await
            .with_context(|| format!("getPool at spacing {}", tick_spacing))?
        else {
            return Ok(V3PoolSnapshot {
                sqrt_price_x96: U256::zero(),
                current_tick: 0,
                tick_spacing,
                exists: false,
                address: None,
            });
        };

        let slot0 = call_typed::<Slot0>(self.backend.as_ref(), pool, &())
            .await
            .with_context(|| format!("slot0 of {:?}", pool))?;

        Ok(V3PoolSnapshot {
            sqrt_price_x96: slot0.sqrt_price_x96,
            current_tick: slot0.tick,
            tick_spacing,
            exists: true,
            address: Some(pool),
        })
    }

    /// Refresh every configured spacing for one pair; returns how many were stored
    pub async fn refresh_v3_pair(
        &self,
        market: &mut MarketSnapshot,
        token_a: H160,
        token_b: H160,
    ) -> usize {
        let reads = self
            .tick_spacings
            .iter()
            .map(|&tick_spacing| self.read_v3_pool(token_a, token_b, tick_spacing));

        let mut stored = 0;
        for (result, tick_spacing) in join_all(reads).await.into_iter().zip(&self.tick_spacings) {
            match result {
                Ok(snapshot) => {
                    market.insert_v3(token_a, token_b, snapshot);
                    stored += 1;
                }
                Err(e) => {
                    crate::log_warning!("V3 spacing {} not refreshed: {:#}", tick_spacing, e);
                }
            }
        }
        crate::log_pool!(
            "Refreshed {}/{} V3 spacings for {:?}/{:?}",
            stored,
            self.tick_spacings.len(),
            token_a,
            token_b
        );
        stored
    }

    /// Re-read reserves of every addressed V2 pool; returns how many were updated
    pub async fn refresh_v2_reserves(&self, market: &mut MarketSnapshot) -> usize {
        let targets: Vec<(H160, H160, H160, V2PoolSnapshot)> = market
            .pools()
            .filter_map(|(key, state)| match (key, state) {
                (PoolKey::V2 { token0, token1, .. }, PoolStateSnapshot::V2(pool)) => pool
                    .address
                    .map(|address| (*token0, *token1, address, pool.clone())),
                _ => None,
            })
            .collect();

        let reads = targets
            .iter()
            .map(|(_, _, address, _)| call_typed::<GetReserves>(self.backend.as_ref(), *address, &()));

        let mut updated = 0;
        for (result, (token0, token1, address, pool)) in join_all(reads).await.into_iter().zip(targets) {
            match result {
                Ok(reserves) => {
                    market.insert_v2(
                        token0,
                        token1,
                        V2PoolSnapshot {
                            reserve0: reserves.reserve0,
                            reserve1: reserves.reserve1,
                            ..pool
                        },
                    );
                    updated += 1;
                }
                Err(e) => {
                    crate::log_warning!("Reserves of {:?} not refreshed: {:#}", address, e);
                }
            }
        }
        updated
    }
}
