//! Debounced quote session with stale-result suppression
//!
//! Interactive callers fire a new request on every input change. Each request takes a
//! [`RequestTicket`] from a shared [`RequestGeneration`] counter; a request waits out
//! the debounce window, aggregates, and publishes only while its ticket is still the
//! newest. Anything superseded is dropped mid-flight with [`RouterError::Superseded`].

use crate::aggregator::RouteAggregator;
use crate::error::RouterError;
use crate::request::QuoteRequest;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use types::{MarketSnapshot, RoutePlan};

/// Monotonic request counter shared by every request of one session
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
    changed: Notify,
}

impl RequestGeneration {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start a new request, superseding all earlier tickets
    pub fn next_ticket(self: &Arc<Self>) -> RequestTicket {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        self.changed.notify_waiters();
        RequestTicket {
            generation,
            source: Arc::clone(self),
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }
}

/// Claim on being the newest request
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    source: Arc<RequestGeneration>,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.source.current() == self.generation
    }

    /// Resolves once a newer ticket has been issued
    pub async fn superseded(&self) {
        loop {
            let notified = self.source.changed.notified();
            if !self.is_current() {
                return;
            }
            notified.await;
        }
    }

    fn check(&self) -> Result<(), RouterError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(RouterError::Superseded {
                generation: self.generation,
            })
        }
    }
}

/// Result published to session subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub generation: u64,
    pub result: Result<RoutePlan, RouterError>,
}

/// Debounced, generation-tracked front end to a [`RouteAggregator`]
pub struct QuoteSession {
    aggregator: Arc<RouteAggregator>,
    generation: Arc<RequestGeneration>,
    debounce: Duration,
    updates: watch::Sender<Option<SessionUpdate>>,
}

impl QuoteSession {
    pub fn new(aggregator: Arc<RouteAggregator>, debounce: Duration) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            aggregator,
            generation: RequestGeneration::new(),
            debounce,
            updates,
        }
    }

    /// Latest published result; never holds a superseded request's output
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUpdate>> {
        self.updates.subscribe()
    }

    pub fn latest(&self) -> Option<SessionUpdate> {
        self.updates.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// Debounce, aggregate and publish one request
    ///
    /// Returns `Superseded` without publishing if a newer request arrives at any point
    /// before the result is published.
    pub async fn submit(
        &self,
        request: QuoteRequest,
        market: Arc<MarketSnapshot>,
    ) -> Result<RoutePlan, RouterError> {
        let ticket = self.generation.next_ticket();

        if !self.debounce.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(self.debounce) => {}
                _ = ticket.superseded() => {
                    crate::log_stale!("request {} superseded while debouncing", ticket.generation());
                    return Err(RouterError::Superseded { generation: ticket.generation() });
                }
            }
        }
        ticket.check()?;

        let result = tokio::select! {
            result = self.aggregator.quote_with_slippage(&request, &market) => result,
            _ = ticket.superseded() => {
                crate::log_stale!("request {} superseded during aggregation", ticket.generation());
                return Err(RouterError::Superseded { generation: ticket.generation() });
            }
        };

        self.publish(&ticket, result)
    }

    /// Publish under the channel lock so a stale result can never overwrite a newer one
    fn publish(
        &self,
        ticket: &RequestTicket,
        result: Result<RoutePlan, RouterError>,
    ) -> Result<RoutePlan, RouterError> {
        let update = SessionUpdate {
            generation: ticket.generation(),
            result: result.clone(),
        };

        let published = self.updates.send_if_modified(|slot| {
            let newer_published = slot
                .as_ref()
                .is_some_and(|prev| prev.generation > ticket.generation());
            if newer_published || !ticket.is_current() {
                return false;
            }
            *slot = Some(update);
            true
        });

        if !published {
            return Err(RouterError::Superseded {
                generation: ticket.generation(),
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_supersede_each_other() {
        let generation = RequestGeneration::new();
        let first = generation.next_ticket();
        assert!(first.is_current());

        let second = generation.next_ticket();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());
        assert!(matches!(
            first.check(),
            Err(RouterError::Superseded { generation: 1 })
        ));
    }

    #[tokio::test]
    async fn test_superseded_wakes_waiter() {
        let generation = RequestGeneration::new();
        let first = generation.next_ticket();

        let waiter = tokio::spawn({
            let first = first.clone();
            async move { first.superseded().await }
        });
        tokio::task::yield_now().await;

        generation.next_ticket();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[test]
    fn test_superseded_returns_immediately_for_stale_ticket() {
        let generation = RequestGeneration::new();
        let first = generation.next_ticket();
        generation.next_ticket();
        tokio_test::block_on(first.superseded());
    }
}
