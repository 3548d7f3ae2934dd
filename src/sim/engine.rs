//! Market simulator engine
//!
//! Owns the instrument catalog and hands out timer-driven subscriptions.
//! Each subscription is one tokio task driving one periodic interval; ticks
//! produce fresh immutable snapshots pushed over a channel. Cancellation is
//! explicit, idempotent, and also triggered by dropping the receiver.

use super::{generate_order_book, generate_quote, OrderBookSnapshot, Quote, SimError, SimParams};
use crate::instrument::Instrument;
use crate::telemetry::{increment_counter, subscription_ended, subscription_started, CounterMetric};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Channel capacity per subscription; a slow consumer backpressures its own
/// timer task, never other subscriptions
const SUBSCRIPTION_BUFFER: usize = 16;

/// All subscribed instruments regenerated in one tick; consumers never see a
/// partially updated set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// One quote per instrument, in catalog order
    pub quotes: Vec<Quote>,
    /// Wall-clock time of the tick
    pub generated_at: DateTime<Utc>,
}

/// Cancellation handle for a subscription
///
/// Cloneable so teardown paths can keep their own copy. Calling `cancel` more
/// than once is a no-op.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Stop the subscription. Idempotent; never an error.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// A live subscription: the receiving end of the snapshot stream plus its
/// cancellation handle
pub struct Subscription<T> {
    id: Uuid,
    rx: mpsc::Receiver<T>,
    cancel: CancelHandle,
}

impl<T> Subscription<T> {
    /// Subscription identifier (appears in logs)
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receive the next snapshot; `None` once the subscription has stopped
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Non-blocking receive
    pub fn try_recv(&mut self) -> Result<T, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }

    /// Stop this subscription. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A detached handle for cancelling from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

/// Generates quotes and order book snapshots on a periodic cadence
pub struct MarketSimulator {
    instruments: Vec<Instrument>,
    params: SimParams,
    seed: Option<u64>,
    active: Arc<AtomicUsize>,
}

impl MarketSimulator {
    /// Create a simulator over the given catalog
    pub fn new(instruments: Vec<Instrument>, params: SimParams) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self {
            instruments,
            params,
            seed: None,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Seed the random source for deterministic output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of live subscription tasks
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Look up and validate an instrument; invalid reference prices surface
    /// here, at subscription time, not on the first tick
    fn instrument(&self, symbol: &str) -> Result<Instrument, SimError> {
        let instrument = self
            .instruments
            .iter()
            .find(|i| i.symbol == symbol)
            .ok_or_else(|| SimError::UnknownInstrument(symbol.to_string()))?;
        instrument.validate()?;
        Ok(instrument.clone())
    }

    /// Subscribe to periodic quotes for one instrument
    pub fn subscribe_quotes(
        &self,
        symbol: &str,
        interval: Duration,
    ) -> Result<Subscription<Quote>, SimError> {
        let instrument = self.instrument(symbol)?;
        let params = self.params.clone();

        tracing::info!(symbol, ?interval, "Subscribing to quotes");
        Ok(self.spawn(interval, CounterMetric::QuoteTicks, move |rng| {
            generate_quote(&instrument, &params, rng)
        }))
    }

    /// Subscribe to periodic order book snapshots for one instrument
    pub fn subscribe_book(
        &self,
        symbol: &str,
        interval: Duration,
        level_count: usize,
        tick_size: Decimal,
    ) -> Result<Subscription<OrderBookSnapshot>, SimError> {
        let instrument = self.instrument(symbol)?;
        if level_count == 0 {
            return Err(SimError::InvalidLevelCount);
        }
        if tick_size <= Decimal::ZERO {
            return Err(SimError::InvalidTickSize(tick_size));
        }
        let params = self.params.clone();

        tracing::info!(symbol, level_count, %tick_size, ?interval, "Subscribing to order book");
        Ok(self.spawn(interval, CounterMetric::BookTicks, move |rng| {
            generate_order_book(&instrument, level_count, tick_size, &params, rng)
        }))
    }

    /// Subscribe to periodic snapshots covering the whole catalog. All
    /// instruments are regenerated within one tick and delivered as a single
    /// message.
    pub fn subscribe_market(
        &self,
        interval: Duration,
    ) -> Result<Subscription<MarketSnapshot>, SimError> {
        for instrument in &self.instruments {
            instrument.validate()?;
        }
        let instruments = self.instruments.clone();
        let params = self.params.clone();

        tracing::info!(count = instruments.len(), ?interval, "Subscribing to market snapshots");
        Ok(self.spawn(interval, CounterMetric::MarketTicks, move |rng| {
            let mut quotes = Vec::with_capacity(instruments.len());
            for instrument in &instruments {
                // One instrument failing must not stop the others
                match generate_quote(instrument, &params, rng) {
                    Ok(quote) => quotes.push(quote),
                    Err(e) => {
                        tracing::warn!(symbol = %instrument.symbol, error = %e, "Quote generation failed")
                    }
                }
            }
            Ok(MarketSnapshot {
                quotes,
                generated_at: Utc::now(),
            })
        }))
    }

    /// Spawn the per-subscription timer task. The first emission happens one
    /// full interval after subscribing, so cancelling before the interval
    /// elapses yields zero emissions.
    fn spawn<T, F>(&self, interval: Duration, metric: CounterMetric, mut produce: F) -> Subscription<T>
    where
        T: Send + 'static,
        F: FnMut(&mut StdRng) -> Result<T, SimError> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let mut rng = self.make_rng();

        let active = Arc::clone(&self.active);
        active.fetch_add(1, Ordering::SeqCst);
        subscription_started();

        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    changed = cancel_rx.changed() => match changed {
                        Ok(()) if *cancel_rx.borrow() => {
                            tracing::debug!(%id, "Subscription cancelled");
                            break;
                        }
                        Ok(()) => {}
                        // Every handle dropped; nothing left that could cancel
                        // or receive, so stop
                        Err(_) => break,
                    },
                    _ = ticker.tick() => {
                        match produce(&mut rng) {
                            Ok(snapshot) => {
                                increment_counter(metric);
                                if tx.send(snapshot).await.is_err() {
                                    tracing::debug!(%id, "Receiver dropped, stopping subscription");
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(%id, error = %e, "Snapshot generation failed");
                            }
                        }
                    }
                }
            }

            active.fetch_sub(1, Ordering::SeqCst);
            subscription_ended();
        });

        Subscription {
            id,
            rx,
            cancel: CancelHandle { tx: cancel_tx },
        }
    }
}
