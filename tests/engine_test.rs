//! Integration tests for the subscription lifecycle

use quotesim::instrument::default_watchlist;
use quotesim::sim::{MarketSimulator, SimParams};
use rust_decimal_macros::dec;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

fn simulator() -> MarketSimulator {
    MarketSimulator::new(default_watchlist(), SimParams::default())
        .unwrap()
        .with_seed(42)
}

/// Yield until every subscription task has wound down
async fn drain_tasks(sim: &MarketSimulator) {
    for _ in 0..100 {
        if sim.active_subscriptions() == 0 {
            return;
        }
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_emission_before_first_interval() {
    let sim = simulator();
    let mut sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();

    tokio::time::advance(TICK - Duration::from_millis(1)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(sub.try_recv().is_err(), "emitted before the interval elapsed");

    let quote = sub.recv().await.unwrap();
    assert_eq!(quote.symbol, "FX:EURUSD");

    sub.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick() {
    let sim = simulator();
    let mut sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();

    sub.cancel();
    assert!(sub.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_consecutive_ticks_are_fresh_values() {
    let sim = simulator();
    let mut sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();

    let first = sub.recv().await.unwrap();
    let second = sub.recv().await.unwrap();

    // Each tick hands the consumer an independently owned snapshot
    assert!(first.bid < first.ask);
    assert!(second.bid < second.ask);
    assert!(second.generated_at >= first.generated_at);

    sub.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_no_emission_after_cancel() {
    let sim = simulator();
    let mut sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();

    let _ = sub.recv().await.unwrap();
    sub.cancel();

    // Whatever was in flight drains, then the stream closes
    while sub.recv().await.is_some() {}
    tokio::time::advance(TICK * 5).await;
    assert!(sub.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_double_cancel_many_times() {
    let sim = simulator();
    let sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();
    let handle = sub.cancel_handle();

    for _ in 0..5 {
        sub.cancel();
        handle.cancel();
    }

    drain_tasks(&sim).await;
    assert_eq!(sim.active_subscriptions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_cancel_cycles_leave_no_timers() {
    let sim = simulator();

    for _ in 0..20 {
        let quotes = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();
        let book = sim
            .subscribe_book("FX:EURUSD", TICK, 10, dec!(0.00001))
            .unwrap();
        quotes.cancel();
        book.cancel();
        drain_tasks(&sim).await;
    }

    assert_eq!(sim.active_subscriptions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_simultaneous_teardowns_keep_exact_accounting() {
    let sim = simulator();
    let subs: Vec<_> = (0..10)
        .map(|_| sim.subscribe_quotes("FX:EURUSD", TICK).unwrap())
        .collect();
    assert_eq!(sim.active_subscriptions(), 10);

    // All tasks wind down at once; the live count must land on zero, not a
    // stale intermediate value
    for sub in &subs {
        sub.cancel();
    }
    drain_tasks(&sim).await;
    assert_eq!(sim.active_subscriptions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_receiver_stops_task() {
    let sim = simulator();
    let sub = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();
    assert_eq!(sim.active_subscriptions(), 1);

    drop(sub);
    tokio::time::advance(TICK * 2).await;
    drain_tasks(&sim).await;
    assert_eq!(sim.active_subscriptions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_market_snapshot_is_atomic_per_tick() {
    let sim = simulator();
    let mut sub = sim.subscribe_market(TICK).unwrap();
    let expected = default_watchlist().len();

    for _ in 0..3 {
        let snapshot = sub.recv().await.unwrap();
        // Never a partially regenerated set
        assert_eq!(snapshot.quotes.len(), expected);
        for quote in &snapshot.quotes {
            assert!(quote.bid < quote.ask);
        }
    }

    sub.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_independent_subscriptions_interleave() {
    let sim = simulator();
    let mut fast = sim.subscribe_quotes("FX:EURUSD", TICK).unwrap();
    let mut slow = sim.subscribe_quotes("AAPL", TICK * 3).unwrap();

    // Three fast ticks land before the first slow one
    for _ in 0..3 {
        assert!(fast.recv().await.is_some());
    }
    let apple = slow.recv().await.unwrap();
    assert_eq!(apple.symbol, "AAPL");

    fast.cancel();
    slow.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_book_fixture_over_subscription() {
    let instruments = vec![quotesim::instrument::Instrument::new(
        "FX:EURUSD",
        "Euro/US Dollar",
        dec!(1.15874),
        dec!(0.00001),
    )];
    let sim = MarketSimulator::new(instruments, SimParams::default())
        .unwrap()
        .with_seed(7);
    let mut sub = sim
        .subscribe_book("FX:EURUSD", TICK, 10, dec!(0.00001))
        .unwrap();

    let book = sub.recv().await.unwrap();
    assert_eq!(book.bids[0].price, dec!(1.15873));
    assert_eq!(book.asks[0].price, dec!(1.15875));
    assert_eq!(book.bids[9].price, dec!(1.15864));
    assert_eq!(book.mid_price, dec!(1.15874));

    sub.cancel();
}
