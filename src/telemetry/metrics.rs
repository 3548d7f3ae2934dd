//! Simulation metrics

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Quote subscription ticks
    QuoteTicks,
    /// Order book subscription ticks
    BookTicks,
    /// Whole-market snapshot ticks
    MarketTicks,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::QuoteTicks => "quotesim_quote_ticks_total",
            CounterMetric::BookTicks => "quotesim_book_ticks_total",
            CounterMetric::MarketTicks => "quotesim_market_ticks_total",
        }
    }
}

/// Increment a tick counter
pub fn increment_counter(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}

/// Record a subscription task starting
pub fn subscription_started() {
    metrics::gauge!("quotesim_active_subscriptions").increment(1.0);
}

/// Record a subscription task winding down
pub fn subscription_ended() {
    metrics::gauge!("quotesim_active_subscriptions").decrement(1.0);
}
