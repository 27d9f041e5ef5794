//! Simulation state and the tick transition.
//!
//! A tick extends the price series by one sample, fills that sample's
//! indicators from the retained history, and, when the bot is enabled,
//! evaluates the signal and books the trade. The state is a plain value:
//! `tick` consumes it and returns the next one.

use rand::Rng;

use crate::domain::bot_config::{BotConfig, SimulationParams};
use crate::domain::generator;
use crate::domain::history::History;
use crate::domain::indicator::{annotate_latest, compute_indicators};
use crate::domain::ledger::TradeLedger;
use crate::domain::metrics::Statistics;
use crate::domain::sample::PriceSample;
use crate::domain::signal::{self, Signal};
use crate::domain::trade::Trade;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub sample: PriceSample,
    pub signal: Option<Signal>,
    pub trade: Option<Trade>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    series: History<PriceSample>,
    ledger: TradeLedger,
    tick_count: u64,
}

/// Initial series ending one step before `now_ms`, with indicators filled in.
pub fn bootstrap_series<R: Rng + ?Sized>(
    base_price: f64,
    params: &SimulationParams,
    now_ms: i64,
    rng: &mut R,
) -> Vec<PriceSample> {
    let count = params.bootstrap_samples;
    let start = now_ms.saturating_sub((count as i64).saturating_mul(params.bootstrap_step_ms));
    let raw = generator::extend(
        base_price,
        start,
        params.bootstrap_step_ms,
        params.bootstrap_volatility,
        count,
        rng,
    );
    compute_indicators(&raw, &params.indicators)
}

impl SimulationState {
    /// Empty series and trade log sized from `params`.
    pub fn new(params: &SimulationParams) -> Self {
        SimulationState {
            series: History::with_capacity(params.series_capacity),
            ledger: TradeLedger::new(params.trade_capacity),
            tick_count: 0,
        }
    }

    pub fn bootstrap<R: Rng + ?Sized>(params: &SimulationParams, now_ms: i64, rng: &mut R) -> Self {
        let mut state = Self::new(params);
        state
            .series
            .extend(bootstrap_series(params.base_price, params, now_ms, rng));
        state
    }

    pub fn series(&self) -> &History<PriceSample> {
        &self.series
    }

    pub fn trades(&self) -> &History<Trade> {
        self.ledger.trades()
    }

    pub fn statistics(&self) -> &Statistics {
        self.ledger.statistics()
    }

    pub fn last_trade(&self) -> Option<&Trade> {
        self.ledger.last_trade()
    }

    pub fn open_position(&self) -> Option<&Trade> {
        self.ledger.open_position()
    }

    /// Price of the newest sample.
    pub fn current_price(&self) -> Option<f64> {
        self.series.last().map(|s| s.price)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance by one tick using the `config` snapshot taken by the caller.
    #[must_use]
    pub fn tick<R: Rng + ?Sized>(
        mut self,
        config: &BotConfig,
        params: &SimulationParams,
        rng: &mut R,
    ) -> (Self, TickOutcome) {
        let step = i64::try_from(params.tick_interval_ms).unwrap_or(i64::MAX);
        let (last_price, timestamp) = match self.series.last() {
            Some(last) => (last.price, last.timestamp.saturating_add(step)),
            None => (params.base_price, step),
        };

        let raw = generator::next_sample(last_price, timestamp, params.tick_volatility, rng);
        let prices = self.retained_prices_with(raw.price);
        let sample = annotate_latest(raw, &prices, &params.indicators);
        self.series.push(sample.clone());
        self.tick_count += 1;

        let mut outcome = TickOutcome {
            sample,
            signal: None,
            trade: None,
        };
        if !config.enabled {
            return (self, outcome);
        }

        outcome.signal = signal::evaluate(
            &self.series,
            self.ledger.last_trade(),
            config.strategy,
            params.signal_policy,
            &params.indicators,
        );
        if let Some(sig) = &outcome.signal {
            outcome.trade = Some(self.ledger.execute(sig, config, outcome.sample.timestamp));
        }

        (self, outcome)
    }

    /// Prices the series will hold once `next` is pushed.
    fn retained_prices_with(&self, next: f64) -> Vec<f64> {
        let skip = (self.series.len() + 1).saturating_sub(self.series.capacity());
        self.series
            .iter()
            .skip(skip)
            .map(|s| s.price)
            .chain(std::iter::once(next))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Side;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: i64 = 1_700_000_000_000;

    fn params() -> SimulationParams {
        SimulationParams {
            seed: Some(42),
            ..SimulationParams::default()
        }
    }

    fn enabled() -> BotConfig {
        BotConfig {
            enabled: true,
            ..BotConfig::default()
        }
    }

    #[test]
    fn oversized_steps_saturate_instead_of_overflowing() {
        let params = SimulationParams {
            bootstrap_step_ms: i64::MAX / 2,
            tick_interval_ms: u64::MAX,
            ..params()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let state = SimulationState::bootstrap(&params, NOW, &mut rng);
        assert_eq!(state.series().first().unwrap().timestamp, NOW - i64::MAX);
        assert_eq!(state.series().last().unwrap().timestamp, NOW);

        let (state, first) = state.tick(&enabled(), &params, &mut rng);
        assert_eq!(first.sample.timestamp, i64::MAX);
        let (_, second) = state.tick(&enabled(), &params, &mut rng);
        assert_eq!(second.sample.timestamp, i64::MAX);
    }

    #[test]
    fn bootstrap_fills_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = SimulationState::bootstrap(&params(), NOW, &mut rng);
        assert_eq!(state.series().len(), 100);
        assert!(state.trades().is_empty());
        assert_eq!(state.tick_count(), 0);
        assert_eq!(state.series().last().unwrap().timestamp, NOW - 60_000);
        assert_eq!(state.series().first().unwrap().timestamp, NOW - 100 * 60_000);
        assert!(state.series().last().unwrap().sma_slow.is_some());
    }

    #[test]
    fn tick_appends_one_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = params();
        let state = SimulationState::bootstrap(&p, NOW, &mut rng);
        let last_ts = state.series().last().unwrap().timestamp;

        let (state, outcome) = state.tick(&BotConfig::default(), &p, &mut rng);

        assert_eq!(state.series().len(), 100);
        assert_eq!(outcome.sample.timestamp, last_ts + 3_000);
        assert_eq!(state.series().last(), Some(&outcome.sample));
        assert_eq!(state.current_price(), Some(outcome.sample.price));
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn tick_indicator_matches_full_recompute() {
        let mut rng = StdRng::seed_from_u64(9);
        let p = params();
        let mut state = SimulationState::bootstrap(&p, NOW, &mut rng);
        for _ in 0..30 {
            state = state.tick(&BotConfig::default(), &p, &mut rng).0;
        }
        let retained = state.series().to_vec();
        let full = compute_indicators(&retained, &p.indicators);
        assert_eq!(full.last(), retained.last());
    }

    #[test]
    fn disabled_bot_never_trades() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = params();
        let mut state = SimulationState::bootstrap(&p, NOW, &mut rng);
        for _ in 0..500 {
            let (next, outcome) = state.tick(&BotConfig::default(), &p, &mut rng);
            assert!(outcome.signal.is_none());
            assert!(outcome.trade.is_none());
            state = next;
        }
        assert!(state.trades().is_empty());
        assert_eq!(state.statistics(), &Statistics::default());
    }

    #[test]
    fn enabled_bot_alternates_sides() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = params();
        let config = enabled();
        let mut state = SimulationState::bootstrap(&p, NOW, &mut rng);
        for _ in 0..2_000 {
            state = state.tick(&config, &p, &mut rng).0;
        }
        let trades = state.trades().to_vec();
        assert!(!trades.is_empty(), "expected the walk to trigger trades");
        for pair in trades.windows(2) {
            assert_ne!(pair[0].side, pair[1].side);
        }
        for t in &trades {
            assert_eq!(t.profit.is_some(), t.side == Side::Sell);
        }
        assert!(state.trades().len() <= 50);
        assert!(state.series().len() <= 100);
    }

    #[test]
    fn trade_is_booked_at_sample_price_and_time() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = params();
        let config = enabled();
        let mut state = SimulationState::bootstrap(&p, NOW, &mut rng);
        for _ in 0..2_000 {
            let (next, outcome) = state.tick(&config, &p, &mut rng);
            state = next;
            if let Some(trade) = outcome.trade {
                let signal = outcome.signal.unwrap();
                assert_eq!(trade.price, outcome.sample.price);
                assert_eq!(trade.price, signal.price);
                assert_eq!(trade.timestamp, outcome.sample.timestamp);
                return;
            }
        }
        panic!("no trade in 2000 ticks");
    }

    #[test]
    fn empty_state_ticks_from_base_price() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = SimulationParams {
            tick_volatility: 0.0,
            ..params()
        };
        let (state, outcome) = SimulationState::new(&p).tick(&enabled(), &p, &mut rng);
        assert!((outcome.sample.price - 45_000.0).abs() < f64::EPSILON);
        assert_eq!(state.series().len(), 1);
        assert!(outcome.signal.is_none());
    }
}
