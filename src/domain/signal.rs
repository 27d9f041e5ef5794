//! Signal detection over the two most recent samples.
//!
//! - bullish crossover: prev fast <= prev slow and latest fast > latest slow
//! - bearish crossover: prev fast >= prev slow and latest fast < latest slow
//! - oversold: latest RSI below the oversold threshold
//! - overbought: latest RSI above the overbought threshold
//!
//! Buy needs a bullish trigger while flat. Sell needs a bearish trigger while
//! a Buy is open. Which triggers count is decided by the [`SignalPolicy`].

use crate::domain::history::History;
use crate::domain::indicator::IndicatorParams;
use crate::domain::sample::PriceSample;
use crate::domain::strategy::{SignalPolicy, Strategy};
use crate::domain::trade::{Side, Trade};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub side: Side,
    pub price: f64,
}

/// Predicates derived from the last two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Triggers {
    pub bullish_crossover: bool,
    pub bearish_crossover: bool,
    pub oversold: bool,
    pub overbought: bool,
}

impl Triggers {
    /// `None` unless both samples carry fast and slow moving averages.
    pub fn detect(
        prev: &PriceSample,
        latest: &PriceSample,
        params: &IndicatorParams,
    ) -> Option<Self> {
        let (prev_fast, prev_slow) = prev.moving_averages()?;
        let (fast, slow) = latest.moving_averages()?;

        Some(Triggers {
            bullish_crossover: prev_fast <= prev_slow && fast > slow,
            bearish_crossover: prev_fast >= prev_slow && fast < slow,
            oversold: latest.rsi < params.rsi_oversold,
            overbought: latest.rsi > params.rsi_overbought,
        })
    }

    pub fn entry(&self, use_crossover: bool, use_rsi: bool) -> bool {
        (use_crossover && self.bullish_crossover) || (use_rsi && self.oversold)
    }

    pub fn exit(&self, use_crossover: bool, use_rsi: bool) -> bool {
        (use_crossover && self.bearish_crossover) || (use_rsi && self.overbought)
    }
}

/// Decide whether to open or close a position at the latest price.
pub fn evaluate(
    series: &History<PriceSample>,
    last_trade: Option<&Trade>,
    strategy: Strategy,
    policy: SignalPolicy,
    params: &IndicatorParams,
) -> Option<Signal> {
    let (prev, latest) = series.last_pair()?;
    let triggers = Triggers::detect(prev, latest, params)?;
    let (use_crossover, use_rsi) = policy.triggers(strategy);

    let flat = last_trade.is_none_or(Trade::is_sell);
    let open = last_trade.is_some_and(Trade::is_buy);

    if triggers.entry(use_crossover, use_rsi) && flat {
        Some(Signal {
            side: Side::Buy,
            price: latest.price,
        })
    } else if triggers.exit(use_crossover, use_rsi) && open {
        Some(Signal {
            side: Side::Sell,
            price: latest.price,
        })
    } else {
        None
    }
}
