//! Technical indicator implementations.
//!
//! - `sma`: Simple Moving Average
//! - `rsi`: simple-average Relative Strength Index
//!
//! Each indicator offers a full-series `calculate_*` and a `trailing_*`
//! that only computes the newest value. Both share the same arithmetic, so
//! the trailing value is bit-identical to the last element of the full
//! series over the same prices.

pub mod rsi;
pub mod sma;

use std::fmt;

use crate::domain::sample::{PriceSample, NEUTRAL_RSI};

pub const DEFAULT_SMA_FAST: usize = 20;
pub const DEFAULT_SMA_SLOW: usize = 50;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

/// Window lengths and RSI thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorParams {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            sma_fast: DEFAULT_SMA_FAST,
            sma_slow: DEFAULT_SMA_SLOW,
            rsi_period: DEFAULT_RSI_PERIOD,
            rsi_oversold: DEFAULT_RSI_OVERSOLD,
            rsi_overbought: DEFAULT_RSI_OVERBOUGHT,
        }
    }
}

impl IndicatorParams {
    pub fn indicators(&self) -> [IndicatorType; 3] {
        [
            IndicatorType::Sma(self.sma_fast),
            IndicatorType::Sma(self.sma_slow),
            IndicatorType::Rsi(self.rsi_period),
        ]
    }

    /// Samples needed before every indicator is defined.
    pub fn warmup(&self) -> usize {
        self.sma_fast.max(self.sma_slow).max(self.rsi_period + 1)
    }
}

/// Fill the indicator fields of the newest sample.
///
/// `prices` is the retained price history ending with `sample.price`.
pub fn annotate_latest(
    sample: PriceSample,
    prices: &[f64],
    params: &IndicatorParams,
) -> PriceSample {
    PriceSample {
        sma_fast: sma::trailing_sma(prices, params.sma_fast),
        sma_slow: sma::trailing_sma(prices, params.sma_slow),
        rsi: rsi::trailing_rsi(prices, params.rsi_period).unwrap_or(NEUTRAL_RSI),
        ..sample
    }
}

/// Recompute the indicator fields of every sample from scratch.
pub fn compute_indicators(samples: &[PriceSample], params: &IndicatorParams) -> Vec<PriceSample> {
    let prices: Vec<f64> = samples.iter().map(|s| s.price).collect();
    let fast = sma::calculate_sma(&prices, params.sma_fast);
    let slow = sma::calculate_sma(&prices, params.sma_slow);
    let rsi = rsi::calculate_rsi(&prices, params.rsi_period);

    samples
        .iter()
        .enumerate()
        .map(|(i, s)| PriceSample {
            sma_fast: fast[i],
            sma_slow: slow[i],
            rsi: rsi[i].unwrap_or(NEUTRAL_RSI),
            ..s.clone()
        })
        .collect()
}
