//! Price sample representation.

/// Neutral RSI reported before enough history exists.
pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: f64,
}

impl PriceSample {
    /// A bare sample with no indicator history behind it.
    pub fn new(timestamp: i64, price: f64) -> Self {
        PriceSample {
            timestamp,
            price,
            sma_fast: None,
            sma_slow: None,
            rsi: NEUTRAL_RSI,
        }
    }

    /// Both moving averages as `(fast, slow)`, if both are defined.
    pub fn moving_averages(&self) -> Option<(f64, f64)> {
        Some((self.sma_fast?, self.sma_slow?))
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
