//! RSI (Relative Strength Index), simple-average variant.
//!
//! Over the last n price changes:
//! - avg_gain = sum(positive changes) / n
//! - avg_loss = sum(|negative changes|) / n
//!
//! Both averages divide by n, not by the number of up or down moves, and
//! there is no Wilder smoothing between samples.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n samples have no value (need n changes).

/// RSI over the last `period` changes, or `None` with fewer than `period + 1` prices.
pub fn trailing_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let window = &prices[prices.len() - period - 1..];
    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains += change;
        } else if change < 0.0 {
            losses += -change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    };
    Some(rsi)
}

/// RSI at every index of `prices`.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..prices.len())
        .map(|i| trailing_rsi(&prices[..=i], period))
        .collect()
}
