//! Synthetic price feed: a multiplicative random walk.
//!
//! `p[i] = p[i-1] * (1 + u)`, with `u` drawn uniformly from
//! `[-volatility, +volatility]`. Prices are rounded to cents when generated,
//! so every downstream calculation sees the rounded value.

use rand::Rng;

use crate::domain::sample::{round_to, PriceSample};

pub const PRICE_DECIMALS: i32 = 2;

/// Lowest price the walk may produce.
pub const MIN_PRICE: f64 = 0.01;

/// Upper bound (exclusive) on per-step volatility.
const MAX_VOLATILITY: f64 = 0.999;

/// Generate `count` samples continuing from `last_price`.
///
/// The first generated sample is stamped `start_timestamp`; each following
/// one is `step_ms` later. Indicator fields are left empty.
pub fn extend<R: Rng + ?Sized>(
    last_price: f64,
    start_timestamp: i64,
    step_ms: i64,
    volatility: f64,
    count: usize,
    rng: &mut R,
) -> Vec<PriceSample> {
    let mut price = last_price;
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        let timestamp = start_timestamp.saturating_add((i as i64).saturating_mul(step_ms));
        let sample = next_sample(price, timestamp, volatility, rng);
        price = sample.price;
        samples.push(sample);
    }

    samples
}

/// A single step of the walk stamped `timestamp`.
pub fn next_sample<R: Rng + ?Sized>(
    last_price: f64,
    timestamp: i64,
    volatility: f64,
    rng: &mut R,
) -> PriceSample {
    let volatility = volatility.clamp(0.0, MAX_VOLATILITY);
    let change = if volatility > 0.0 {
        rng.gen_range(-volatility..=volatility)
    } else {
        0.0
    };
    PriceSample::new(timestamp, next_price(last_price.max(MIN_PRICE), change))
}

/// One step of the walk, rounded and floored.
pub fn next_price(price: f64, change: f64) -> f64 {
    round_to(price * (1.0 + change), PRICE_DECIMALS).max(MIN_PRICE)
}
