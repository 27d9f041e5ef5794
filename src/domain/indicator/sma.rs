//! Simple Moving Average.
//!
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Warmup: first (n-1) samples have no value.

/// SMA over the last `period` prices, or `None` with too little history.
pub fn trailing_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let window = &prices[prices.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// SMA at every index of `prices`.
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..prices.len())
        .map(|i| trailing_sma(&prices[..=i], period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn sma_warmup() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_eq!(series.len(), 5);
        assert!(series[0].is_none());
        assert!(series[1].is_none());
        assert!(series[2].is_some());
    }

    #[test]
    fn sma_known_values() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_relative_eq!(series[2].unwrap(), 20.0);
        assert_relative_eq!(series[3].unwrap(), 30.0);
        assert_relative_eq!(series[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_zero_period() {
        assert!(calculate_sma(&[1.0, 2.0], 0).iter().all(Option::is_none));
        assert!(trailing_sma(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn sma_empty() {
        assert!(calculate_sma(&[], 20).is_empty());
        assert!(trailing_sma(&[], 20).is_none());
    }

    #[test]
    fn constant_series_sma20() {
        let prices = vec![101.25; 60];
        let series = calculate_sma(&prices, 20);
        for (i, value) in series.iter().enumerate() {
            if i < 19 {
                assert!(value.is_none(), "index {i} should be warming up");
            } else {
                assert_relative_eq!(value.unwrap(), 101.25, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn trailing_matches_last_of_full() {
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0).collect();
        let full = calculate_sma(&prices, 50);
        assert_eq!(trailing_sma(&prices, 50), *full.last().unwrap());
    }

    proptest! {
        #[test]
        fn sma_is_mean_of_window(
            prices in proptest::collection::vec(0.01f64..100_000.0, 1..120),
            period in 1usize..60,
        ) {
            if let Some(sma) = trailing_sma(&prices, period) {
                let window = &prices[prices.len() - period..];
                let mean = window.iter().sum::<f64>() / period as f64;
                prop_assert_eq!(sma, mean);
                let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(sma >= lo - 1e-6 && sma <= hi + 1e-6);
            } else {
                prop_assert!(prices.len() < period);
            }
        }
    }
}
