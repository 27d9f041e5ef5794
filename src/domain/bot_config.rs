//! Bot configuration supplied by the presentation layer, plus the
//! simulation parameters that stay fixed for a run.

use crate::domain::indicator::IndicatorParams;
use crate::domain::strategy::{SignalPolicy, Strategy};

pub const MIN_CAPITAL: f64 = 1_000.0;
pub const MAX_CAPITAL: f64 = 100_000.0;
pub const MIN_RISK_PCT: f64 = 0.5;
pub const MAX_RISK_PCT: f64 = 10.0;
/// Longest tick or bootstrap step: one day.
pub const MAX_STEP_MS: i64 = 86_400_000;
pub const MAX_BOOTSTRAP_SAMPLES: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub symbol: String,
    pub strategy: Strategy,
    pub enabled: bool,
    pub capital: f64,
    pub risk_per_trade_pct: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            symbol: "BTC/USD".to_string(),
            strategy: Strategy::SmaCrossover,
            enabled: false,
            capital: 10_000.0,
            risk_per_trade_pct: 2.0,
        }
    }
}

impl BotConfig {
    /// Flip `enabled`. History is untouched; only trade evaluation is gated.
    #[must_use]
    pub fn toggled(self) -> Self {
        BotConfig {
            enabled: !self.enabled,
            ..self
        }
    }

    /// Capital committed per trade.
    pub fn trade_budget(&self) -> f64 {
        self.capital * self.risk_per_trade_pct / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub base_price: f64,
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
    pub bootstrap_samples: usize,
    pub bootstrap_step_ms: i64,
    pub bootstrap_volatility: f64,
    pub tick_volatility: f64,
    pub series_capacity: usize,
    pub trade_capacity: usize,
    pub signal_policy: SignalPolicy,
    pub indicators: IndicatorParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            base_price: 45_000.0,
            seed: None,
            tick_interval_ms: 3_000,
            bootstrap_samples: 100,
            bootstrap_step_ms: 60_000,
            bootstrap_volatility: 0.02,
            tick_volatility: 0.015,
            series_capacity: 100,
            trade_capacity: 50,
            signal_policy: SignalPolicy::Unified,
            indicators: IndicatorParams::default(),
        }
    }
}
