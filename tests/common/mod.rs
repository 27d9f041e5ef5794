#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tickbot::domain::bot_config::{BotConfig, SimulationParams};
use tickbot::domain::simulation::{SimulationState, TickOutcome};
use tickbot::domain::strategy::{SignalPolicy, Strategy};
use tickbot::domain::trade::{Side, Trade, TradeId};

/// Fixed bootstrap anchor so runs are reproducible.
pub const NOW: i64 = 1_700_000_000_000;

pub fn enabled_config(strategy: Strategy) -> BotConfig {
    BotConfig {
        strategy,
        enabled: true,
        ..BotConfig::default()
    }
}

pub fn params_with(policy: SignalPolicy) -> SimulationParams {
    SimulationParams {
        signal_policy: policy,
        ..SimulationParams::default()
    }
}

pub fn bootstrapped(params: &SimulationParams, seed: u64) -> (SimulationState, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let state = SimulationState::bootstrap(params, NOW, &mut rng);
    (state, rng)
}

/// Advance `n` ticks with a fixed config, collecting every outcome.
pub fn run_ticks(
    mut state: SimulationState,
    config: &BotConfig,
    params: &SimulationParams,
    rng: &mut StdRng,
    n: usize,
) -> (SimulationState, Vec<TickOutcome>) {
    let mut outcomes = Vec::with_capacity(n);
    for _ in 0..n {
        let (next, outcome) = state.tick(config, params, rng);
        state = next;
        outcomes.push(outcome);
    }
    (state, outcomes)
}

pub fn executed(outcomes: &[TickOutcome]) -> Vec<Trade> {
    outcomes.iter().filter_map(|o| o.trade.clone()).collect()
}

pub fn make_trade(id: u64, side: Side, price: f64, amount: f64, profit: Option<f64>) -> Trade {
    Trade {
        id: TradeId(id),
        timestamp: NOW + id as i64,
        symbol: "BTC/USD".to_string(),
        side,
        price,
        amount,
        profit,
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
