//! Configuration loading and validation.
//!
//! Reads the `[bot]`, `[simulation]` and `[indicators]` sections through a
//! [`ConfigPort`] and checks every value before a run starts. Missing keys
//! take their defaults; values that are present but unusable are errors.

use tracing::warn;

use crate::domain::bot_config::{
    BotConfig, SimulationParams, MAX_BOOTSTRAP_SAMPLES, MAX_CAPITAL, MAX_RISK_PCT, MAX_STEP_MS,
    MIN_CAPITAL, MIN_RISK_PCT,
};
use crate::domain::error::TickbotError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::strategy::{SignalPolicy, Strategy};
use crate::ports::config_port::ConfigPort;

const BOT: &str = "bot";
const SIMULATION: &str = "simulation";
const INDICATORS: &str = "indicators";

/// Load and validate the `[bot]` section.
pub fn load_bot_config(config: &dyn ConfigPort) -> Result<BotConfig, TickbotError> {
    if !config.has_section(BOT) {
        return Err(TickbotError::ConfigMissing {
            section: BOT.to_string(),
            key: "symbol".to_string(),
        });
    }
    let defaults = BotConfig::default();

    let symbol = match config.get_string(BOT, "symbol") {
        Some(s) => s.trim().to_string(),
        None => {
            return Err(TickbotError::ConfigMissing {
                section: BOT.to_string(),
                key: "symbol".to_string(),
            })
        }
    };

    let strategy = match config.get_string(BOT, "strategy") {
        Some(s) => s
            .parse::<Strategy>()
            .map_err(|e| TickbotError::invalid(BOT, "strategy", e.to_string()))?,
        None => defaults.strategy,
    };

    let bot = BotConfig {
        symbol,
        strategy,
        enabled: read_bool(config, BOT, "enabled", defaults.enabled),
        capital: read_double(config, BOT, "capital", defaults.capital),
        risk_per_trade_pct: read_double(config, BOT, "risk_per_trade", defaults.risk_per_trade_pct),
    };
    validate_bot_config(&bot)?;
    Ok(bot)
}

/// Range checks for a [`BotConfig`], wherever it came from.
pub fn validate_bot_config(bot: &BotConfig) -> Result<(), TickbotError> {
    if bot.symbol.trim().is_empty() {
        return Err(TickbotError::invalid(BOT, "symbol", "symbol must not be empty"));
    }
    if !(MIN_CAPITAL..=MAX_CAPITAL).contains(&bot.capital) {
        return Err(TickbotError::invalid(
            BOT,
            "capital",
            format!("capital must be between {MIN_CAPITAL} and {MAX_CAPITAL}"),
        ));
    }
    if !(MIN_RISK_PCT..=MAX_RISK_PCT).contains(&bot.risk_per_trade_pct) {
        return Err(TickbotError::invalid(
            BOT,
            "risk_per_trade",
            format!("risk_per_trade must be between {MIN_RISK_PCT} and {MAX_RISK_PCT}"),
        ));
    }
    Ok(())
}

/// Load and validate `[simulation]` and `[indicators]`; both are optional.
pub fn load_simulation_params(config: &dyn ConfigPort) -> Result<SimulationParams, TickbotError> {
    let d = SimulationParams::default();

    let seed = match config.get_string(SIMULATION, "seed") {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
            TickbotError::invalid(SIMULATION, "seed", "seed must be a non-negative integer")
        })?),
        None => None,
    };

    let signal_policy = match config.get_string(SIMULATION, "signal_policy") {
        Some(raw) => raw
            .parse::<SignalPolicy>()
            .map_err(|reason| TickbotError::invalid(SIMULATION, "signal_policy", reason))?,
        None => d.signal_policy,
    };

    let params = SimulationParams {
        base_price: read_double(config, SIMULATION, "base_price", d.base_price),
        seed,
        tick_interval_ms: positive(config, SIMULATION, "tick_interval_ms", d.tick_interval_ms as i64)?
            as u64,
        bootstrap_samples: positive(
            config,
            SIMULATION,
            "bootstrap_samples",
            d.bootstrap_samples as i64,
        )? as usize,
        bootstrap_step_ms: positive(config, SIMULATION, "bootstrap_step_ms", d.bootstrap_step_ms)?,
        bootstrap_volatility: read_double(
            config,
            SIMULATION,
            "bootstrap_volatility",
            d.bootstrap_volatility,
        ),
        tick_volatility: read_double(config, SIMULATION, "tick_volatility", d.tick_volatility),
        series_capacity: positive(config, SIMULATION, "series_capacity", d.series_capacity as i64)?
            as usize,
        trade_capacity: positive(config, SIMULATION, "trade_capacity", d.trade_capacity as i64)?
            as usize,
        signal_policy,
        indicators: load_indicator_params(config, &d.indicators)?,
    };
    validate_simulation_params(&params)?;
    Ok(params)
}

fn load_indicator_params(
    config: &dyn ConfigPort,
    d: &IndicatorParams,
) -> Result<IndicatorParams, TickbotError> {
    Ok(IndicatorParams {
        sma_fast: positive(config, INDICATORS, "sma_fast", d.sma_fast as i64)? as usize,
        sma_slow: positive(config, INDICATORS, "sma_slow", d.sma_slow as i64)? as usize,
        rsi_period: positive(config, INDICATORS, "rsi_period", d.rsi_period as i64)? as usize,
        rsi_oversold: read_double(config, INDICATORS, "rsi_oversold", d.rsi_oversold),
        rsi_overbought: read_double(config, INDICATORS, "rsi_overbought", d.rsi_overbought),
    })
}

pub fn validate_simulation_params(params: &SimulationParams) -> Result<(), TickbotError> {
    if !(params.base_price.is_finite() && params.base_price > 0.0) {
        return Err(TickbotError::invalid(
            SIMULATION,
            "base_price",
            "base_price must be a finite positive number",
        ));
    }
    for (key, value) in [
        ("tick_interval_ms", params.tick_interval_ms as i128),
        ("bootstrap_step_ms", params.bootstrap_step_ms as i128),
    ] {
        if !(1..=MAX_STEP_MS as i128).contains(&value) {
            return Err(TickbotError::invalid(
                SIMULATION,
                key,
                format!("{key} must be between 1 and {MAX_STEP_MS}"),
            ));
        }
    }
    for (key, value) in [
        ("bootstrap_volatility", params.bootstrap_volatility),
        ("tick_volatility", params.tick_volatility),
    ] {
        if !(0.0..1.0).contains(&value) {
            return Err(TickbotError::invalid(
                SIMULATION,
                key,
                format!("{key} must be in [0, 1)"),
            ));
        }
    }
    if !(2..=MAX_BOOTSTRAP_SAMPLES).contains(&params.bootstrap_samples) {
        return Err(TickbotError::invalid(
            SIMULATION,
            "bootstrap_samples",
            format!("bootstrap_samples must be between 2 and {MAX_BOOTSTRAP_SAMPLES}"),
        ));
    }
    if params.series_capacity < 2 {
        return Err(TickbotError::invalid(
            SIMULATION,
            "series_capacity",
            "series_capacity must be at least 2",
        ));
    }
    validate_indicator_params(&params.indicators)?;

    let warmup = params.indicators.warmup();
    if params.series_capacity < warmup {
        warn!(
            series_capacity = params.series_capacity,
            warmup, "series capacity is shorter than the indicator warm-up; signals will never fire"
        );
    }
    Ok(())
}

pub fn validate_indicator_params(params: &IndicatorParams) -> Result<(), TickbotError> {
    if params.sma_fast >= params.sma_slow {
        return Err(TickbotError::invalid(
            INDICATORS,
            "sma_fast",
            "sma_fast must be shorter than sma_slow",
        ));
    }
    if !(0.0..=100.0).contains(&params.rsi_oversold)
        || !(0.0..=100.0).contains(&params.rsi_overbought)
    {
        return Err(TickbotError::invalid(
            INDICATORS,
            "rsi_oversold",
            "RSI thresholds must be between 0 and 100",
        ));
    }
    if params.rsi_oversold >= params.rsi_overbought {
        return Err(TickbotError::invalid(
            INDICATORS,
            "rsi_oversold",
            "rsi_oversold must be below rsi_overbought",
        ));
    }
    Ok(())
}

/// Integer key that must be at least 1.
fn positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, TickbotError> {
    let value = read_int(config, section, key, default);
    if value < 1 {
        return Err(TickbotError::invalid(
            section,
            key,
            format!("{key} must be at least 1"),
        ));
    }
    Ok(value)
}

fn read_int(config: &dyn ConfigPort, section: &str, key: &str, default: i64) -> i64 {
    let value = config.get_int(section, key, default);
    warn_if_unparsed(config, section, key, |raw| raw.parse::<i64>().is_ok());
    value
}

fn read_double(config: &dyn ConfigPort, section: &str, key: &str, default: f64) -> f64 {
    let value = config.get_double(section, key, default);
    warn_if_unparsed(config, section, key, |raw| raw.parse::<f64>().is_ok());
    value
}

fn read_bool(config: &dyn ConfigPort, section: &str, key: &str, default: bool) -> bool {
    let value = config.get_bool(section, key, default);
    warn_if_unparsed(config, section, key, |raw| {
        matches!(
            raw.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "1" | "0"
        )
    });
    value
}

fn warn_if_unparsed(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    parses: impl Fn(&str) -> bool,
) {
    if let Some(raw) = config.get_string(section, key)
        && !parses(raw.trim())
    {
        warn!(section, key, value = %raw, "unparseable config value, using default");
    }
}
