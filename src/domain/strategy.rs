//! Strategy selection and signal policy.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    SmaCrossover,
    Rsi,
    Combined,
}

impl Strategy {
    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::SmaCrossover => "SMA Crossover",
            Strategy::Rsi => "RSI Strategy",
            Strategy::Combined => "Combined Strategy",
        }
    }

    /// Whether moving-average crossovers may trigger a trade.
    pub fn uses_crossover(&self) -> bool {
        matches!(self, Strategy::SmaCrossover | Strategy::Combined)
    }

    /// Whether RSI extremes may trigger a trade.
    pub fn uses_rsi(&self) -> bool {
        matches!(self, Strategy::Rsi | Strategy::Combined)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected sma_crossover, rsi or combined)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "sma" | "smacrossover" => Ok(Strategy::SmaCrossover),
            "rsi" | "rsistrategy" => Ok(Strategy::Rsi),
            "combined" | "combinedstrategy" => Ok(Strategy::Combined),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// How the configured [`Strategy`] feeds into signal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalPolicy {
    /// Crossover and RSI triggers apply whatever strategy is selected.
    #[default]
    Unified,
    /// Each strategy only uses its own triggers.
    PerStrategy,
}

impl SignalPolicy {
    /// `(use_crossover, use_rsi)` for the given strategy.
    pub fn triggers(&self, strategy: Strategy) -> (bool, bool) {
        match self {
            SignalPolicy::Unified => (true, true),
            SignalPolicy::PerStrategy => (strategy.uses_crossover(), strategy.uses_rsi()),
        }
    }
}

impl FromStr for SignalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "unified" => Ok(SignalPolicy::Unified),
            "per_strategy" => Ok(SignalPolicy::PerStrategy),
            other => Err(format!(
                "unknown signal policy '{other}' (expected unified or per_strategy)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_keys() {
        assert_eq!("sma_crossover".parse::<Strategy>(), Ok(Strategy::SmaCrossover));
        assert_eq!("rsi".parse::<Strategy>(), Ok(Strategy::Rsi));
        assert_eq!("combined".parse::<Strategy>(), Ok(Strategy::Combined));
    }

    #[test]
    fn parse_display_names() {
        assert_eq!("SMA Crossover".parse::<Strategy>(), Ok(Strategy::SmaCrossover));
        assert_eq!("RSI Strategy".parse::<Strategy>(), Ok(Strategy::Rsi));
        assert_eq!("Combined Strategy".parse::<Strategy>(), Ok(Strategy::Combined));
    }

    #[test]
    fn parse_unknown() {
        let err = "momentum".parse::<Strategy>().unwrap_err();
        assert_eq!(err, UnknownStrategy("momentum".into()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in [Strategy::SmaCrossover, Strategy::Rsi, Strategy::Combined] {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    #[test]
    fn unified_policy_ignores_strategy() {
        for s in [Strategy::SmaCrossover, Strategy::Rsi, Strategy::Combined] {
            assert_eq!(SignalPolicy::Unified.triggers(s), (true, true));
        }
    }

    #[test]
    fn per_strategy_policy_dispatches() {
        let p = SignalPolicy::PerStrategy;
        assert_eq!(p.triggers(Strategy::SmaCrossover), (true, false));
        assert_eq!(p.triggers(Strategy::Rsi), (false, true));
        assert_eq!(p.triggers(Strategy::Combined), (true, true));
    }

    #[test]
    fn parse_signal_policy() {
        assert_eq!("unified".parse::<SignalPolicy>(), Ok(SignalPolicy::Unified));
        assert_eq!("per-strategy".parse::<SignalPolicy>(), Ok(SignalPolicy::PerStrategy));
        assert!("other".parse::<SignalPolicy>().is_err());
    }
}
