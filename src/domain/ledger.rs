//! Trade ledger: position sizing, profit attribution and the bounded log.

use crate::domain::bot_config::BotConfig;
use crate::domain::history::History;
use crate::domain::metrics::Statistics;
use crate::domain::sample::round_to;
use crate::domain::signal::Signal;
use crate::domain::trade::{Side, Trade, TradeId};

pub const AMOUNT_DECIMALS: i32 = 6;

/// `(capital * risk% / 100) / price`, rounded to 6 decimals.
pub fn position_size(config: &BotConfig, price: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    round_to(config.trade_budget() / price, AMOUNT_DECIMALS)
}

/// Build the trade for `signal`.
///
/// A sell closing a buy realises `(sell_price - buy_price) * buy_amount`;
/// size is fixed at entry. Sells record a profit of zero if no buy precedes them.
pub fn record(
    signal: &Signal,
    config: &BotConfig,
    last_trade: Option<&Trade>,
    id: TradeId,
    timestamp: i64,
) -> Trade {
    let profit = match signal.side {
        Side::Buy => None,
        Side::Sell => Some(match last_trade {
            Some(entry) if entry.is_buy() => (signal.price - entry.price) * entry.amount,
            _ => 0.0,
        }),
    };

    Trade {
        id,
        timestamp,
        symbol: config.symbol.clone(),
        side: signal.side,
        price: signal.price,
        amount: position_size(config, signal.price),
        profit,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeLedger {
    trades: History<Trade>,
    statistics: Statistics,
    next_id: u64,
}

impl TradeLedger {
    pub fn new(capacity: usize) -> Self {
        TradeLedger {
            trades: History::with_capacity(capacity),
            statistics: Statistics::default(),
            next_id: 1,
        }
    }

    pub fn trades(&self) -> &History<Trade> {
        &self.trades
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn last_trade(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// The open Buy, if any.
    pub fn open_position(&self) -> Option<&Trade> {
        self.last_trade().filter(|t| t.is_buy())
    }

    /// Record a trade for `signal`, evict past capacity, and recompute statistics.
    pub fn execute(&mut self, signal: &Signal, config: &BotConfig, timestamp: i64) -> Trade {
        let id = TradeId(self.next_id);
        self.next_id += 1;

        let trade = record(signal, config, self.last_trade(), id, timestamp);
        self.trades.push(trade.clone());
        self.statistics = Statistics::compute(self.trades.iter());
        trade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> BotConfig {
        BotConfig {
            capital: 10_000.0,
            risk_per_trade_pct: 2.0,
            enabled: true,
            ..BotConfig::default()
        }
    }

    fn buy(price: f64) -> Signal {
        Signal {
            side: Side::Buy,
            price,
        }
    }

    fn sell(price: f64) -> Signal {
        Signal {
            side: Side::Sell,
            price,
        }
    }

    #[test]
    fn position_size_rounds_to_six_places() {
        // 200 / 45123.45 = 0.0044322...
        assert_relative_eq!(position_size(&config(), 45_123.45), 0.004_432);
    }

    #[test]
    fn position_size_non_positive_price() {
        assert_eq!(position_size(&config(), 0.0), 0.0);
    }

    #[test]
    fn buy_has_no_profit() {
        let t = record(&buy(100.0), &config(), None, TradeId(1), 0);
        assert_eq!(t.side, Side::Buy);
        assert!(t.profit.is_none());
        assert_relative_eq!(t.amount, 2.0);
        assert_eq!(t.symbol, "BTC/USD");
    }

    #[test]
    fn sell_profit_uses_entry_amount() {
        let entry = Trade {
            id: TradeId(1),
            timestamp: 0,
            symbol: "BTC/USD".into(),
            side: Side::Buy,
            price: 100.0,
            amount: 1.0,
            profit: None,
        };
        let t = record(&sell(110.0), &config(), Some(&entry), TradeId(2), 1);
        assert_relative_eq!(t.profit.unwrap(), 10.0);
        // exit size is sized at the exit price, profit is not
        assert_relative_eq!(t.amount, round_to(200.0 / 110.0, 6));
    }

    #[test]
    fn sell_without_entry_has_zero_profit() {
        let t = record(&sell(110.0), &config(), None, TradeId(1), 0);
        assert_eq!(t.profit, Some(0.0));
    }

    #[test]
    fn ledger_assigns_increasing_ids() {
        let mut ledger = TradeLedger::new(50);
        let a = ledger.execute(&buy(100.0), &config(), 0);
        let b = ledger.execute(&sell(105.0), &config(), 1);
        assert_eq!(a.id, TradeId(1));
        assert_eq!(b.id, TradeId(2));
        assert!(b.id > a.id);
    }

    #[test]
    fn ledger_tracks_open_position() {
        let mut ledger = TradeLedger::new(50);
        assert!(ledger.open_position().is_none());
        ledger.execute(&buy(100.0), &config(), 0);
        assert!(ledger.open_position().is_some());
        ledger.execute(&sell(90.0), &config(), 1);
        assert!(ledger.open_position().is_none());
    }

    #[test]
    fn ledger_statistics_follow_log() {
        let mut ledger = TradeLedger::new(50);
        ledger.execute(&buy(100.0), &config(), 0);
        ledger.execute(&sell(110.0), &config(), 1);

        let stats = ledger.statistics();
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.closed_trades, 1);
        assert_relative_eq!(stats.win_rate, 100.0);
        // 2 units * 10
        assert_relative_eq!(stats.total_profit, 20.0);
    }

    #[test]
    fn ledger_evicts_oldest() {
        let mut ledger = TradeLedger::new(4);
        for i in 0..10 {
            let price = 100.0 + i as f64;
            let signal = if i % 2 == 0 { buy(price) } else { sell(price) };
            ledger.execute(&signal, &config(), i);
        }
        assert_eq!(ledger.trades().len(), 4);
        assert_eq!(ledger.trades().first().unwrap().id, TradeId(7));
        assert_eq!(ledger.last_trade().unwrap().id, TradeId(10));
        assert_eq!(ledger.statistics().total_trades, 4);
    }
}
