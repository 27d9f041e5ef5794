//! Aggregate trade statistics.
//!
//! Always recomputed from the full retained trade log, never updated
//! incrementally.

use crate::domain::sample::round_to;
use crate::domain::trade::Trade;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    pub total_trades: usize,
    /// Sells carrying a realised profit.
    pub closed_trades: usize,
    pub winning_trades: usize,
    /// Percentage in [0, 100], one decimal.
    pub win_rate: f64,
    /// Sum of realised profit, two decimals.
    pub total_profit: f64,
}

impl Statistics {
    pub fn compute<'a, I>(trades: I) -> Self
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        let mut total_trades = 0usize;
        let mut closed_trades = 0usize;
        let mut winning_trades = 0usize;
        let mut total_profit = 0.0_f64;

        for trade in trades {
            total_trades += 1;
            let Some(profit) = trade.profit.filter(|_| trade.is_sell()) else {
                continue;
            };
            closed_trades += 1;
            total_profit += profit;
            if profit > 0.0 {
                winning_trades += 1;
            }
        }

        let win_rate = if closed_trades > 0 {
            winning_trades as f64 / closed_trades as f64 * 100.0
        } else {
            0.0
        };

        Statistics {
            total_trades,
            closed_trades,
            winning_trades,
            win_rate: round_to(win_rate, 1),
            total_profit: round_to(total_profit, 2),
        }
    }

    pub fn losing_trades(&self) -> usize {
        self.closed_trades - self.winning_trades
    }
}
