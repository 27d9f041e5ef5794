//! Terminal presentation: one line per trade (or per tick when verbose) and
//! a closing summary.

use std::io::Write;

use chrono::DateTime;

use crate::domain::error::TickbotError;
use crate::domain::sample::PriceSample;
use crate::domain::simulation::{SimulationState, TickOutcome};
use crate::domain::trade::Trade;
use crate::ports::snapshot_port::SnapshotPort;

/// Trades shown in the closing summary.
const RECENT_TRADES: usize = 10;

pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, or the raw millis when out of range.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub fn format_sample(sample: &PriceSample) -> String {
    format!(
        "{}  price {:>10.2}  fast {:>10}  slow {:>10}  rsi {:>6.2}",
        format_timestamp(sample.timestamp),
        sample.price,
        format_optional(sample.sma_fast),
        format_optional(sample.sma_slow),
        sample.rsi,
    )
}

pub fn format_trade(trade: &Trade) -> String {
    let profit = match trade.profit {
        Some(p) => format!("  profit {p:+.2}"),
        None => String::new(),
    };
    format!(
        "{} {}  {:<4} {} {:.6} @ {:.2} = {:.2}{}",
        trade.id,
        format_timestamp(trade.timestamp),
        trade.side,
        trade.symbol,
        trade.amount,
        trade.price,
        trade.notional(),
        profit,
    )
}

pub fn write_summary<W: Write>(out: &mut W, state: &SimulationState) -> std::io::Result<()> {
    let stats = state.statistics();
    writeln!(out, "\n=== Summary ===")?;
    writeln!(out, "Ticks:            {}", state.tick_count())?;
    if let Some(price) = state.current_price() {
        writeln!(out, "Last Price:       {price:.2}")?;
    }
    writeln!(out, "Total Trades:     {}", stats.total_trades)?;
    writeln!(
        out,
        "Closed Trades:    {} ({} won, {} lost)",
        stats.closed_trades,
        stats.winning_trades,
        stats.losing_trades()
    )?;
    writeln!(out, "Win Rate:         {:.1}%", stats.win_rate)?;
    writeln!(out, "Total Profit:     {:.2}", stats.total_profit)?;
    match state.open_position() {
        Some(entry) => writeln!(
            out,
            "Open Position:    {:.6} @ {:.2}",
            entry.amount, entry.price
        )?,
        None => writeln!(out, "Open Position:    none")?,
    }

    let trades = state.trades();
    if !trades.is_empty() {
        writeln!(out, "\n=== Recent Trades ===")?;
        let skip = trades.len().saturating_sub(RECENT_TRADES);
        for trade in trades.iter().skip(skip) {
            writeln!(out, "{}", format_trade(trade))?;
        }
    }
    Ok(())
}

impl<W: Write> SnapshotPort for ConsoleReporter<W> {
    fn on_tick(
        &mut self,
        _state: &SimulationState,
        outcome: &TickOutcome,
    ) -> Result<(), TickbotError> {
        if self.verbose {
            writeln!(self.out, "{}", format_sample(&outcome.sample))?;
        }
        if let Some(trade) = &outcome.trade {
            writeln!(self.out, "{}", format_trade(trade))?;
        }
        Ok(())
    }

    fn finish(&mut self, state: &SimulationState) -> Result<(), TickbotError> {
        write_summary(&mut self.out, state)?;
        self.out.flush()?;
        Ok(())
    }
}
