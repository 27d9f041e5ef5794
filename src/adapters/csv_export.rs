//! CSV export of the retained price series and trade log.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::adapters::console_adapter::format_timestamp;
use crate::domain::error::TickbotError;
use crate::domain::history::History;
use crate::domain::sample::PriceSample;
use crate::domain::simulation::{SimulationState, TickOutcome};
use crate::domain::trade::{Side, Trade};
use crate::ports::snapshot_port::SnapshotPort;

pub const SERIES_FILE: &str = "prices.csv";
pub const TRADES_FILE: &str = "trades.csv";

#[derive(Debug, Serialize)]
struct SampleRow {
    timestamp: i64,
    time: String,
    price: f64,
    sma_fast: Option<f64>,
    sma_slow: Option<f64>,
    rsi: f64,
}

impl From<&PriceSample> for SampleRow {
    fn from(s: &PriceSample) -> Self {
        SampleRow {
            timestamp: s.timestamp,
            time: format_timestamp(s.timestamp),
            price: s.price,
            sma_fast: s.sma_fast,
            sma_slow: s.sma_slow,
            rsi: s.rsi,
        }
    }
}

#[derive(Debug, Serialize)]
struct TradeRow<'a> {
    id: String,
    timestamp: i64,
    time: String,
    symbol: &'a str,
    side: Side,
    price: f64,
    amount: f64,
    profit: Option<f64>,
}

impl<'a> From<&'a Trade> for TradeRow<'a> {
    fn from(t: &'a Trade) -> Self {
        TradeRow {
            id: t.id.to_string(),
            timestamp: t.timestamp,
            time: format_timestamp(t.timestamp),
            symbol: &t.symbol,
            side: t.side,
            price: t.price,
            amount: t.amount,
            profit: t.profit,
        }
    }
}

/// Writes `prices.csv` and `trades.csv` into a directory when the run ends.
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn series_path(&self) -> PathBuf {
        self.dir.join(SERIES_FILE)
    }

    pub fn trades_path(&self) -> PathBuf {
        self.dir.join(TRADES_FILE)
    }

    pub fn export(&self, state: &SimulationState) -> Result<(), TickbotError> {
        fs::create_dir_all(&self.dir).map_err(|e| TickbotError::Export {
            reason: format!("failed to create {}: {}", self.dir.display(), e),
        })?;
        write_series(&self.series_path(), state.series())?;
        write_trades(&self.trades_path(), state.trades())?;
        Ok(())
    }
}

pub fn write_series(path: &Path, series: &History<PriceSample>) -> Result<(), TickbotError> {
    let mut writer = csv::Writer::from_path(path)?;
    for sample in series {
        writer.serialize(SampleRow::from(sample))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_trades(path: &Path, trades: &History<Trade>) -> Result<(), TickbotError> {
    let mut writer = csv::Writer::from_path(path)?;
    if trades.is_empty() {
        // serde only emits headers alongside the first record
        writer.write_record([
            "id", "timestamp", "time", "symbol", "side", "price", "amount", "profit",
        ])?;
    }
    for trade in trades {
        writer.serialize(TradeRow::from(trade))?;
    }
    writer.flush()?;
    Ok(())
}

impl SnapshotPort for CsvExporter {
    fn on_tick(&mut self, _: &SimulationState, _: &TickOutcome) -> Result<(), TickbotError> {
        Ok(())
    }

    fn finish(&mut self, state: &SimulationState) -> Result<(), TickbotError> {
        self.export(state)
    }
}
