//! Core domain types and logic: price feed, indicators, signals, trades.

pub mod bot_config;
pub mod config_validation;
pub mod error;
pub mod generator;
pub mod history;
pub mod indicator;
pub mod ledger;
pub mod metrics;
pub mod sample;
pub mod signal;
pub mod simulation;
pub mod strategy;
pub mod trade;
