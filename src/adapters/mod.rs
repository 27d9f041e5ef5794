//! Concrete adapter implementations for ports.

pub mod clock;
pub mod console_adapter;
pub mod csv_export;
pub mod file_config_adapter;
