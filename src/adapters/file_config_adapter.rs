//! INI file configuration adapter.
//!
//! Sections and keys are case-insensitive. Numbers go through `str::parse`
//! on the trimmed value, so the adapter and the validation warnings agree on
//! what counts as unparseable.

use std::path::Path;
use std::str::FromStr;

use configparser::ini::Ini;
use tracing::debug;

use crate::domain::error::TickbotError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    ini: Ini,
    source: String,
}

/// Boolean spellings accepted in config files.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TickbotError> {
        let source = path.as_ref().display().to_string();
        let mut ini = Ini::new();
        ini.load(path.as_ref())
            .map_err(|reason| TickbotError::ConfigParse {
                file: source.clone(),
                reason,
            })?;
        debug!(file = %source, sections = ?ini.sections(), "config loaded");
        Ok(Self { ini, source })
    }

    pub fn from_string(content: &str) -> Result<Self, TickbotError> {
        let source = "<string>".to_string();
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| TickbotError::ConfigParse {
                file: source.clone(),
                reason,
            })?;
        Ok(Self { ini, source })
    }

    /// Path the settings came from, or `<string>` for inline content.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn parsed<T: FromStr>(&self, section: &str, key: &str) -> Option<T> {
        self.get_string(section, key)?.trim().parse().ok()
    }
}

impl ConfigPort for FileConfigAdapter {
    fn has_section(&self, section: &str) -> bool {
        let wanted = section.to_lowercase();
        self.ini.sections().iter().any(|s| *s == wanted)
    }

    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.get_string(section, key)
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(default)
    }
}
