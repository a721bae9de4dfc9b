use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use log::LevelFilter;

use crate::toast::DEFAULT_TOAST_LIMIT;

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub seed_file: Option<PathBuf>,
    pub enforce_stock: bool,
    pub toast_limit: usize,
    pub log_level: LevelFilter,
    /// Overrides "today" for contest deadlines.
    pub contest_date: Option<NaiveDate>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            enforce_stock: false,
            toast_limit: DEFAULT_TOAST_LIMIT,
            log_level: LevelFilter::Info,
            contest_date: None,
        }
    }
}

impl PortalConfig {
    /// Reads `PORTAL_*` variables from the process environment. Call after the
    /// `.env` files have been loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seed_file = lookup("PORTAL_SEED_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        let enforce_stock = lookup("PORTAL_ENFORCE_STOCK")
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(defaults.enforce_stock);
        let toast_limit = lookup("PORTAL_TOAST_LIMIT")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(defaults.toast_limit)
            .clamp(1, 50);
        let log_level = lookup("PORTAL_LOG_LEVEL")
            .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);
        let contest_date = lookup("PORTAL_CONTEST_DATE")
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());

        Self {
            seed_file,
            enforce_stock,
            toast_limit,
            log_level,
            contest_date,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
