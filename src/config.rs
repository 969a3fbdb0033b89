//! Calculation defaults and environment overrides
//!
//! Environment variables (all optional):
//!   FINCALC_DOWN_PAYMENT_FRACTION, FINCALC_LOAN_TENURE_YEARS, FINCALC_LOAN_RATE_PERCENT,
//!   FINCALC_MAX_EMI_INCOME_FRACTION, FINCALC_CURRENCY, FINCALC_GROUPS_FILE

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default down payment as a fraction of the vehicle cost
pub const DEFAULT_DOWN_PAYMENT_FRACTION: f64 = 0.20;

/// Default loan tenure in years
pub const DEFAULT_LOAN_TENURE_YEARS: u32 = 4;

/// Default annual loan rate in percent
pub const DEFAULT_LOAN_RATE_PERCENT: f64 = 9.0;

/// EMI may not exceed this share of monthly income
pub const DEFAULT_MAX_EMI_INCOME_FRACTION: f64 = 0.10;

pub const DEFAULT_CURRENCY: &str = "INR";

pub const DEFAULT_GROUPS_FILE: &str = "data/groups.json";

/// Defaults used when an optional calculator input is missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityDefaults {
    pub down_payment_fraction: f64,
    pub loan_tenure_years: u32,
    pub loan_rate_percent: f64,
    pub max_emi_income_fraction: f64,
}

impl Default for AffordabilityDefaults {
    fn default() -> Self {
        Self {
            down_payment_fraction: DEFAULT_DOWN_PAYMENT_FRACTION,
            loan_tenure_years: DEFAULT_LOAN_TENURE_YEARS,
            loan_rate_percent: DEFAULT_LOAN_RATE_PERCENT,
            max_emi_income_fraction: DEFAULT_MAX_EMI_INCOME_FRACTION,
        }
    }
}

/// Top-level configuration for the binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub affordability: AffordabilityDefaults,

    /// ISO currency code attached to balances
    pub currency: String,

    /// JSON document holding saved groups
    pub groups_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            affordability: AffordabilityDefaults::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            groups_file: PathBuf::from(DEFAULT_GROUPS_FILE),
        }
    }
}

impl Config {
    /// Built-in defaults overlaid with any `FINCALC_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let aff = &mut config.affordability;

        override_parsed(&lookup, "FINCALC_DOWN_PAYMENT_FRACTION", &mut aff.down_payment_fraction);
        override_parsed(&lookup, "FINCALC_LOAN_TENURE_YEARS", &mut aff.loan_tenure_years);
        override_parsed(&lookup, "FINCALC_LOAN_RATE_PERCENT", &mut aff.loan_rate_percent);
        override_parsed(&lookup, "FINCALC_MAX_EMI_INCOME_FRACTION", &mut aff.max_emi_income_fraction);

        if let Some(currency) = lookup("FINCALC_CURRENCY").filter(|c| !c.trim().is_empty()) {
            config.currency = currency.trim().to_uppercase();
        }
        if let Some(path) = lookup("FINCALC_GROUPS_FILE").filter(|p| !p.trim().is_empty()) {
            config.groups_file = PathBuf::from(path);
        }

        config
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("Ignoring {}={:?}: not a valid value, keeping {:?}", key, raw, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.affordability.loan_tenure_years, 4);
        assert!((config.affordability.down_payment_fraction - 0.2).abs() < 1e-12);
        assert_eq!(config.currency, "INR");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("FINCALC_LOAN_TENURE_YEARS", "5"),
            ("FINCALC_LOAN_RATE_PERCENT", " 8.5 "),
            ("FINCALC_CURRENCY", "usd"),
        ]));
        assert_eq!(config.affordability.loan_tenure_years, 5);
        assert!((config.affordability.loan_rate_percent - 8.5).abs() < 1e-12);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_unparseable_value_keeps_default() {
        let config = Config::from_lookup(lookup_from(&[("FINCALC_LOAN_TENURE_YEARS", "four")]));
        assert_eq!(config.affordability.loan_tenure_years, DEFAULT_LOAN_TENURE_YEARS);
    }
}
