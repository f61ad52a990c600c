//! Conversion helpers between SQLite column types and domain types.
//!
//! Money is stored as TEXT so no precision is lost in SQLite's REAL type.
//! Instants are stored as naive UTC timestamps.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use moneymap_core::errors::{Result, ValidationError};

/// Parses a stored money value, accepting scientific notation as a fallback.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            log::error!("Failed to parse {} '{}' as a decimal: {}", field_name, value, e);
            ValidationError::DecimalParse(e).into()
        })
}

pub fn to_naive_utc(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc()
}

pub fn from_naive_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}
