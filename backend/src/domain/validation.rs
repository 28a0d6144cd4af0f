//! Input checks applied before anything is written.
//!
//! Repositories store whatever they are given; every service validates its
//! `New*` and `*Patch` inputs with these helpers first. Patch fields that are
//! absent are not checked.

use shared::{parse_iso_date, DateRange};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("Date range starts after it ends: {start} > {end}")]
    InvertedRange { start: String, end: String },
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
    #[error("Useful life must be greater than zero years")]
    NonPositiveUsefulLife,
    #[error("Depreciation rate must be between 0 and 100 percent")]
    RateOutOfRange,
    #[error("Fiscal year start must be MM-DD, got {0:?}")]
    InvalidFiscalYearStart(String),
    #[error("Currency must be a three-letter code, got {0:?}")]
    InvalidCurrency(String),
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn date(field: &'static str, value: &str) -> ValidationResult {
    match parse_iso_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }),
    }
}

pub fn optional_date(field: &'static str, value: Option<&str>) -> ValidationResult {
    value.map_or(Ok(()), |value| date(field, value))
}

pub fn date_range(range: &DateRange) -> ValidationResult {
    date("start", &range.start)?;
    date("end", &range.end)?;
    if range.start > range.end {
        return Err(ValidationError::InvertedRange {
            start: range.start.clone(),
            end: range.end.clone(),
        });
    }
    Ok(())
}

pub fn non_empty(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// A finite, non-negative money amount, rate or quantity
pub fn amount(field: &'static str, value: f64) -> ValidationResult {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn optional_amount(field: &'static str, value: Option<f64>) -> ValidationResult {
    value.map_or(Ok(()), |value| amount(field, value))
}

pub fn useful_life(value: f64) -> ValidationResult {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NonPositiveUsefulLife);
    }
    Ok(())
}

pub fn depreciation_rate(value: f64) -> ValidationResult {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::RateOutOfRange);
    }
    Ok(())
}

pub fn fiscal_year_start(value: &str) -> ValidationResult {
    let invalid = || ValidationError::InvalidFiscalYearStart(value.to_string());
    if value.len() != 5 {
        return Err(invalid());
    }
    // 2024 is a leap year, so 02-29 is accepted
    parse_iso_date(&format!("2024-{value}"))
        .map(|_| ())
        .ok_or_else(invalid)
}

pub fn currency(value: &str) -> ValidationResult {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency(value.to_string()))
    }
}
