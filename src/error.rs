//! Error taxonomy for overrides, validation, and the model itself

use thiserror::Error;

/// Errors raised while applying `key=value` parameter overrides
///
/// Unknown keys are not errors; they are logged and skipped so the remaining
/// overrides still apply.
#[derive(Debug, Error, PartialEq)]
pub enum OverrideError {
    /// Argument did not contain a `=` separator
    #[error("invalid argument format '{0}', expected key=value")]
    BadFormat(String),

    /// Value for a known numeric field failed to parse as a number
    #[error("invalid numeric value '{value}' for parameter '{key}'")]
    BadValue { key: String, value: String },
}

/// Degenerate inputs that would otherwise divide by zero
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// Loan cycles per year is 365 / loan_term_days
    #[error("loan_term_days is zero, loan cycles per year is undefined")]
    ZeroLoanTerm,

    /// LP APR is lp_revenue / total_liquidity
    #[error("total_liquidity is zero, LP APR is undefined")]
    ZeroLiquidity,
}

/// Violations reported only under strict validation (`--strict`)
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [0, 1]")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("{dist} shares sum to {sum}, expected 1.0")]
    UnbalancedDistribution { dist: &'static str, sum: f64 },
}
