//! Simulation parameters, built-in defaults, and command-line overrides

use serde::{Deserialize, Serialize};

use crate::error::{OverrideError, ValidationError};

/// Revenue split across LP yield, treasury, and insurance fund
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreeWaySplit {
    pub lp_yield: f64,
    pub treasury: f64,
    pub insurance_fund: f64,
}

impl ThreeWaySplit {
    /// Sum of all shares; 1.0 for a balanced split
    pub fn total(&self) -> f64 {
        self.lp_yield + self.treasury + self.insurance_fund
    }
}

/// Revenue split for liquidation penalties, with the liquidator incentive cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidationSplit {
    pub liquidator: f64,
    pub lp_yield: f64,
    pub treasury: f64,
    pub insurance_fund: f64,
}

impl LiquidationSplit {
    /// Sum of all shares; 1.0 for a balanced split
    pub fn total(&self) -> f64 {
        self.liquidator + self.lp_yield + self.treasury + self.insurance_fund
    }
}

/// Full parameter set for one simulation run
///
/// Created from `Default`, optionally mutated via [`apply_override`], then
/// passed immutably into [`crate::model::simulate`].
///
/// [`apply_override`]: SimulationParams::apply_override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    // Pool & loan configuration
    /// Total USDC in the liquidity pool
    pub total_liquidity: f64,
    /// Fraction of liquidity actively lent out
    pub utilization_ratio: f64,
    /// Average loan term in days
    pub loan_term_days: f64,

    // Fee rates
    /// Fee rate charged to the merchant per loan
    pub merchant_fee_rate: f64,
    /// Annualized interest rate applied to delinquent balances
    pub late_interest_apr: f64,
    /// Penalty rate on the outstanding debt upon liquidation
    pub liquidation_penalty_rate: f64,

    // Risk & behavior assumptions
    /// Fraction of annual loan volume that becomes delinquent
    pub delinquency_rate: f64,
    /// Fraction of delinquent volume that is liquidated
    pub liquidation_rate: f64,

    // Fee distribution ratios, each intended to sum to 1.0
    pub merchant_fee_dist: ThreeWaySplit,
    pub late_fee_dist: ThreeWaySplit,
    pub liquidation_penalty_dist: LiquidationSplit,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            total_liquidity: 1_000_000.0,
            utilization_ratio: 0.8,         // 80% of the pool lent out
            loan_term_days: 30.0,
            merchant_fee_rate: 0.015,       // 1.5% merchant fee
            late_interest_apr: 0.30,        // 30% APR on late balances
            liquidation_penalty_rate: 0.05, // 5% of outstanding debt
            delinquency_rate: 0.05,         // 5% of loans go late
            liquidation_rate: 0.10,         // 10% of late loans liquidated
            merchant_fee_dist: ThreeWaySplit {
                lp_yield: 0.7,
                treasury: 0.15,
                insurance_fund: 0.15,
            },
            late_fee_dist: ThreeWaySplit {
                lp_yield: 0.8,
                treasury: 0.1,
                insurance_fund: 0.1,
            },
            liquidation_penalty_dist: LiquidationSplit {
                liquidator: 0.5, // liquidator incentive
                lp_yield: 0.2,
                treasury: 0.15,
                insurance_fund: 0.15,
            },
        }
    }
}

impl SimulationParams {
    /// Mutable slot for a scalar field, by its override key
    ///
    /// The distribution splits are deliberately absent; only scalar fields
    /// are overridable from the command line.
    fn scalar_field_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "total_liquidity" => Some(&mut self.total_liquidity),
            "utilization_ratio" => Some(&mut self.utilization_ratio),
            "loan_term_days" => Some(&mut self.loan_term_days),
            "merchant_fee_rate" => Some(&mut self.merchant_fee_rate),
            "late_interest_apr" => Some(&mut self.late_interest_apr),
            "liquidation_penalty_rate" => Some(&mut self.liquidation_penalty_rate),
            "delinquency_rate" => Some(&mut self.delinquency_rate),
            "liquidation_rate" => Some(&mut self.liquidation_rate),
            _ => None,
        }
    }

    /// Apply a single `key=value` override
    ///
    /// An unknown or non-scalar key is logged as a warning and skipped; the
    /// value is not parsed in that case. A missing `=` or an unparsable value
    /// for a known field is an error.
    pub fn apply_override(&mut self, arg: &str) -> Result<(), OverrideError> {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| OverrideError::BadFormat(arg.to_string()))?;

        match self.scalar_field_mut(key) {
            Some(slot) => {
                *slot = value.parse().map_err(|_| OverrideError::BadValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            }
            None => log::warn!("ignoring invalid or non-numeric parameter '{}'", key),
        }
        Ok(())
    }

    /// Apply a sequence of overrides, stopping at the first malformed one
    pub fn apply_overrides<I, S>(&mut self, args: I) -> Result<(), OverrideError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.apply_override(arg.as_ref())?;
        }
        Ok(())
    }

    /// Opt-in strictness: rates in [0, 1] and balanced distributions
    ///
    /// The model itself never enforces these; out-of-range values flow
    /// through the arithmetic unchanged.
    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        let unit_rates = [
            ("utilization_ratio", self.utilization_ratio),
            ("delinquency_rate", self.delinquency_rate),
            ("liquidation_rate", self.liquidation_rate),
        ];
        for (field, value) in unit_rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::RateOutOfRange { field, value });
            }
        }

        let splits = [
            ("merchant_fee_dist", self.merchant_fee_dist.total()),
            ("late_fee_dist", self.late_fee_dist.total()),
            (
                "liquidation_penalty_dist",
                self.liquidation_penalty_dist.total(),
            ),
        ];
        for (dist, sum) in splits {
            if (sum - 1.0).abs() > 1e-9 {
                return Err(ValidationError::UnbalancedDistribution { dist, sum });
            }
        }
        Ok(())
    }
}
