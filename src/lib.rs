//! BNPL Protocol APR & Revenue Simulator
//!
//! This library provides:
//! - A fixed parameter set describing pool size, utilization, loan terms,
//!   fee rates, and risk assumptions, with built-in defaults
//! - Field-by-field `key=value` overrides for the scalar parameters
//! - A closed-form model deriving annual loan volume, the three fee revenue
//!   totals, their split across LP yield / treasury / insurance fund /
//!   liquidators, and the resulting LP APR
//! - Text and JSON rendering of the resulting report

pub mod error;
pub mod model;
pub mod params;
pub mod report;

// Re-export commonly used types
pub use error::{ModelError, OverrideError, ValidationError};
pub use model::{simulate, Report};
pub use params::{LiquidationSplit, SimulationParams, ThreeWaySplit};
