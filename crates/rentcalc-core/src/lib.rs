//! Buy-to-let investment calculations.
//!
//! Everything here is a pure function of an input snapshot: purchase costs
//! and transfer taxes, mortgage amortization, a year-by-year rental
//! projection after income tax, and the headline return metrics.
//! Missing inputs travel as `NaN` and count as zero in arithmetic, so
//! computations never fail; only [`validation`] reports errors.

pub mod error;
pub mod locale;
pub mod time_value;
pub mod types;

#[cfg(feature = "purchase")]
pub mod purchase;

#[cfg(feature = "rental")]
pub mod rental;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "analysis")]
pub mod validation;

pub use error::RentCalcError;
pub use types::*;

/// Standard result type for fallible rentcalc operations
pub type RentCalcResult<T> = Result<T, RentCalcError>;
