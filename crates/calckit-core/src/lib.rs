pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "stocks")]
pub mod stocks;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "investments")]
pub mod investments;

#[cfg(feature = "travel")]
pub mod travel;

#[cfg(feature = "personal")]
pub mod personal;

pub use error::CalcError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
