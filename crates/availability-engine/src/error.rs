//! Error types for availability-engine operations.
//!
//! Unknown visits, mismatched caregivers and empty ranges are not errors; they
//! surface as empty results or no-op mutations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// The backing store could not serve the request.
    #[error("Visit store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
