use thiserror::Error;

/// Problems found in recipe input.
///
/// Every variant is a user-input problem: either a required free-text field
/// is empty, or a number breaks a brewing constraint. There is no internal
/// error class, and nothing here is fatal to the caller, which may correct
/// the offending field and resubmit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// A required free-text field is empty after trimming whitespace.
    #[error("{field} cannot be empty")]
    MissingField { field: String },

    /// The grain bill has no entries.
    #[error("the grain bill needs at least one grain")]
    EmptyGrainBill,

    /// The hop schedule has no entries.
    #[error("the hop schedule needs at least one addition")]
    EmptyHopSchedule,

    /// A quantity that must be strictly positive is zero or negative.
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: String, value: f64 },

    /// An amount that may be zero is negative.
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// A numeric field is NaN or infinite.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// Boil time outside the supported window.
    #[error("boil time must be between 30 and 120 minutes (got {minutes})")]
    BoilOutOfRange { minutes: u32 },

    /// A hop charge is scheduled for longer than the boil runs.
    #[error("hop '{name}' is scheduled at {time_min} min but the boil runs {boil_min} min")]
    HopAfterBoil {
        name: String,
        time_min: u32,
        boil_min: u32,
    },

    /// The ABV estimate needs the original gravity above the final gravity.
    #[error("original gravity ({og:.3}) must be greater than final gravity ({fg:.3})")]
    GravityInverted { og: f64, fg: f64 },
}
