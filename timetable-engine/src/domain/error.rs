//! Domain error types.
//!
//! These errors represent records that violate the invariants of the domain
//! model. They are distinct from the schedule engine's errors.

use super::TripId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Stop sequence numbers must strictly increase along a trip
    #[error("trip {trip}: stop sequence {sequence} does not increase")]
    SequenceNotIncreasing { trip: TripId, sequence: u32 },

    /// Arrival times must not decrease along a trip
    #[error("trip {trip}: arrival at sequence {sequence} is earlier than the previous stop")]
    ArrivalBeforePrevious { trip: TripId, sequence: u32 },
}
