//! Schedule engine error types.

use crate::domain::{ServiceId, TimeError};

/// Errors raised by the schedule transformations.
///
/// All are local, synchronous failures on in-memory input; retrying with
/// the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A calendar record flags no operating day at all
    #[error("service {0} has no operating days")]
    InvalidCalendar(ServiceId),

    /// The timetable aligner was given no trips
    #[error("cannot build a timetable from an empty trip set")]
    EmptyTripSet,

    /// A time value is out of range
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// A trip references a service with no calendar, under the reject policy
    #[error("trip service {0} has no calendar")]
    UnclassifiedService(ServiceId),
}
