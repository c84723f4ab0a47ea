//! Trip types.
//!
//! A `Trip` is one scheduled vehicle journey: its service and direction, the
//! headsign shown to riders, and the ordered stops it visits with their
//! scheduled arrival times.

use super::error::DomainError;
use super::{DirectionId, ServiceId, ServiceTime, Stop, TripId};

/// A scheduled visit to a stop within a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedStop {
    pub stop: Stop,
    pub arrival: ServiceTime,
    /// True when the arrival is a published time rather than interpolated.
    pub timepoint: bool,
    /// GTFS `stop_sequence`; strictly increasing along a trip.
    pub sequence: u32,
}

impl TimedStop {
    pub fn new(stop: Stop, arrival: ServiceTime, timepoint: bool, sequence: u32) -> Self {
        Self {
            stop,
            arrival,
            timepoint,
            sequence,
        }
    }
}

/// A single scheduled vehicle journey.
///
/// Stop times are validated at construction: sequence numbers strictly
/// increase and arrival times never go backwards.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{
///     DirectionId, ServiceId, ServiceTime, Stop, StopId, TimedStop, Trip, TripId,
/// };
///
/// let stop = |id: &str| Stop::new(StopId::new(id).unwrap(), id);
/// let at = |s: &str| ServiceTime::parse(s).unwrap();
///
/// let trip = Trip::new(
///     TripId::new("T1").unwrap(),
///     DirectionId::ZERO,
///     ServiceId::new("WK").unwrap(),
///     "Downtown",
///     vec![
///         TimedStop::new(stop("A"), at("08:00:00"), true, 1),
///         TimedStop::new(stop("B"), at("08:05:00"), false, 2),
///         TimedStop::new(stop("C"), at("08:10:00"), true, 3),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(trip.timepoints().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: TripId,
    pub direction: DirectionId,
    pub service_id: ServiceId,
    pub headsign: String,
    stop_times: Vec<TimedStop>,
}

impl Trip {
    pub fn new(
        id: TripId,
        direction: DirectionId,
        service_id: ServiceId,
        headsign: impl Into<String>,
        stop_times: Vec<TimedStop>,
    ) -> Result<Self, DomainError> {
        for pair in stop_times.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.sequence <= prev.sequence {
                return Err(DomainError::SequenceNotIncreasing {
                    trip: id,
                    sequence: next.sequence,
                });
            }
            if next.arrival < prev.arrival {
                return Err(DomainError::ArrivalBeforePrevious {
                    trip: id,
                    sequence: next.sequence,
                });
            }
        }

        Ok(Self {
            id,
            direction,
            service_id,
            headsign: headsign.into(),
            stop_times,
        })
    }

    /// All stop visits in sequence order.
    pub fn stop_times(&self) -> &[TimedStop] {
        &self.stop_times
    }

    /// Stop visits with published times, in sequence order.
    pub fn timepoints(&self) -> impl Iterator<Item = &TimedStop> {
        self.stop_times.iter().filter(|st| st.timepoint)
    }

    /// Arrival at the first stop visited, if any.
    pub fn first_arrival(&self) -> Option<ServiceTime> {
        self.stop_times.first().map(|st| st.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    fn stop(id: &str) -> Stop {
        Stop::new(StopId::new(id).unwrap(), id)
    }

    fn at(s: &str) -> ServiceTime {
        ServiceTime::parse(s).unwrap()
    }

    fn make_trip(stop_times: Vec<TimedStop>) -> Result<Trip, DomainError> {
        Trip::new(
            TripId::new("T1").unwrap(),
            DirectionId::ZERO,
            ServiceId::new("WK").unwrap(),
            "Downtown",
            stop_times,
        )
    }

    #[test]
    fn accepts_ordered_stop_times() {
        let trip = make_trip(vec![
            TimedStop::new(stop("A"), at("08:00:00"), true, 1),
            TimedStop::new(stop("B"), at("08:00:00"), true, 2),
            TimedStop::new(stop("C"), at("08:10:00"), true, 5),
        ])
        .unwrap();

        assert_eq!(trip.stop_times().len(), 3);
        assert_eq!(trip.first_arrival(), Some(at("08:00:00")));
    }

    #[test]
    fn rejects_repeated_sequence() {
        let err = make_trip(vec![
            TimedStop::new(stop("A"), at("08:00:00"), true, 1),
            TimedStop::new(stop("B"), at("08:05:00"), true, 1),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            DomainError::SequenceNotIncreasing { sequence: 1, .. }
        ));
    }

    #[test]
    fn rejects_arrival_going_backwards() {
        let err = make_trip(vec![
            TimedStop::new(stop("A"), at("08:10:00"), true, 1),
            TimedStop::new(stop("B"), at("08:05:00"), true, 2),
        ])
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "trip T1: arrival at sequence 2 is earlier than the previous stop"
        );
    }

    #[test]
    fn empty_trip_is_valid() {
        let trip = make_trip(vec![]).unwrap();
        assert!(trip.first_arrival().is_none());
        assert_eq!(trip.timepoints().count(), 0);
    }

    #[test]
    fn timepoints_skip_interpolated_stops() {
        let trip = make_trip(vec![
            TimedStop::new(stop("A"), at("08:00:00"), true, 1),
            TimedStop::new(stop("B"), at("08:03:00"), false, 2),
            TimedStop::new(stop("C"), at("08:07:00"), true, 3),
        ])
        .unwrap();

        let ids: Vec<_> = trip.timepoints().map(|st| st.stop.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }
}
