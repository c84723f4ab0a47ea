//! Timetable alignment.
//!
//! Trips on one route and direction often differ in which timepoints they
//! serve: branches, short turns, express runs. A timetable grid needs a
//! single set of columns, so the most common timepoint pattern becomes the
//! column layout and every trip is mapped onto it. Trips that serve stops
//! off the canonical pattern keep their row with those stops left out.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use super::error::ScheduleError;
use crate::domain::{ServiceTime, Stop, StopId, Trip};

/// A column header in the timetable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimetableColumn<'a> {
    /// Zero-based position in the grid.
    pub position: usize,
    pub stop: &'a Stop,
}

/// A trip's row in the timetable grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTrip<'a> {
    pub trip: &'a Trip,
    /// Arrival per column; `None` where the trip does not serve that stop.
    slots: Vec<Option<ServiceTime>>,
}

impl<'a> AlignedTrip<'a> {
    pub fn slots(&self) -> &[Option<ServiceTime>] {
        &self.slots
    }

    /// Arrival at the column in `position`, if the trip serves it.
    pub fn time_at(&self, position: usize) -> Option<ServiceTime> {
        self.slots.get(position).copied().flatten()
    }

    /// The leftmost filled column and its arrival.
    pub fn first_filled(&self) -> Option<(usize, ServiceTime)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(pos, slot)| slot.map(|t| (pos, t)))
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when every column has a time.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }
}

/// A display-ready timetable grid for one day type and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable<'a> {
    pub columns: Vec<TimetableColumn<'a>>,
    /// Rows ordered by arrival at their first filled column.
    pub trips: Vec<AlignedTrip<'a>>,
}

/// Pick the most frequent timepoint pattern.
///
/// Patterns are compared by exact stop-id sequence. On a tie the pattern of
/// the earliest trip in input order wins. A trip without timepoints votes
/// for the empty pattern, which yields no columns when it wins. Returns the
/// index of the trip that first carried the winner.
fn canonical_pattern_source(trips: &[&Trip]) -> Option<usize> {
    // pattern -> (votes, first trip index)
    let mut votes: HashMap<Vec<&StopId>, (usize, usize)> = HashMap::new();

    for (idx, trip) in trips.iter().enumerate() {
        let pattern: Vec<&StopId> = trip.timepoints().map(|tp| &tp.stop.id).collect();
        match votes.entry(pattern) {
            Entry::Occupied(mut e) => e.get_mut().0 += 1,
            Entry::Vacant(e) => {
                e.insert((1, idx));
            }
        }
    }

    let winner = votes
        .values()
        .copied()
        .max_by(|(a_votes, a_first), (b_votes, b_first)| {
            a_votes.cmp(b_votes).then(b_first.cmp(a_first))
        });

    if let Some((count, first)) = winner {
        debug!(
            patterns = votes.len(),
            votes = count,
            source_trip = %trips[first].id,
            "chose canonical timepoint pattern"
        );
    }

    winner.map(|(_, first)| first)
}

/// Align a set of trips onto their most representative stop pattern.
///
/// The trips should share one day type and direction. Only timepoint stops
/// take part. Fails with [`ScheduleError::EmptyTripSet`] if `trips` is
/// empty; individual trips never cause a failure.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{
///     DirectionId, ServiceId, ServiceTime, Stop, StopId, TimedStop, Trip, TripId,
/// };
/// use timetable_engine::schedule::align_timetable;
///
/// let trip = |id: &str, visits: &[(&str, &str)]| {
///     let stop_times = visits
///         .iter()
///         .enumerate()
///         .map(|(i, (stop, time))| {
///             TimedStop::new(
///                 Stop::new(StopId::new(*stop).unwrap(), *stop),
///                 ServiceTime::parse(time).unwrap(),
///                 true,
///                 i as u32,
///             )
///         })
///         .collect();
///     Trip::new(
///         TripId::new(id).unwrap(),
///         DirectionId::ZERO,
///         ServiceId::new("WK").unwrap(),
///         "",
///         stop_times,
///     )
///     .unwrap()
/// };
///
/// let trips = vec![
///     trip("late", &[("A", "09:00:00"), ("B", "09:10:00")]),
///     trip("early", &[("A", "08:00:00"), ("B", "08:10:00")]),
/// ];
///
/// let timetable = align_timetable(&trips).unwrap();
/// assert_eq!(timetable.columns.len(), 2);
/// assert_eq!(timetable.trips[0].trip.id.as_str(), "early");
/// ```
pub fn align_timetable<'a, I>(trips: I) -> Result<Timetable<'a>, ScheduleError>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let trips: Vec<&'a Trip> = trips.into_iter().collect();
    if trips.is_empty() {
        return Err(ScheduleError::EmptyTripSet);
    }

    let mut columns: Vec<TimetableColumn<'a>> = Vec::new();
    let mut positions: HashMap<&'a StopId, usize> = HashMap::new();

    if let Some(source) = canonical_pattern_source(&trips) {
        let source_trip: &'a Trip = trips[source];
        for tp in source_trip.timepoints() {
            // Loop routes revisit stops; only the first visit gets a column.
            if let Entry::Vacant(e) = positions.entry(&tp.stop.id) {
                let position = columns.len();
                e.insert(position);
                columns.push(TimetableColumn {
                    position,
                    stop: &tp.stop,
                });
            }
        }
    }

    let mut rows: Vec<AlignedTrip<'a>> = trips
        .iter()
        .map(|&trip| {
            let mut slots = vec![None; columns.len()];
            for tp in trip.timepoints() {
                match positions.get(&tp.stop.id) {
                    Some(&pos) => {
                        slots[pos].get_or_insert(tp.arrival);
                    }
                    None => trace!(
                        trip = %trip.id,
                        stop = %tp.stop.id,
                        "timepoint off canonical pattern"
                    ),
                }
            }
            AlignedTrip { trip, slots }
        })
        .collect();

    // Stable: equal first times and all-empty rows keep input order.
    rows.sort_by_key(|row| match row.first_filled() {
        Some((_, time)) => (false, time),
        None => (true, ServiceTime::default()),
    });

    Ok(Timetable {
        columns,
        trips: rows,
    })
}

#[cfg(test)]
#[path = "align_tests.rs"]
mod align_tests;
