//! Route stop lists.
//!
//! The route page draws each direction as a line of stops taken from one
//! representative trip, the longest one running in that direction.

use std::collections::BTreeMap;

use crate::domain::{DirectionId, TimedStop, Trip};

/// The trip with the most stops in each direction.
///
/// Ties go to the earliest trip in input order.
pub fn longest_trips<'a, I>(trips: I) -> BTreeMap<DirectionId, &'a Trip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut longest: BTreeMap<DirectionId, &'a Trip> = BTreeMap::new();

    for trip in trips {
        longest
            .entry(trip.direction)
            .and_modify(|best| {
                if trip.stop_times().len() > best.stop_times().len() {
                    *best = trip;
                }
            })
            .or_insert(trip);
    }

    longest
}

/// The first trip running in `direction`.
pub fn model_trip<'a, I>(trips: I, direction: DirectionId) -> Option<&'a Trip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    trips.into_iter().find(|t| t.direction == direction)
}

/// Stops a trip visits, optionally only its published timepoints.
pub fn stop_list(trip: &Trip, timepoints_only: bool) -> Vec<&TimedStop> {
    trip.stop_times()
        .iter()
        .filter(|st| !timepoints_only || st.timepoint)
        .collect()
}
