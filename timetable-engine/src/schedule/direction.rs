//! Canonical headsign per direction.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{DirectionId, Trip};

/// Running headsign tally for one direction, in first-seen order.
#[derive(Default)]
struct HeadsignTally<'a> {
    slots: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, usize)>,
}

impl<'a> HeadsignTally<'a> {
    fn add(&mut self, headsign: &'a str) {
        match self.slots.get(headsign) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(headsign, self.counts.len());
                self.counts.push((headsign, 1));
            }
        }
    }

    /// Most frequent headsign; the first seen wins a tie.
    fn mode(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &(headsign, count) in &self.counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((headsign, count));
            }
        }
        best.map(|(headsign, _)| headsign)
    }
}

/// Resolve the headsign to display for each direction of a route.
///
/// The canonical headsign is the one carried by the most trips in that
/// direction. Ties go to the headsign that appears first in input order, so
/// the result depends on trip order. Directions without trips are absent.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::{DirectionId, ServiceId, Trip, TripId};
/// use timetable_engine::schedule::resolve_headsigns;
///
/// let trip = |id: &str, dir, headsign: &str| {
///     Trip::new(TripId::new(id).unwrap(), dir, ServiceId::new("S").unwrap(), headsign, vec![])
///         .unwrap()
/// };
/// let trips = vec![
///     trip("1", DirectionId::ZERO, "Downtown"),
///     trip("2", DirectionId::ZERO, "State Fair"),
///     trip("3", DirectionId::ZERO, "State Fair"),
///     trip("4", DirectionId::ONE, "Northland"),
/// ];
///
/// let headsigns = resolve_headsigns(&trips);
/// assert_eq!(headsigns[&DirectionId::ZERO], "State Fair");
/// assert_eq!(headsigns[&DirectionId::ONE], "Northland");
/// ```
pub fn resolve_headsigns<'a, I>(trips: I) -> BTreeMap<DirectionId, String>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut tallies: BTreeMap<DirectionId, HeadsignTally<'a>> = BTreeMap::new();

    for trip in trips {
        tallies
            .entry(trip.direction)
            .or_default()
            .add(trip.headsign.as_str());
    }

    tallies
        .into_iter()
        .filter_map(|(direction, tally)| Some((direction, tally.mode()?.to_string())))
        .collect()
}
