//! Service × direction index.
//!
//! Two-level lookup from day type to direction to the trips a timetable
//! selection covers.

use std::collections::BTreeMap;

use tracing::debug;

use super::bucket::bucket_by_day_type;
use super::classify::ServiceDays;
use super::config::UnclassifiedServicePolicy;
use super::error::ScheduleError;
use crate::domain::{DayType, DirectionId, Trip};

/// Trips grouped by day type, then by direction.
///
/// Every leaf holds at least one trip; combinations without trips are not
/// present.
#[derive(Debug, Clone, Default)]
pub struct ServiceDirectionIndex<'a> {
    groups: BTreeMap<DayType, BTreeMap<DirectionId, Vec<&'a Trip>>>,
}

impl<'a> ServiceDirectionIndex<'a> {
    /// Bucket trips by day type and split each bucket by direction.
    ///
    /// Trip order within a leaf follows input order.
    pub fn build<I>(
        trips: I,
        service_days: &ServiceDays,
        policy: UnclassifiedServicePolicy,
    ) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = &'a Trip>,
    {
        let buckets = bucket_by_day_type(trips, service_days, policy)?;
        let mut groups = BTreeMap::new();

        for (day, day_trips) in buckets {
            let mut by_direction: BTreeMap<DirectionId, Vec<&'a Trip>> = BTreeMap::new();
            for trip in day_trips {
                by_direction.entry(trip.direction).or_default().push(trip);
            }
            debug!(
                day = %day,
                directions = by_direction.len(),
                "indexed day type"
            );
            groups.insert(day, by_direction);
        }

        Ok(Self { groups })
    }

    /// Trips for one day type and direction.
    pub fn get(&self, day: DayType, direction: DirectionId) -> Option<&[&'a Trip]> {
        self.groups
            .get(&day)
            .and_then(|dirs| dirs.get(&direction))
            .map(|v| v.as_slice())
    }

    /// Day types with at least one trip, in weekday/saturday/sunday order.
    pub fn day_types(&self) -> impl Iterator<Item = DayType> + '_ {
        self.groups.keys().copied()
    }

    /// Directions running on a day type.
    pub fn directions(&self, day: DayType) -> impl Iterator<Item = DirectionId> + '_ {
        self.groups
            .get(&day)
            .into_iter()
            .flat_map(|dirs| dirs.keys().copied())
    }

    /// The full day type → direction → trips mapping.
    pub fn as_map(&self) -> &BTreeMap<DayType, BTreeMap<DirectionId, Vec<&'a Trip>>> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceCalendar, ServiceId, TripId};
    use crate::schedule::classify::classify_services;
    use chrono::Weekday;

    fn trip(id: &str, direction: DirectionId, service: &str) -> Trip {
        Trip::new(
            TripId::new(id).unwrap(),
            direction,
            ServiceId::new(service).unwrap(),
            "Downtown",
            vec![],
        )
        .unwrap()
    }

    fn service_days() -> ServiceDays {
        classify_services(&[
            ServiceCalendar::with_days(ServiceId::new("WK").unwrap(), &[Weekday::Mon]),
            ServiceCalendar::with_days(ServiceId::new("SAT").unwrap(), &[Weekday::Sat]),
        ])
        .unwrap()
    }

    fn ids<'a>(trips: Option<&[&'a Trip]>) -> Vec<&'a str> {
        trips
            .unwrap_or_default()
            .iter()
            .map(|t| t.id.as_str())
            .collect()
    }

    #[test]
    fn splits_day_buckets_by_direction() {
        let trips = vec![
            trip("T1", DirectionId::ZERO, "WK"),
            trip("T2", DirectionId::ONE, "WK"),
            trip("T3", DirectionId::ZERO, "WK"),
            trip("T4", DirectionId::ONE, "SAT"),
        ];

        let index =
            ServiceDirectionIndex::build(&trips, &service_days(), UnclassifiedServicePolicy::Drop)
                .unwrap();

        assert_eq!(ids(index.get(DayType::Weekday, DirectionId::ZERO)), vec!["T1", "T3"]);
        assert_eq!(ids(index.get(DayType::Weekday, DirectionId::ONE)), vec!["T2"]);
        assert_eq!(ids(index.get(DayType::Saturday, DirectionId::ONE)), vec!["T4"]);
    }

    #[test]
    fn empty_leaves_are_omitted() {
        let trips = vec![trip("T1", DirectionId::ONE, "SAT")];

        let index =
            ServiceDirectionIndex::build(&trips, &service_days(), UnclassifiedServicePolicy::Drop)
                .unwrap();

        assert!(index.get(DayType::Saturday, DirectionId::ZERO).is_none());
        assert!(index.get(DayType::Weekday, DirectionId::ONE).is_none());
        assert_eq!(index.day_types().collect::<Vec<_>>(), vec![DayType::Saturday]);
        assert_eq!(
            index.directions(DayType::Saturday).collect::<Vec<_>>(),
            vec![DirectionId::ONE]
        );
        assert_eq!(index.directions(DayType::Sunday).count(), 0);

        for dirs in index.as_map().values() {
            assert!(dirs.values().all(|leaf| !leaf.is_empty()));
        }
    }

    #[test]
    fn policy_is_forwarded() {
        let trips = vec![trip("T1", DirectionId::ZERO, "MYSTERY")];

        let index =
            ServiceDirectionIndex::build(&trips, &service_days(), UnclassifiedServicePolicy::Drop)
                .unwrap();
        assert!(index.is_empty());

        let err = ServiceDirectionIndex::build(
            &trips,
            &service_days(),
            UnclassifiedServicePolicy::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::UnclassifiedService(_)));
    }
}
