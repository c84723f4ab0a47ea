//! Day-type bucketing.

use std::collections::BTreeMap;

use tracing::debug;

use super::classify::ServiceDays;
use super::config::UnclassifiedServicePolicy;
use super::error::ScheduleError;
use crate::domain::{DayType, ServiceId, Trip};

/// Anything that runs under a GTFS service calendar.
pub trait Scheduled {
    fn service_id(&self) -> &ServiceId;
}

impl Scheduled for Trip {
    fn service_id(&self) -> &ServiceId {
        &self.service_id
    }
}

/// Group items by the day types their service runs on.
///
/// Input order is preserved within each bucket. An item whose service runs
/// on several day types lands in every matching bucket. Items whose service
/// is unclassified are dropped or rejected according to `policy`. Buckets
/// with no items are absent from the map.
pub fn bucket_by_day_type<'a, T, I>(
    items: I,
    service_days: &ServiceDays,
    policy: UnclassifiedServicePolicy,
) -> Result<BTreeMap<DayType, Vec<&'a T>>, ScheduleError>
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buckets: BTreeMap<DayType, Vec<&'a T>> = BTreeMap::new();
    let mut dropped = 0usize;

    for item in items {
        let Some(days) = service_days.get(item.service_id()) else {
            match policy {
                UnclassifiedServicePolicy::Drop => {
                    dropped += 1;
                    continue;
                }
                UnclassifiedServicePolicy::Reject => {
                    return Err(ScheduleError::UnclassifiedService(
                        item.service_id().clone(),
                    ));
                }
            }
        };

        for &day in days {
            buckets.entry(day).or_default().push(item);
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped items with unclassified service");
    }

    Ok(buckets)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{DirectionId, ServiceCalendar, TripId};
    use crate::schedule::classify::classify_services;
    use proptest::prelude::*;

    const SERVICES: [&str; 4] = ["A", "B", "C", "UNKNOWN"];

    proptest! {
        /// Each bucket holds exactly the classified trips carrying its label
        #[test]
        fn bucket_sizes_match_labels(
            calendars in prop::collection::vec(prop::array::uniform7(any::<bool>()), 3),
            services in prop::collection::vec(0usize..4, 0..40),
        ) {
            let calendars: Vec<_> = calendars
                .into_iter()
                .enumerate()
                .filter(|(_, flags)| flags.iter().any(|&f| f))
                .map(|(i, flags)| ServiceCalendar::new(ServiceId::new(SERVICES[i]).unwrap(), flags))
                .collect();
            let service_days = classify_services(&calendars).unwrap();

            let trips: Vec<Trip> = services
                .iter()
                .enumerate()
                .map(|(i, &s)| {
                    Trip::new(
                        TripId::new(format!("T{i}")).unwrap(),
                        DirectionId::ZERO,
                        ServiceId::new(SERVICES[s]).unwrap(),
                        "",
                        vec![],
                    )
                    .unwrap()
                })
                .collect();

            let buckets =
                bucket_by_day_type(&trips, &service_days, UnclassifiedServicePolicy::Drop).unwrap();

            for day in DayType::ALL {
                let expected = trips
                    .iter()
                    .filter(|t| service_days.get(&t.service_id).is_some_and(|d| d.contains(&day)))
                    .count();
                let actual = buckets.get(&day).map_or(0, |b| b.len());
                prop_assert_eq!(actual, expected);
                if let Some(bucket) = buckets.get(&day) {
                    prop_assert!(!bucket.is_empty());
                }
            }
        }
    }
}
