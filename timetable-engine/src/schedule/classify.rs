//! Calendar classification.
//!
//! Maps each service to the coarse day types it runs on. A service counts
//! as a weekday service if it runs on *any* Monday-Friday, since the day
//! picker asks "does this run on weekdays", not "every weekday".

use std::collections::{BTreeSet, HashMap};

use chrono::Weekday;

use super::error::ScheduleError;
use crate::domain::{DayType, ServiceCalendar, ServiceId};

const WORKING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Day types per service, as produced by [`classify_services`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDays {
    days: HashMap<ServiceId, BTreeSet<DayType>>,
}

impl ServiceDays {
    /// Day types for a service, or `None` if it was never classified.
    pub fn get(&self, service_id: &ServiceId) -> Option<&BTreeSet<DayType>> {
        self.days.get(service_id)
    }

    pub fn contains(&self, service_id: &ServiceId) -> bool {
        self.days.contains_key(service_id)
    }

    /// Number of classified services.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &BTreeSet<DayType>)> {
        self.days.iter()
    }
}

/// Day types contributed by a single calendar record.
pub fn day_types_of(calendar: &ServiceCalendar) -> Result<BTreeSet<DayType>, ScheduleError> {
    if calendar.is_empty() {
        return Err(ScheduleError::InvalidCalendar(calendar.service_id.clone()));
    }

    let mut days = BTreeSet::new();
    if WORKING_DAYS.iter().any(|&d| calendar.runs_on(d)) {
        days.insert(DayType::Weekday);
    }
    if calendar.runs_on(Weekday::Sat) {
        days.insert(DayType::Saturday);
    }
    if calendar.runs_on(Weekday::Sun) {
        days.insert(DayType::Sunday);
    }
    Ok(days)
}

/// Classify every calendar record by day type.
///
/// Records sharing a service id are unioned. Fails on the first record that
/// flags no operating day.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use timetable_engine::domain::{DayType, ServiceCalendar, ServiceId};
/// use timetable_engine::schedule::classify_services;
///
/// let wknd = ServiceId::new("WKND").unwrap();
/// let cal = ServiceCalendar::with_days(wknd.clone(), &[Weekday::Sat, Weekday::Sun]);
///
/// let days = classify_services(&[cal]).unwrap();
/// let labels: Vec<_> = days.get(&wknd).unwrap().iter().copied().collect();
/// assert_eq!(labels, vec![DayType::Saturday, DayType::Sunday]);
/// ```
pub fn classify_services(calendars: &[ServiceCalendar]) -> Result<ServiceDays, ScheduleError> {
    let mut days: HashMap<ServiceId, BTreeSet<DayType>> = HashMap::new();

    for calendar in calendars {
        let labels = day_types_of(calendar)?;
        days.entry(calendar.service_id.clone())
            .or_default()
            .extend(labels);
    }

    Ok(ServiceDays { days })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any calendar with a flagged day gets at least one label, and
        /// each label is backed by a matching flag
        #[test]
        fn nonempty_calendar_is_labelled(flags in prop::array::uniform7(any::<bool>())) {
            let cal = ServiceCalendar::new(ServiceId::new("S").unwrap(), flags);
            match day_types_of(&cal) {
                Ok(days) => {
                    prop_assert!(flags.iter().any(|&f| f));
                    prop_assert!(!days.is_empty());
                    prop_assert_eq!(
                        days.contains(&DayType::Weekday),
                        flags[..5].iter().any(|&f| f)
                    );
                    prop_assert_eq!(days.contains(&DayType::Saturday), flags[5]);
                    prop_assert_eq!(days.contains(&DayType::Sunday), flags[6]);
                }
                Err(e) => {
                    prop_assert!(flags.iter().all(|&f| !f));
                    prop_assert!(
                        matches!(e, ScheduleError::InvalidCalendar(_)),
                        "unexpected error"
                    );
                }
            }
        }
    }
}
