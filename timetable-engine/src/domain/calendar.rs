//! Weekly service calendars and day types.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use super::ServiceId;

/// A GTFS `calendar.txt` row: the weekdays on which a service operates.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use timetable_engine::domain::{ServiceCalendar, ServiceId};
///
/// let cal = ServiceCalendar::with_days(
///     ServiceId::new("WKND").unwrap(),
///     &[Weekday::Sat, Weekday::Sun],
/// );
/// assert!(cal.runs_on(Weekday::Sat));
/// assert!(!cal.runs_on(Weekday::Mon));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCalendar {
    pub service_id: ServiceId,
    /// Operating flags indexed Monday (0) through Sunday (6).
    days: [bool; 7],
}

impl ServiceCalendar {
    /// Create a calendar from Monday-first operating flags.
    pub fn new(service_id: ServiceId, days: [bool; 7]) -> Self {
        Self { service_id, days }
    }

    /// Create a calendar that runs on exactly the given weekdays.
    pub fn with_days(service_id: ServiceId, weekdays: &[Weekday]) -> Self {
        let mut days = [false; 7];
        for day in weekdays {
            days[day.num_days_from_monday() as usize] = true;
        }
        Self { service_id, days }
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// True if no operating day is flagged.
    pub fn is_empty(&self) -> bool {
        !self.days.iter().any(|&d| d)
    }
}

/// Coarse operating-pattern label shown in the day picker.
///
/// Ordered weekday, saturday, sunday so map keys list in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::Sunday];

    /// The day type a calendar weekday belongs to.
    pub fn of(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown day type label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day type {0:?}: expected weekday, saturday or sunday")]
pub struct InvalidDayType(String);

impl FromStr for DayType {
    type Err = InvalidDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weekday" => Ok(DayType::Weekday),
            "saturday" => Ok(DayType::Saturday),
            "sunday" => Ok(DayType::Sunday),
            _ => Err(InvalidDayType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid() -> ServiceId {
        ServiceId::new("S").unwrap()
    }

    #[test]
    fn flags_index_from_monday() {
        let cal = ServiceCalendar::new(sid(), [true, false, false, false, false, false, true]);
        assert!(cal.runs_on(Weekday::Mon));
        assert!(!cal.runs_on(Weekday::Tue));
        assert!(cal.runs_on(Weekday::Sun));
        assert!(!cal.is_empty());
    }

    #[test]
    fn empty_calendar() {
        assert!(ServiceCalendar::new(sid(), [false; 7]).is_empty());
        assert!(ServiceCalendar::with_days(sid(), &[]).is_empty());
    }

    #[test]
    fn day_type_of_weekday() {
        assert_eq!(DayType::of(Weekday::Mon), DayType::Weekday);
        assert_eq!(DayType::of(Weekday::Fri), DayType::Weekday);
        assert_eq!(DayType::of(Weekday::Sat), DayType::Saturday);
        assert_eq!(DayType::of(Weekday::Sun), DayType::Sunday);
    }

    #[test]
    fn day_type_ordering() {
        let mut days = vec![DayType::Sunday, DayType::Weekday, DayType::Saturday];
        days.sort();
        assert_eq!(days, DayType::ALL.to_vec());
    }

    #[test]
    fn day_type_parse_and_display() {
        for day in DayType::ALL {
            assert_eq!(day.to_string().parse::<DayType>().unwrap(), day);
        }
        assert_eq!("Saturday".parse::<DayType>().unwrap(), DayType::Saturday);
        assert!("holiday".parse::<DayType>().is_err());
    }
}
