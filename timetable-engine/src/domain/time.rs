//! Service-day time handling.
//!
//! GTFS expresses stop times relative to the start of the service day, so a
//! trip that runs past midnight carries hours of 24 or more ("25:30:00").
//! `ServiceTime` keeps that relative value intact; conversion to a wall-clock
//! display happens in the formatter.

use std::fmt;

use chrono::NaiveTime;

/// Error returned for an out-of-range or unparseable time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u32 = 24 * SECS_PER_HOUR;

/// A time of day relative to the start of a service day.
///
/// Hours are unbounded above so that after-midnight service sorts after the
/// evening trips of the same service day.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::ServiceTime;
///
/// let late = ServiceTime::from_hms(25, 30, 0).unwrap();
/// let evening = ServiceTime::parse("23:45:00").unwrap();
/// assert!(evening < late);
/// assert_eq!(late.to_string(), "25:30:00");
///
/// assert!(ServiceTime::from_hms(8, 60, 0).is_err());
/// assert!(ServiceTime::from_hms(-1, 0, 0).is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTime {
    secs: u32,
}

impl ServiceTime {
    /// Build a time from its components.
    ///
    /// Hours must be non-negative; minutes and seconds must be 0-59.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Result<Self, TimeError> {
        if hours < 0 {
            return Err(TimeError::new("hours must not be negative"));
        }
        if !(0..60).contains(&minutes) {
            return Err(TimeError::new("minutes must be 0-59"));
        }
        if !(0..60).contains(&seconds) {
            return Err(TimeError::new("seconds must be 0-59"));
        }
        let hours = u32::try_from(hours).map_err(|_| TimeError::new("hours out of range"))?;
        let secs = hours
            .checked_mul(SECS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes as u32 * SECS_PER_MINUTE + seconds as u32))
            .ok_or_else(|| TimeError::new("hours out of range"))?;
        Ok(Self { secs })
    }

    /// Parse a GTFS "H:MM:SS" or "HH:MM:SS" time string.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM:SS format"));
        };
        if h.is_empty() || m.len() != 2 || sec.len() != 2 {
            return Err(TimeError::new("expected H:MM:SS format"));
        }
        let hours = parse_digits(h).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minutes = parse_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        let seconds = parse_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;
        Self::from_hms(hours, minutes, seconds)
    }

    /// Hours since the start of the service day (may exceed 23).
    pub fn hours(&self) -> u32 {
        self.secs / SECS_PER_HOUR
    }

    /// Minute component (0-59).
    pub fn minutes(&self) -> u32 {
        (self.secs % SECS_PER_HOUR) / SECS_PER_MINUTE
    }

    /// Second component (0-59).
    pub fn seconds(&self) -> u32 {
        self.secs % SECS_PER_MINUTE
    }

    /// Seconds since the start of the service day.
    pub fn total_seconds(&self) -> u32 {
        self.secs
    }

    /// Whether this time falls on or after midnight of the following day.
    pub fn is_after_midnight(&self) -> bool {
        self.hours() >= 24
    }

    /// Wall-clock time of day, with hours past 24 wrapped onto the next day.
    pub fn clock_time(&self) -> NaiveTime {
        // The remainder is always below a day, so the conversion cannot fail.
        NaiveTime::from_num_seconds_from_midnight_opt(self.secs % SECS_PER_DAY, 0)
            .unwrap_or_default()
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({})", self)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}
