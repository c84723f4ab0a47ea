//! Rider-facing time formatting.

use super::config::MidnightRollover;
use super::error::ScheduleError;
use crate::domain::ServiceTime;

/// Render a service time on the 12-hour clock, e.g. "9:05am".
///
/// Hours of 24 and above wrap onto the clock of the following morning, so
/// 25:30 reads "1:30am". Seconds are not shown.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::ServiceTime;
/// use timetable_engine::schedule::{MidnightRollover, format_service_time};
///
/// let t = ServiceTime::from_hms(25, 30, 0).unwrap();
/// assert_eq!(format_service_time(t, MidnightRollover::Clock), "1:30am");
/// assert_eq!(format_service_time(t, MidnightRollover::MarkNextDay), "1:30am (+1)");
/// ```
pub fn format_service_time(time: ServiceTime, rollover: MidnightRollover) -> String {
    let text = time.clock_time().format("%-I:%M%P").to_string();
    match rollover {
        MidnightRollover::MarkNextDay if time.is_after_midnight() => format!("{text} (+1)"),
        _ => text,
    }
}

/// Validate raw time components and render them.
///
/// Fails with [`ScheduleError::InvalidTime`] if hours are negative or
/// minutes/seconds fall outside 0-59.
pub fn format_arrival_time(
    hours: i64,
    minutes: i64,
    seconds: i64,
    rollover: MidnightRollover,
) -> Result<String, ScheduleError> {
    let time = ServiceTime::from_hms(hours, minutes, seconds)?;
    Ok(format_service_time(time, rollover))
}
