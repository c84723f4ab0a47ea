//! Domain types for the timetable engine.
//!
//! This module contains the validated transit records the schedule engine
//! works on. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod calendar;
mod error;
mod ids;
mod stop;
mod time;
mod trip;

pub use calendar::{DayType, InvalidDayType, ServiceCalendar};
pub use error::DomainError;
pub use ids::{DirectionId, InvalidDirectionId, InvalidId, ServiceId, StopId, TripId};
pub use stop::Stop;
pub use time::{ServiceTime, TimeError};
pub use trip::{TimedStop, Trip};
