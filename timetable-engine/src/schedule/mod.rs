//! Schedule transformations.
//!
//! Pure functions that reshape trips and calendars into what a rider sees:
//! day-type buckets, a headsign per direction, a day × direction index, and
//! the timetable grid for one selection. Nothing here does I/O or keeps
//! state between calls.

mod align;
mod bucket;
mod classify;
mod config;
mod direction;
mod error;
mod format;
mod index;
mod route;
mod stop_board;
mod stop_list;

pub use align::{AlignedTrip, Timetable, TimetableColumn, align_timetable};
pub use bucket::{Scheduled, bucket_by_day_type};
pub use classify::{ServiceDays, classify_services, day_types_of};
pub use config::{EngineConfig, MidnightRollover, UnclassifiedServicePolicy};
pub use direction::resolve_headsigns;
pub use error::ScheduleError;
pub use format::{format_arrival_time, format_service_time};
pub use index::ServiceDirectionIndex;
pub use route::{RouteSchedule, Selection};
pub use stop_board::{RouteVisits, StopBoard, StopVisit};
pub use stop_list::{longest_trips, model_trip, stop_list};
