//! Route documents as delivered by the website's data layer.
//!
//! This module provides:
//! - DTOs for the route and stop page JSON
//! - Conversion to validated domain types
//! - The feed index → agency registry

mod convert;
mod registry;
mod types;

pub use convert::{
    ConversionError, ConvertedRoute, convert_calendars, convert_interval, convert_route,
    convert_stop_visits, convert_trip,
};
pub use registry::{FeedInfo, FeedRegistry, StopLabel};
pub use types::{
    CalendarRecord, IntervalRecord, RouteDocument, RouteNameRecord, RouteRecord,
    StopPageDocument, StopRecord, StopTimeRecord, StopVisitRecord, TripRecord, VisitTripRecord,
};
