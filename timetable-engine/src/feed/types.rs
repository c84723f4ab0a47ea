//! Route document DTOs.
//!
//! These types map directly to the JSON the website's data layer returns for
//! a route page and a stop page. They use `Option` liberally because the
//! database layer omits empty columns and zero interval components.

use serde::{Deserialize, Deserializer};

/// A route together with its feed's service calendars.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDocument {
    pub route: RouteRecord,

    #[serde(default)]
    pub service_calendars: Vec<CalendarRecord>,
}

/// A route row with its trips.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub agency_id: Option<String>,

    /// Rider-facing route number, e.g. "4".
    pub route_short_name: String,

    pub route_long_name: Option<String>,

    /// Hex color without the leading '#'.
    pub route_color: Option<String>,

    pub route_text_color: Option<String>,

    /// Index of the GTFS feed this route was loaded from.
    pub feed_index: Option<i64>,

    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

/// A trip row with its stop times, ordered by stop sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub trip_id: String,

    pub service_id: String,

    /// GTFS leaves `direction_id` optional; absent means 0.
    pub direction_id: Option<i64>,

    pub trip_headsign: Option<String>,

    #[serde(default)]
    pub stop_times: Vec<StopTimeRecord>,
}

/// A stop time row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimeRecord {
    pub stop: StopRecord,

    pub arrival_time: IntervalRecord,

    /// 1/0 or true/false; absent means a published time.
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub timepoint: Option<bool>,

    /// Absent means list order.
    pub stop_sequence: Option<u32>,
}

/// A stop row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub stop_id: String,

    pub stop_code: Option<String>,

    pub stop_name: String,
}

/// A database interval. Zero components are omitted or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntervalRecord {
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    /// May carry a fractional part, which is truncated.
    pub seconds: Option<f64>,
}

/// A `calendar.txt` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRecord {
    pub service_id: String,

    #[serde(deserialize_with = "deserialize_flag")]
    pub monday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub tuesday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub wednesday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub thursday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub friday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub saturday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub sunday: bool,
}

/// Stop times at one stop, as queried for the stop page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPageDocument {
    #[serde(default)]
    pub times: Vec<StopVisitRecord>,

    #[serde(default)]
    pub service_calendars: Vec<CalendarRecord>,
}

/// One trip's arrival at the stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopVisitRecord {
    pub arrival_time: IntervalRecord,
    pub trip: VisitTripRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitTripRecord {
    pub trip_id: String,
    pub service_id: String,
    pub trip_headsign: Option<String>,
    pub route: RouteNameRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNameRecord {
    pub route_short_name: String,
}

/// GTFS boolean columns arrive as either JSON booleans or 0/1 integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Flag::deserialize(deserializer).map(bool::from)
}

fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Flag>::deserialize(deserializer)?.map(bool::from))
}
