//! Conversion from route document DTOs to domain types.
//!
//! Invalid trips and calendar rows are logged and skipped rather than
//! failing the whole document, so one bad row does not blank a route page.

use tracing::warn;

use super::types::{
    CalendarRecord, IntervalRecord, RouteRecord, StopTimeRecord, StopVisitRecord, TripRecord,
};
use crate::domain::{
    DirectionId, DomainError, InvalidDirectionId, InvalidId, ServiceCalendar, ServiceId,
    ServiceTime, Stop, StopId, TimeError, TimedStop, Trip, TripId,
};
use crate::schedule::StopVisit;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// An identifier column was empty
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// Direction outside 0/1
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirectionId),

    /// An arrival interval is out of range
    #[error("invalid arrival time at {stop}: {source}")]
    InvalidTime { stop: String, source: TimeError },

    /// The trip's stop times break sequence or time ordering
    #[error(transparent)]
    InvalidTrip(#[from] DomainError),
}

/// A route converted to domain types.
#[derive(Debug, Clone)]
pub struct ConvertedRoute {
    pub short_name: String,
    pub long_name: Option<String>,
    pub feed_index: Option<i64>,
    pub trips: Vec<Trip>,
    /// Trips left out because they failed validation.
    pub skipped_trips: usize,
}

/// Convert a database interval to a service time.
///
/// Missing components count as zero. Fractional seconds are dropped; any
/// negative seconds value, fractional or not, is out of range.
pub fn convert_interval(interval: &IntervalRecord) -> Result<ServiceTime, TimeError> {
    ServiceTime::from_hms(
        interval.hours.unwrap_or(0),
        interval.minutes.unwrap_or(0),
        interval.seconds.map_or(0, |s| s.floor() as i64),
    )
}

fn convert_stop_time(
    record: &StopTimeRecord,
    position: usize,
) -> Result<TimedStop, ConversionError> {
    let stop_id = StopId::new(record.stop.stop_id.as_str())?;
    let arrival =
        convert_interval(&record.arrival_time).map_err(|source| ConversionError::InvalidTime {
            stop: record.stop.stop_id.clone(),
            source,
        })?;

    let mut stop = Stop::new(stop_id, record.stop.stop_name.as_str());
    stop.code = record.stop.stop_code.clone();

    Ok(TimedStop::new(
        stop,
        arrival,
        record.timepoint.unwrap_or(true),
        record
            .stop_sequence
            .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX)),
    ))
}

/// Convert a single trip with its stop times.
pub fn convert_trip(record: &TripRecord) -> Result<Trip, ConversionError> {
    let id = TripId::new(record.trip_id.as_str())?;
    let service_id = ServiceId::new(record.service_id.as_str())?;
    let direction = DirectionId::new(record.direction_id.unwrap_or(0))?;

    let stop_times = record
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| convert_stop_time(st, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trip::new(
        id,
        direction,
        service_id,
        record.trip_headsign.clone().unwrap_or_default(),
        stop_times,
    )?)
}

/// Convert a route and its trips, skipping invalid trips.
pub fn convert_route(record: &RouteRecord) -> ConvertedRoute {
    let mut trips = Vec::with_capacity(record.trips.len());
    let mut skipped_trips = 0;

    for trip in &record.trips {
        match convert_trip(trip) {
            Ok(t) => trips.push(t),
            Err(e) => {
                warn!(
                    route = %record.route_short_name,
                    trip = %trip.trip_id,
                    error = %e,
                    "skipping trip"
                );
                skipped_trips += 1;
            }
        }
    }

    ConvertedRoute {
        short_name: record.route_short_name.clone(),
        long_name: record.route_long_name.clone(),
        feed_index: record.feed_index,
        trips,
        skipped_trips,
    }
}

/// Convert calendar rows, skipping rows without a service id.
///
/// Rows with no operating day are kept; the classifier rejects them.
pub fn convert_calendars(records: &[CalendarRecord]) -> Vec<ServiceCalendar> {
    records
        .iter()
        .filter_map(|r| match ServiceId::new(r.service_id.as_str()) {
            Ok(service_id) => Some(ServiceCalendar::new(
                service_id,
                [
                    r.monday,
                    r.tuesday,
                    r.wednesday,
                    r.thursday,
                    r.friday,
                    r.saturday,
                    r.sunday,
                ],
            )),
            Err(e) => {
                warn!(error = %e, "skipping calendar row");
                None
            }
        })
        .collect()
}

fn convert_stop_visit(record: &StopVisitRecord) -> Result<StopVisit, ConversionError> {
    let arrival =
        convert_interval(&record.arrival_time).map_err(|source| ConversionError::InvalidTime {
            stop: record.trip.trip_id.clone(),
            source,
        })?;

    Ok(StopVisit {
        route: record.trip.route.route_short_name.clone(),
        trip_id: TripId::new(record.trip.trip_id.as_str())?,
        service_id: ServiceId::new(record.trip.service_id.as_str())?,
        headsign: record.trip.trip_headsign.clone().unwrap_or_default(),
        arrival,
    })
}

/// Convert the stop-page arrivals, skipping invalid rows.
pub fn convert_stop_visits(records: &[StopVisitRecord]) -> Vec<StopVisit> {
    records
        .iter()
        .filter_map(|r| match convert_stop_visit(r) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(trip = %r.trip.trip_id, error = %e, "skipping stop visit");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::RouteDocument;
    use chrono::Weekday;

    fn route_json() -> &'static str {
        r#"{
            "route": {
                "routeShortName": "4",
                "routeLongName": "Woodward",
                "feedIndex": 9,
                "trips": [
                    {
                        "tripId": "T1",
                        "serviceId": "WK",
                        "directionId": 0,
                        "tripHeadsign": "Downtown",
                        "stopTimes": [
                            {"stop": {"stopId": "A", "stopCode": "100", "stopName": "State Fair"},
                             "arrivalTime": {"hours": 8}},
                            {"stop": {"stopId": "B", "stopName": "Grand Blvd"},
                             "arrivalTime": {"hours": 8, "minutes": 15, "seconds": 30.5}}
                        ]
                    },
                    {
                        "tripId": "BAD",
                        "serviceId": "WK",
                        "directionId": 0,
                        "stopTimes": [
                            {"stop": {"stopId": "A", "stopName": "State Fair"},
                             "arrivalTime": {"hours": 9, "minutes": 10}},
                            {"stop": {"stopId": "B", "stopName": "Grand Blvd"},
                             "arrivalTime": {"hours": 9}}
                        ]
                    },
                    {
                        "tripId": "T2",
                        "serviceId": "WK",
                        "stopTimes": []
                    }
                ]
            },
            "serviceCalendars": [
                {"serviceId": "WK", "monday": 1, "tuesday": 1, "wednesday": 1,
                 "thursday": 1, "friday": 1, "saturday": 0, "sunday": 0},
                {"serviceId": "", "monday": 1, "tuesday": 0, "wednesday": 0,
                 "thursday": 0, "friday": 0, "saturday": 0, "sunday": 0}
            ]
        }"#
    }

    #[test]
    fn interval_missing_parts_are_zero() {
        let t = convert_interval(&IntervalRecord {
            hours: Some(25),
            minutes: None,
            seconds: Some(9.9),
        })
        .unwrap();
        assert_eq!(t, ServiceTime::from_hms(25, 0, 9).unwrap());

        assert_eq!(
            convert_interval(&IntervalRecord::default()).unwrap(),
            ServiceTime::default()
        );
    }

    #[test]
    fn interval_out_of_range() {
        let err = convert_interval(&IntervalRecord {
            hours: Some(8),
            minutes: Some(75),
            seconds: None,
        });
        assert!(err.is_err());
    }

    #[test]
    fn negative_fractional_seconds_are_rejected() {
        let err = convert_interval(&IntervalRecord {
            hours: Some(8),
            minutes: Some(0),
            seconds: Some(-0.5),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid time: seconds must be 0-59");

        let t = convert_interval(&IntervalRecord {
            hours: Some(8),
            minutes: Some(0),
            seconds: Some(0.5),
        })
        .unwrap();
        assert_eq!(t, ServiceTime::from_hms(8, 0, 0).unwrap());
    }

    #[test]
    fn converts_route_and_skips_bad_trips() {
        let doc: RouteDocument = serde_json::from_str(route_json()).unwrap();
        let route = convert_route(&doc.route);

        assert_eq!(route.short_name, "4");
        assert_eq!(route.long_name.as_deref(), Some("Woodward"));
        assert_eq!(route.feed_index, Some(9));
        assert_eq!(route.skipped_trips, 1);

        let ids: Vec<_> = route.trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);

        let t1 = &route.trips[0];
        assert_eq!(t1.headsign, "Downtown");
        assert_eq!(t1.stop_times()[0].stop.code.as_deref(), Some("100"));
        assert_eq!(t1.stop_times()[0].sequence, 0);
        assert!(t1.stop_times()[0].timepoint);
        assert_eq!(
            t1.stop_times()[1].arrival,
            ServiceTime::from_hms(8, 15, 30).unwrap()
        );

        // Missing headsign and direction fall back to defaults
        assert_eq!(route.trips[1].headsign, "");
        assert_eq!(route.trips[1].direction, DirectionId::ZERO);
    }

    #[test]
    fn converts_calendars_skipping_blank_ids() {
        let doc: RouteDocument = serde_json::from_str(route_json()).unwrap();
        let calendars = convert_calendars(&doc.service_calendars);

        assert_eq!(calendars.len(), 1);
        assert!(calendars[0].runs_on(Weekday::Wed));
        assert!(!calendars[0].runs_on(Weekday::Sat));
    }

    #[test]
    fn invalid_direction_is_reported() {
        let record = TripRecord {
            trip_id: "T1".into(),
            service_id: "WK".into(),
            direction_id: Some(3),
            trip_headsign: None,
            stop_times: vec![],
        };
        assert_eq!(
            convert_trip(&record).unwrap_err(),
            ConversionError::InvalidDirection(InvalidDirectionId(3))
        );
    }

    #[test]
    fn invalid_time_names_the_stop() {
        let json = r#"{
            "tripId": "T1", "serviceId": "WK",
            "stopTimes": [{"stop": {"stopId": "A", "stopName": "A"},
                           "arrivalTime": {"hours": -2}}]
        }"#;
        let record: TripRecord = serde_json::from_str(json).unwrap();
        let err = convert_trip(&record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arrival time at A: invalid time: hours must not be negative"
        );
    }

    #[test]
    fn converts_stop_visits() {
        let json = r#"[
            {"arrivalTime": {"hours": 7, "minutes": 45},
             "trip": {"tripId": "T1", "serviceId": "WK", "tripHeadsign": "Downtown",
                      "route": {"routeShortName": "4"}}},
            {"arrivalTime": {"hours": 7},
             "trip": {"tripId": "", "serviceId": "WK", "route": {"routeShortName": "4"}}}
        ]"#;
        let records: Vec<StopVisitRecord> = serde_json::from_str(json).unwrap();

        let visits = convert_stop_visits(&records);

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].route, "4");
        assert_eq!(visits[0].headsign, "Downtown");
        assert_eq!(visits[0].arrival, ServiceTime::from_hms(7, 45, 0).unwrap());
    }
}
