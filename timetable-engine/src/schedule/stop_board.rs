//! Scheduled visits at a single stop.
//!
//! Backs the "scheduled stops here" view: every trip calling at a stop,
//! grouped by route and then by day type.

use std::collections::{BTreeMap, HashMap};

use super::bucket::{Scheduled, bucket_by_day_type};
use super::classify::ServiceDays;
use super::config::UnclassifiedServicePolicy;
use super::error::ScheduleError;
use crate::domain::{DayType, ServiceId, ServiceTime, TripId};

/// One trip's scheduled call at the stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopVisit {
    /// Route short name, e.g. "4".
    pub route: String,
    pub trip_id: TripId,
    pub service_id: ServiceId,
    pub headsign: String,
    pub arrival: ServiceTime,
}

impl Scheduled for StopVisit {
    fn service_id(&self) -> &ServiceId {
        &self.service_id
    }
}

/// Visits for one route, split by day type.
#[derive(Debug, Clone)]
pub struct RouteVisits<'a> {
    pub route: &'a str,
    pub by_day: BTreeMap<DayType, Vec<&'a StopVisit>>,
}

impl<'a> RouteVisits<'a> {
    /// Visits on a day type, in input order.
    pub fn on(&self, day: DayType) -> &[&'a StopVisit] {
        self.by_day.get(&day).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// All routes calling at a stop, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct StopBoard<'a> {
    routes: Vec<RouteVisits<'a>>,
}

impl<'a> StopBoard<'a> {
    pub fn build(
        visits: &'a [StopVisit],
        service_days: &ServiceDays,
        policy: UnclassifiedServicePolicy,
    ) -> Result<Self, ScheduleError> {
        let mut order: HashMap<&'a str, usize> = HashMap::new();
        let mut grouped: Vec<(&'a str, Vec<&'a StopVisit>)> = Vec::new();

        for visit in visits {
            let slot = *order.entry(visit.route.as_str()).or_insert_with(|| {
                grouped.push((visit.route.as_str(), Vec::new()));
                grouped.len() - 1
            });
            grouped[slot].1.push(visit);
        }

        let routes = grouped
            .into_iter()
            .map(|(route, route_visits)| {
                let by_day = bucket_by_day_type(route_visits, service_days, policy)?;
                Ok(RouteVisits { route, by_day })
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[RouteVisits<'a>] {
        &self.routes
    }

    pub fn route(&self, route: &str) -> Option<&RouteVisits<'a>> {
        self.routes.iter().find(|r| r.route == route)
    }
}
