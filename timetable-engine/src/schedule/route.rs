//! Per-route schedule view.
//!
//! Bundles the calendar classification, headsigns and service × direction
//! index for one route so the day and direction pickers and the timetable
//! grid all work from the same derived data.

use std::collections::BTreeMap;

use super::align::{Timetable, align_timetable};
use super::classify::{ServiceDays, classify_services};
use super::config::EngineConfig;
use super::direction::resolve_headsigns;
use super::error::ScheduleError;
use super::index::ServiceDirectionIndex;
use crate::domain::{DayType, DirectionId, ServiceCalendar, Trip};

/// A day type and direction chosen in the pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub day: DayType,
    pub direction: DirectionId,
}

impl Selection {
    pub fn new(day: DayType, direction: DirectionId) -> Self {
        Self { day, direction }
    }
}

/// Derived schedule data for one route.
#[derive(Debug, Clone)]
pub struct RouteSchedule<'a> {
    service_days: ServiceDays,
    headsigns: BTreeMap<DirectionId, String>,
    index: ServiceDirectionIndex<'a>,
}

impl<'a> RouteSchedule<'a> {
    /// Classify calendars, resolve headsigns and index the route's trips.
    pub fn build(
        trips: &'a [Trip],
        calendars: &[ServiceCalendar],
        config: &EngineConfig,
    ) -> Result<Self, ScheduleError> {
        let service_days = classify_services(calendars)?;
        let headsigns = resolve_headsigns(trips);
        let index =
            ServiceDirectionIndex::build(trips, &service_days, config.unclassified_services)?;

        Ok(Self {
            service_days,
            headsigns,
            index,
        })
    }

    pub fn service_days(&self) -> &ServiceDays {
        &self.service_days
    }

    pub fn index(&self) -> &ServiceDirectionIndex<'a> {
        &self.index
    }

    /// Canonical headsign per direction, across all day types.
    pub fn headsigns(&self) -> &BTreeMap<DirectionId, String> {
        &self.headsigns
    }

    pub fn headsign(&self, direction: DirectionId) -> Option<&str> {
        self.headsigns.get(&direction).map(String::as_str)
    }

    /// Day types with scheduled trips.
    pub fn day_types(&self) -> impl Iterator<Item = DayType> + '_ {
        self.index.day_types()
    }

    /// Directions with their headsigns.
    pub fn directions(&self) -> impl Iterator<Item = (DirectionId, &str)> + '_ {
        self.headsigns.iter().map(|(d, h)| (*d, h.as_str()))
    }

    /// The selection shown before the rider picks anything: the first day
    /// type with service and the lowest-numbered direction.
    ///
    /// The pair may have no trips (a direction that only runs on other
    /// days); check with [`RouteSchedule::trips`] before aligning.
    pub fn default_selection(&self) -> Option<Selection> {
        let day = self.index.day_types().next()?;
        let direction = *self.headsigns.keys().next()?;
        Some(Selection { day, direction })
    }

    /// Trips for a selection; empty when the combination has no service.
    pub fn trips(&self, selection: Selection) -> &[&'a Trip] {
        self.index
            .get(selection.day, selection.direction)
            .unwrap_or_default()
    }

    /// Timetable grid for a selection.
    pub fn timetable(&self, selection: Selection) -> Result<Timetable<'a>, ScheduleError> {
        align_timetable(self.trips(selection).iter().copied())
    }
}
