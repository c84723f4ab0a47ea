//! Transit timetable engine.
//!
//! Turns GTFS-style trips and service calendars into what a rider
//! information site displays: day-type and direction pickers, stop lists,
//! and timetable grids aligned across trips with differing stop patterns.

pub mod domain;
pub mod feed;
pub mod schedule;
