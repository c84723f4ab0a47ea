//! Opaque GTFS identifier types.

use std::fmt;

/// Error returned when constructing an identifier from invalid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from a string.
            ///
            /// Returns an error if the string is empty.
            pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
                let s = s.into();
                if s.is_empty() {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "cannot be empty",
                    });
                }
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// A GTFS `stop_id`. Stop identity for pattern matching is this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_engine::domain::StopId;
    ///
    /// let id = StopId::new("1042").unwrap();
    /// assert_eq!(id.as_str(), "1042");
    /// assert!(StopId::new("").is_err());
    /// ```
    StopId,
    "stop id"
);

opaque_id!(
    /// A GTFS `trip_id`.
    TripId,
    "trip id"
);

opaque_id!(
    /// A GTFS `service_id`, linking trips to their calendar.
    ServiceId,
    "service id"
);

/// Error returned for a direction value other than 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction id {0}: must be 0 or 1")]
pub struct InvalidDirectionId(pub i64);

/// A GTFS `direction_id`: one of two travel directions along a route.
///
/// # Examples
///
/// ```
/// use timetable_engine::domain::DirectionId;
///
/// let dir = DirectionId::new(1).unwrap();
/// assert_eq!(dir.value(), 1);
/// assert!(DirectionId::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectionId(u8);

impl DirectionId {
    pub const ZERO: DirectionId = DirectionId(0);
    pub const ONE: DirectionId = DirectionId(1);

    pub fn new(value: i64) -> Result<Self, InvalidDirectionId> {
        match value {
            0 => Ok(Self::ZERO),
            1 => Ok(Self::ONE),
            other => Err(InvalidDirectionId(other)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
