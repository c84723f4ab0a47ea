//! Engine configuration.
//!
//! The engine itself is stateless; these are the policy choices a caller
//! passes in explicitly on each call.

/// How times at or past hour 24 are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MidnightRollover {
    /// Wrap onto the 12-hour clock: 25:30 reads "1:30am".
    #[default]
    Clock,
    /// Wrap onto the clock and append " (+1)" to mark the following day.
    MarkNextDay,
}

/// What the bucketizer does with a trip whose service has no calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnclassifiedServicePolicy {
    /// Leave the trip out of every day-type bucket.
    #[default]
    Drop,
    /// Fail with `ScheduleError::UnclassifiedService`.
    Reject,
}

/// Configuration for the schedule engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Rendering of after-midnight service times.
    pub midnight_rollover: MidnightRollover,

    /// Handling of trips whose service has no calendar.
    pub unclassified_services: UnclassifiedServicePolicy,
}

impl EngineConfig {
    pub fn new(
        midnight_rollover: MidnightRollover,
        unclassified_services: UnclassifiedServicePolicy,
    ) -> Self {
        Self {
            midnight_rollover,
            unclassified_services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.midnight_rollover, MidnightRollover::Clock);
        assert_eq!(
            config.unclassified_services,
            UnclassifiedServicePolicy::Drop
        );
    }

    #[test]
    fn custom_config() {
        let config = EngineConfig::new(
            MidnightRollover::MarkNextDay,
            UnclassifiedServicePolicy::Reject,
        );

        assert_eq!(config.midnight_rollover, MidnightRollover::MarkNextDay);
        assert_eq!(
            config.unclassified_services,
            UnclassifiedServicePolicy::Reject
        );
    }
}
