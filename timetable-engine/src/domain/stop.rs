//! Stop reference data.

use super::StopId;

/// A physical stop where riders board or alight.
///
/// Identity is the `stop_id`; the optional `stop_code` is the short
/// rider-facing number some agencies print on signage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub id: StopId,
    pub code: Option<String>,
    pub name: String,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            code: None,
            name: name.into(),
        }
    }

    /// Attach a rider-facing stop code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_code() {
        let stop = Stop::new(StopId::new("S1").unwrap(), "Woodward & Grand").with_code("1042");
        assert_eq!(stop.id.as_str(), "S1");
        assert_eq!(stop.code.as_deref(), Some("1042"));
        assert_eq!(stop.name, "Woodward & Grand");
    }

    #[test]
    fn code_defaults_to_none() {
        let stop = Stop::new(StopId::new("S1").unwrap(), "Rosa Parks Transit Center");
        assert!(stop.code.is_none());
    }
}
