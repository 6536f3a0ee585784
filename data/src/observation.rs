use serde::{Deserialize, Serialize};

/// An observed value with measurement uncertainty, anchored at one position
/// on the primary axis.
///
/// Observations are drawn on top of the simulated series as a marker with
/// error whiskers spanning `value ± error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    /// Position on the primary axis.
    pub x: f64,
    /// Observed value on the secondary axis.
    pub value: f64,
    /// Half-width of the uncertainty interval. Zero means no whiskers.
    #[serde(default)]
    pub error: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, x: f64, value: f64, error: f64) -> Self {
        Self {
            label: label.into(),
            x,
            value,
            error,
        }
    }

    /// Lower and upper bounds of the uncertainty interval.
    pub fn bounds(&self) -> (f64, f64) {
        (self.value - self.error, self.value + self.error)
    }
}
