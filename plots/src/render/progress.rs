/// Information about plot rendering progress
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressInfo {
    /// Sample units drawn so far in the current pass
    pub units_drawn: usize,
    /// Total sample units the pass will draw
    pub total_units: usize,
    /// Progress percentage (0.0 to 100.0)
    pub percent: f32,
}

impl ProgressInfo {
    pub fn new(units_drawn: usize, total_units: usize) -> Self {
        let percent = if total_units == 0 {
            100.0
        } else {
            (units_drawn as f32 / total_units as f32) * 100.0
        };
        Self {
            units_drawn,
            total_units,
            percent,
        }
    }
}

/// Callback function type for reporting plot rendering progress
///
/// The callback receives progress information and returns a result.
/// Errors from the callback are logged but do not stop rendering.
pub type ProgressCallback =
    Box<dyn FnMut(ProgressInfo) -> Result<(), Box<dyn std::error::Error + Send + Sync>>>;
