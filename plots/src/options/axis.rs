use derive_builder::Builder;

use crate::PlotRange;

/// Options for configuring a plot axis
///
/// Controls the range and label for a single axis. When no range is given
/// the plot derives one from the data extent, rounded to nice bounds.
///
/// # Example
///
/// ```rust,no_run
/// use ensemble_plots::options::AxisOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let axis = AxisOptions::new()
///     .range(0.0..=5_000.0)
///     .label("Days")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug, Default)]
#[builder(setter(into, strip_option), default)]
pub struct AxisOptions {
    /// Data range for this axis; autoscaled from the data when absent
    pub range: Option<PlotRange>,

    /// Optional axis label
    pub label: Option<String>,
}

impl AxisOptions {
    /// Create a new builder for AxisOptions
    pub fn new() -> AxisOptionsBuilder {
        AxisOptionsBuilder::default()
    }
}
