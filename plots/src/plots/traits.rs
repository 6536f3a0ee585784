use crate::PlotBytes;
use crate::options::PlotOptions;
use crate::render::RenderConfig;
use anyhow::Result;

/// Trait for plot types
///
/// This trait defines the interface that all plot types must implement.
/// Each plot type specifies its own options type and data type.
///
/// `render` draws the whole plot on the caller's turn and returns the
/// encoded image. Plots over large ensembles additionally expose a
/// [`RenderDriver`](crate::render::driver::RenderDriver) so hosts can
/// time-slice the drawing instead; the trait covers the one-shot case.
pub trait Plot {
    /// The options type for this plot
    type Options: PlotOptions;

    /// The data type this plot accepts
    type Data;

    /// Render the plot with the given data and options
    ///
    /// # Arguments
    ///
    /// * `data` - The data to plot
    /// * `options` - Plot-specific options
    /// * `render_config` - Rendering configuration (progress/legend/finished
    ///   callbacks)
    ///
    /// # Returns
    ///
    /// JPEG-encoded plot image bytes
    fn render(
        &self,
        data: Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<PlotBytes>;
}
