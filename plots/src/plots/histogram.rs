use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::PlotBytes;
use crate::create_axis_specs;
use crate::options::{HistogramPlotOptions, PlotOptions};
use crate::plots::traits::Plot;
use crate::render::RenderConfig;
use crate::render::bitmap::BitmapSurface;
use crate::render::surface::DrawSurface;
use crate::style::AreaStyle;

/// One pre-computed histogram bar.
///
/// Binning happens upstream; the plot only draws what it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge on the x-axis.
    pub start: f64,
    /// Right edge on the x-axis.
    pub end: f64,
    /// Bar height.
    pub count: f64,
}

impl HistogramBin {
    pub fn new(start: f64, end: f64, count: f64) -> Self {
        Self { start, end, count }
    }
}

/// Histogram plot implementation
///
/// Draws pre-binned bars as filled areas with an optional outline.
#[derive(Debug, Default)]
pub struct HistogramPlot;

impl HistogramPlot {
    /// Create a new HistogramPlot instance
    pub fn new() -> Self {
        Self
    }

    fn extent(bins: &[HistogramBin]) -> Option<([f64; 2], [f64; 2])> {
        let mut x: Option<[f64; 2]> = None;
        let mut y_max = f64::NEG_INFINITY;
        for bin in bins {
            if !(bin.start.is_finite() && bin.end.is_finite() && bin.count.is_finite()) {
                continue;
            }
            x = Some(match x {
                Some([lo, hi]) => [lo.min(bin.start), hi.max(bin.end)],
                None => [bin.start, bin.end],
            });
            y_max = y_max.max(bin.count);
        }
        x.map(|x| (x, [0.0, y_max.max(1.0)]))
    }
}

impl Plot for HistogramPlot {
    type Options = HistogramPlotOptions;
    type Data = Vec<HistogramBin>;

    fn render(
        &self,
        data: Self::Data,
        options: &Self::Options,
        render_config: &mut RenderConfig,
    ) -> Result<PlotBytes> {
        let (x_spec, y_spec) =
            create_axis_specs(&options.x_axis, &options.y_axis, Self::extent(&data));
        let mut surface = BitmapSurface::new(
            options.base(),
            &options.x_axis,
            &options.y_axis,
            x_spec,
            y_spec,
        )?;

        let fill = AreaStyle::new(options.fill);
        for bin in &data {
            if !(bin.start.is_finite() && bin.end.is_finite() && bin.count.is_finite()) {
                continue;
            }
            surface.fill_quad(
                [
                    [bin.start, bin.count],
                    [bin.end, bin.count],
                    [bin.end, 0.0],
                    [bin.start, 0.0],
                ],
                &fill,
            );
            if let Some(outline) = &options.outline {
                surface.draw_segment([bin.start, 0.0], [bin.start, bin.count], outline);
                surface.draw_segment([bin.start, bin.count], [bin.end, bin.count], outline);
                surface.draw_segment([bin.end, bin.count], [bin.end, 0.0], outline);
            }
        }

        render_config.notify_finished();
        surface.finish()
    }
}
