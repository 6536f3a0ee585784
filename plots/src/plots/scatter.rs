use anyhow::Result;

use crate::PlotBytes;
use crate::create_axis_specs;
use crate::options::{CrossPlotOptions, PlotOptions};
use crate::plots::traits::Plot;
use crate::render::RenderConfig;
use crate::render::bitmap::BitmapSurface;
use crate::render::surface::DrawSurface;

/// Cross plot implementation
///
/// Scatters precomputed value pairs, one marker each. Used for plotting one
/// response against another across realizations, or component scores from a
/// decomposition done upstream.
#[derive(Debug, Default)]
pub struct CrossPlot;

impl CrossPlot {
    /// Create a new CrossPlot instance
    pub fn new() -> Self {
        Self
    }

    fn extent(pairs: &[[f64; 2]]) -> Option<([f64; 2], [f64; 2])> {
        let mut x: Option<[f64; 2]> = None;
        let mut y: Option<[f64; 2]> = None;
        for &[px, py] in pairs {
            if !(px.is_finite() && py.is_finite()) {
                continue;
            }
            x = Some(match x {
                Some([lo, hi]) => [lo.min(px), hi.max(px)],
                None => [px, px],
            });
            y = Some(match y {
                Some([lo, hi]) => [lo.min(py), hi.max(py)],
                None => [py, py],
            });
        }
        Some((x?, y?))
    }
}

impl Plot for CrossPlot {
    type Options = CrossPlotOptions;
    type Data = Vec<[f64; 2]>;

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

        for &pair in &data {
            if pair[0].is_finite() && pair[1].is_finite() {
                surface.draw_marker(pair, &options.marker);
            }
        }

        render_config.notify_finished();
        surface.finish()
    }
}
