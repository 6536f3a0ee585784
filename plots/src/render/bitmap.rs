use std::ops::Range;

use anyhow::Result;
use image::RgbImage;
use plotters::{
    backend::BitMapBackend, chart::ChartBuilder, prelude::IntoDrawingArea, style::WHITE,
};

use crate::PlotBytes;
use crate::error::PlotError;
use crate::options::{AxisOptions, BasePlotOptions};
use crate::render::surface::{AxisMapper, DrawSurface};
use crate::style::{AreaStyle, DashPattern, LineStyle, MarkerShape, MarkerStyle, Rgb};

/// A [`DrawSurface`] over an RGB pixel buffer, encoded to JPEG on
/// [`finish`](Self::finish).
///
/// Construction sets up the chart frame with Plotters: background fill,
/// mesh, tick labels, and axis descriptions. After that the buffer is
/// written directly, which is far faster than routing every primitive
/// through Plotters series rendering. Geometry outside the plotting area is
/// clipped pixel by pixel.
pub struct BitmapSurface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    /// Snapshot of the freshly framed chart; `clear` restores it so mesh
    /// lines survive redraws.
    background: Vec<u8>,
    x_map: AxisMapper,
    y_map: AxisMapper,
    plot_x: Range<i32>,
    plot_y: Range<i32>,
}

impl BitmapSurface {
    /// Build the chart frame and the data-to-pixel mapping.
    ///
    /// `x_spec`/`y_spec` are the resolved axis ranges (see
    /// [`create_axis_specs`](crate::create_axis_specs)); axis labels come
    /// from the axis options.
    pub fn new(
        base: &BasePlotOptions,
        x_axis: &AxisOptions,
        y_axis: &AxisOptions,
        x_spec: Range<f64>,
        y_spec: Range<f64>,
    ) -> Result<Self> {
        for spec in [&x_spec, &y_spec] {
            if !(spec.start.is_finite() && spec.end.is_finite()) || spec.start >= spec.end {
                return Err(PlotError::InvalidAxisRange {
                    start: spec.start,
                    end: spec.end,
                }
                .into());
            }
        }

        let width = base.width;
        let height = base.height;

        // RGB buffer (3 bytes per pixel); the JPEG encoding at the end does
        // not support alpha anyway.
        let mut buffer = vec![255u8; (width * height * 3) as usize];

        let (plot_x, plot_y) = {
            let backend = BitMapBackend::with_buffer(&mut buffer, (width, height));
            let root = backend.into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| anyhow::anyhow!("failed to fill plot background: {e}"))?;

            let mut chart = ChartBuilder::on(&root)
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .build_cartesian_2d(x_spec.clone(), y_spec.clone())?;

            let mut mesh = chart.configure_mesh();
            mesh.x_max_light_lines(4)
                .y_max_light_lines(4)
                .x_labels(10)
                .y_labels(10);

            if let Some(ref x_label) = x_axis.label {
                mesh.x_desc(x_label);
            }
            if let Some(ref y_label) = y_axis.label {
                mesh.y_desc(y_label);
            }

            mesh.draw()
                .map_err(|e| anyhow::anyhow!("failed to draw plot mesh: {e}"))?;

            let plotting_area = chart.plotting_area();
            let (plot_x, plot_y) = plotting_area.get_pixel_range();

            root.present()
                .map_err(|e| anyhow::anyhow!("failed to present plotters buffer: {e}"))?;

            (plot_x, plot_y)
        }; // End Plotters scope - the buffer is released for direct writing.

        if plot_x.is_empty() || plot_y.is_empty() {
            return Err(PlotError::EmptyPlotArea {
                width,
                height,
                margin: base.margin,
            }
            .into());
        }

        let x_map = AxisMapper::new(x_spec.start, x_spec.end, plot_x.start, plot_x.end);
        // Screen y grows downward; flip so larger data values land higher.
        let y_map = AxisMapper::new(y_spec.start, y_spec.end, plot_y.end, plot_y.start);

        let background = buffer.clone();
        Ok(Self {
            width,
            height,
            buffer,
            background,
            x_map,
            y_map,
            plot_x,
            plot_y,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB buffer, 3 bytes per pixel, row-major.
    pub fn rgb_buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Pixel color at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some(Rgb::new(
            self.buffer[idx],
            self.buffer[idx + 1],
            self.buffer[idx + 2],
        ))
    }

    /// Pixel bounds of the plotting area (inside margins and label areas).
    pub fn plot_area(&self) -> (Range<i32>, Range<i32>) {
        (self.plot_x.clone(), self.plot_y.clone())
    }

    /// Encode the surface to JPEG.
    pub fn finish(self) -> Result<PlotBytes> {
        let img: RgbImage = image::ImageBuffer::from_vec(self.width, self.height, self.buffer)
            .ok_or_else(|| anyhow::anyhow!("plot image buffer had unexpected size"))?;

        // JPEG at quality 85 keeps files small without visible artifacts on
        // line plots; reserve roughly an eighth of the raw size up front.
        let raw_size = (self.width * self.height * 3) as usize;
        let mut encoded_data = Vec::with_capacity(raw_size / 8);
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded_data, 85);
        encoder.encode(
            img.as_raw(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(encoded_data)
    }

    fn map_point(&self, p: [f64; 2]) -> (i32, i32) {
        (self.x_map.map_px(p[0]), self.y_map.map_px(p[1]))
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        // Clip to the plotting area, never the full image.
        if x < self.plot_x.start || x >= self.plot_x.end {
            return;
        }
        if y < self.plot_y.start || y >= self.plot_y.end {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.buffer[idx] = color.r;
        self.buffer[idx + 1] = color.g;
        self.buffer[idx + 2] = color.b;
    }

    fn put_dot(&mut self, x: i32, y: i32, color: Rgb, width: u32) {
        if width <= 1 {
            self.put_pixel(x, y, color);
            return;
        }
        let r = (width / 2) as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }

    fn draw_line_px(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, style: &LineStyle) {
        let (on, off) = match style.dash {
            DashPattern::Solid => (usize::MAX, 0),
            DashPattern::Dashed => (6, 4),
            DashPattern::Dotted => (2, 3),
        };

        // Bresenham walk with a dash counter over the emitted pixels.
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let mut step = 0usize;
        loop {
            let visible = match style.dash {
                DashPattern::Solid => true,
                _ => step % (on + off) < on,
            };
            if visible {
                self.put_dot(x, y, style.color, style.width);
            }
            if x == x1 && y == y1 {
                break;
            }
            step += 1;
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_quad_px(&mut self, corners: [(i32, i32); 4], color: Rgb) {
        let y_min = corners.iter().map(|c| c.1).min().unwrap_or(0);
        let y_max = corners.iter().map(|c| c.1).max().unwrap_or(0);

        for y in y_min..=y_max {
            let mut span: Option<(i32, i32)> = None;
            for i in 0..4 {
                let (x0, y0) = corners[i];
                let (x1, y1) = corners[(i + 1) % 4];
                if y0 == y1 {
                    if y == y0 {
                        let (lo, hi) = (x0.min(x1), x0.max(x1));
                        span = Some(match span {
                            Some((a, b)) => (a.min(lo), b.max(hi)),
                            None => (lo, hi),
                        });
                    }
                    continue;
                }
                let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));
                if y < lo_y || y > hi_y {
                    continue;
                }
                let t = (y - y0) as f64 / (y1 - y0) as f64;
                let x = (x0 as f64 + t * (x1 - x0) as f64).round() as i32;
                span = Some(match span {
                    Some((a, b)) => (a.min(x), b.max(x)),
                    None => (x, x),
                });
            }
            if let Some((lo, hi)) = span {
                for x in lo..=hi {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }
}

impl DrawSurface for BitmapSurface {
    fn clear(&mut self) {
        // Drawing is clipped to the plot area, so restoring the whole frame
        // resets exactly what a pass may have painted.
        self.buffer.copy_from_slice(&self.background);
    }

    fn draw_segment(&mut self, from: [f64; 2], to: [f64; 2], style: &LineStyle) {
        let (x0, y0) = self.map_point(from);
        let (x1, y1) = self.map_point(to);
        self.draw_line_px(x0, y0, x1, y1, style);
    }

    fn fill_quad(&mut self, corners: [[f64; 2]; 4], style: &AreaStyle) {
        let px = [
            self.map_point(corners[0]),
            self.map_point(corners[1]),
            self.map_point(corners[2]),
            self.map_point(corners[3]),
        ];
        self.fill_quad_px(px, style.fill);
    }

    fn draw_marker(&mut self, at: [f64; 2], style: &MarkerStyle) {
        let (cx, cy) = self.map_point(at);
        let r = style.size as i32;
        match style.shape {
            MarkerShape::Circle => {
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx * dx + dy * dy <= r * r {
                            self.put_pixel(cx + dx, cy + dy, style.color);
                        }
                    }
                }
            }
            MarkerShape::Square => {
                for dy in -r..=r {
                    for dx in -r..=r {
                        self.put_pixel(cx + dx, cy + dy, style.color);
                    }
                }
            }
            MarkerShape::Cross => {
                let stroke = LineStyle::new(style.color);
                self.draw_line_px(cx - r, cy - r, cx + r, cy + r, &stroke);
                self.draw_line_px(cx - r, cy + r, cx + r, cy - r, &stroke);
            }
            MarkerShape::Triangle => {
                // Apex up; rows widen toward the base.
                for dy in -r..=r {
                    let half = ((dy + r) * r) / (2 * r).max(1);
                    for dx in -half..=half {
                        self.put_pixel(cx + dx, cy + dy, style.color);
                    }
                }
            }
        }
    }
}
