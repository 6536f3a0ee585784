use serde::{Deserialize, Serialize};

use crate::legend::LegendEntry;
use crate::render::RenderConfig;
use crate::render::surface::DrawSurface;
use crate::render::tracker::RenderTracker;
use crate::style::SeriesStyle;

/// Which axis a plot iterates along. Fixed before a pass starts.
///
/// Orientation decides the direction of observation whiskers and the axis an
/// area series extends its baseline on; sample order itself is always index
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Primary axis is x; values grow along y.
    #[default]
    Horizontal,
    /// Primary axis is y; values grow along x.
    Vertical,
}

/// How one series' samples are rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    /// Connected curve (optionally filled to a baseline, optionally with
    /// per-sample markers).
    Curve,
    /// Detached observed values: one marker per sample with uncertainty
    /// whiskers. `errors` parallels the sample vectors; missing entries mean
    /// no whisker.
    Observation { errors: Vec<f64> },
}

/// One drawable series inside a [`RenderRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSeries {
    pub name: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub style: SeriesStyle,
    pub kind: SeriesKind,
}

impl RequestSeries {
    pub fn curve(name: impl Into<String>, xs: Vec<f64>, ys: Vec<f64>, style: SeriesStyle) -> Self {
        Self {
            name: name.into(),
            xs,
            ys,
            style,
            kind: SeriesKind::Curve,
        }
    }

    pub fn observations(
        name: impl Into<String>,
        xs: Vec<f64>,
        ys: Vec<f64>,
        errors: Vec<f64>,
        style: SeriesStyle,
    ) -> Self {
        Self {
            name: name.into(),
            xs,
            ys,
            style,
            kind: SeriesKind::Observation { errors },
        }
    }

    /// Drawable samples: the shorter of the two axis vectors. Mismatched
    /// lengths are silently truncated rather than treated as an error.
    pub fn sample_count(&self) -> usize {
        self.xs.len().min(self.ys.len())
    }

    fn point(&self, index: usize) -> [f64; 2] {
        [self.xs[index], self.ys[index]]
    }
}

/// An immutable drawing workload: ordered series, each with ordered samples.
///
/// Series are drawn in declared order and samples in index order, so visual
/// stacking is deterministic across passes. A new request supersedes an
/// in-flight one wholesale; requests are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    series: Vec<RequestSeries>,
    orientation: Orientation,
}

impl RenderRequest {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            series: Vec::new(),
            orientation,
        }
    }

    pub fn push(&mut self, series: RequestSeries) {
        self.series.push(series);
    }

    pub fn series(&self) -> &[RequestSeries] {
        &self.series
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total sample units a complete pass will draw.
    pub fn total_samples(&self) -> usize {
        self.series.iter().map(|s| s.sample_count()).sum()
    }

    /// Legend rows for the full series list, independent of draw progress.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|s| LegendEntry::new(s.name.clone(), s.style))
            .collect()
    }
}

/// Resumption point within a render pass. Reset to `(0, 0)` at pass start,
/// meaningless outside one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawCursor {
    pub series: usize,
    pub sample: usize,
}

/// Result of one resumption turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The pass honored an abandonment signal; nothing more will be drawn
    /// and no completion fires.
    Abandoned,
    /// The turn budget ran out (or a series boundary was reached) with
    /// series left to draw. The host should schedule a resume.
    Yielded { units: usize },
    /// Every series has been drawn; the tracker has been released.
    Completed { units: usize },
}

/// Draws a [`RenderRequest`] in bounded chunks, cooperating with the
/// tracker's abandonment and per-turn budget signals.
///
/// The only state carried across suspension points is the cursor. A turn
/// never crosses a series boundary: finishing a series yields back to the
/// host even when budget remains, which keeps worst-case abandonment latency
/// at one turn budget.
#[derive(Debug, Default)]
pub struct ProgressiveDrawLoop {
    cursor: DrawCursor,
    units_drawn: usize,
}

impl ProgressiveDrawLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare a fresh pass: reset the cursor, clear the surface, and emit
    /// one legend entry per series. Legend entries cover the full series
    /// list up front, so they reflect intent even if drawing is later
    /// abandoned part-way.
    pub fn begin_pass<S: DrawSurface + ?Sized>(
        &mut self,
        request: &RenderRequest,
        surface: &mut S,
        config: &mut RenderConfig,
    ) {
        self.cursor = DrawCursor::default();
        self.units_drawn = 0;
        surface.clear();
        for entry in request.legend_entries() {
            config.register_legend(&entry);
        }
    }

    /// Run one resumption turn.
    ///
    /// Abandonment is checked only here, at the top, never mid-iteration; an
    /// in-flight turn always finishes its budget before a stop signal takes
    /// effect. Both terminal outcomes release the tracker via
    /// `stopped_rendering` before returning, on every path.
    pub fn run_turn<S: DrawSurface + ?Sized>(
        &mut self,
        tracker: &mut RenderTracker,
        request: &RenderRequest,
        surface: &mut S,
    ) -> TurnOutcome {
        if tracker.should_stop() {
            tracker.stopped_rendering();
            return TurnOutcome::Abandoned;
        }

        if self.cursor.series >= request.series.len() {
            tracker.stopped_rendering();
            return TurnOutcome::Completed { units: 0 };
        }

        let series = &request.series[self.cursor.series];
        let sample_count = series.sample_count();

        tracker.loop_start();
        let mut units = 0;
        while self.cursor.sample < sample_count {
            draw_unit(series, self.cursor.sample, request.orientation, surface);
            self.cursor.sample += 1;
            units += 1;
            if tracker.should_loop_stop() {
                break;
            }
        }
        self.units_drawn += units;

        if self.cursor.sample >= sample_count {
            self.cursor.series += 1;
            self.cursor.sample = 0;
        }

        if self.cursor.series < request.series.len() {
            TurnOutcome::Yielded { units }
        } else {
            tracker.stopped_rendering();
            TurnOutcome::Completed { units }
        }
    }

    pub fn cursor(&self) -> DrawCursor {
        self.cursor
    }

    /// Sample units drawn so far in the current pass.
    pub fn units_drawn(&self) -> usize {
        self.units_drawn
    }
}

/// Draw sample `index` of `series`.
///
/// A series whose drawable length is one sample collapses to a single marker
/// rather than a degenerate zero-length line. Multi-sample curves extend
/// their polyline by one vertex per unit; filled curves additionally emit
/// the trapezoid down to the baseline for the same span.
fn draw_unit<S: DrawSurface + ?Sized>(
    series: &RequestSeries,
    index: usize,
    orientation: Orientation,
    surface: &mut S,
) {
    let point = series.point(index);

    if let SeriesKind::Observation { errors } = &series.kind {
        let marker = series.style.effective_marker();
        let error = errors.get(index).copied().unwrap_or(0.0);
        if error > 0.0 {
            let whisker = series
                .style
                .line
                .unwrap_or_else(|| crate::style::LineStyle::new(marker.color));
            let (lo, hi) = match orientation {
                Orientation::Horizontal => {
                    ([point[0], point[1] - error], [point[0], point[1] + error])
                }
                Orientation::Vertical => {
                    ([point[0] - error, point[1]], [point[0] + error, point[1]])
                }
            };
            surface.draw_segment(lo, hi, &whisker);
        }
        surface.draw_marker(point, &marker);
        return;
    }

    if series.sample_count() == 1 {
        surface.draw_marker(point, &series.style.effective_marker());
        return;
    }

    if index > 0 {
        let prev = series.point(index - 1);
        if let Some(area) = &series.style.area {
            let corners = match orientation {
                Orientation::Horizontal => [
                    prev,
                    point,
                    [point[0], area.baseline],
                    [prev[0], area.baseline],
                ],
                Orientation::Vertical => [
                    prev,
                    point,
                    [area.baseline, point[1]],
                    [area.baseline, prev[1]],
                ],
            };
            surface.fill_quad(corners, area);
        }
        if let Some(line) = &series.style.line {
            surface.draw_segment(prev, point, line);
        }
    }
    if let Some(marker) = &series.style.marker {
        surface.draw_marker(point, marker);
    }
}
