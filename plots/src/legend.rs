use crate::render::surface::DrawSurface;
use crate::style::SeriesStyle;

/// One legend row: a display name plus the style its symbol is drawn with.
///
/// Entries are registered through [`RenderConfig`](crate::render::RenderConfig)
/// once per series at the start of every render pass, before any data is
/// drawn. The set of entries always reflects the full series list of the
/// pass, whether or not the pass later runs to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: SeriesStyle,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, style: SeriesStyle) -> Self {
        Self {
            label: label.into(),
            style,
        }
    }

    /// Draw this entry's symbol at a data-space position.
    ///
    /// Line-styled series get a short horizontal stroke, everything else a
    /// marker, so the symbol matches what the series looks like in the plot.
    pub fn draw_symbol(&self, surface: &mut dyn DrawSurface, at: [f64; 2], half_width: f64) {
        if let Some(line) = self.style.line {
            surface.draw_segment([at[0] - half_width, at[1]], [at[0] + half_width, at[1]], &line);
        } else {
            surface.draw_marker(at, &self.style.effective_marker());
        }
    }
}

/// Callback invoked once per series per render pass.
pub type LegendCallback = Box<dyn FnMut(&LegendEntry)>;
