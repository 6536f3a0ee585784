use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stipple pattern for series connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashPattern {
    /// Solid continuous line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

/// Stroke styling for lines and series connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Rgb,
    /// Stroke width in pixels.
    pub width: u32,
    pub dash: DashPattern,
}

impl LineStyle {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            width: 1,
            dash: DashPattern::Solid,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }
}

/// Marker shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Cross,
    Triangle,
}

/// Marker styling for individual sample points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Rgb,
    /// Marker half-extent in pixels.
    pub size: u32,
    pub shape: MarkerShape,
}

impl MarkerStyle {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            size: 3,
            shape: MarkerShape::Circle,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Fill styling for area series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaStyle {
    pub fill: Rgb,
    /// Value-axis position the area extends to.
    pub baseline: f64,
}

impl AreaStyle {
    pub fn new(fill: Rgb) -> Self {
        Self {
            fill,
            baseline: 0.0,
        }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Complete drawing style for one series.
///
/// Any combination of line, marker, and fill may be present. A series whose
/// drawable length is one sample always renders as a marker; when no marker
/// style is set, one is derived from the line color so a lone sample never
/// degenerates to a zero-length line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerStyle>,
    pub area: Option<AreaStyle>,
}

impl SeriesStyle {
    pub fn line(color: Rgb) -> Self {
        Self {
            line: Some(LineStyle::new(color)),
            marker: None,
            area: None,
        }
    }

    pub fn markers(color: Rgb) -> Self {
        Self {
            line: None,
            marker: Some(MarkerStyle::new(color)),
            area: None,
        }
    }

    pub fn filled(color: Rgb, fill: Rgb) -> Self {
        Self {
            line: Some(LineStyle::new(color)),
            marker: None,
            area: Some(AreaStyle::new(fill)),
        }
    }

    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_area(mut self, area: AreaStyle) -> Self {
        self.area = Some(area);
        self
    }

    /// The marker used for a single-sample rendition of this series.
    pub fn effective_marker(&self) -> MarkerStyle {
        if let Some(marker) = self.marker {
            return marker;
        }
        let color = self.line.map(|l| l.color).unwrap_or(Rgb::BLACK);
        MarkerStyle::new(color)
    }
}
