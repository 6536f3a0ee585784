use colorgrad::Gradient;
use serde::{Deserialize, Serialize};

use crate::style::Rgb;

/// Color map options for assigning colors to ensemble realizations.
///
/// Curves are colored by sampling the gradient at evenly spaced positions,
/// so neighbouring realizations stay visually distinguishable even for large
/// ensembles.
///
/// # Recommendations
///
/// - **Default choice**: `Viridis` - perceptually uniform, colorblind-friendly
/// - **High contrast**: `Plasma`, `Inferno` - good for presentations
/// - **Traditional**: `Rainbow` - colorful but use with caution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMaps {
    /// Viridis - perceptually uniform, colorblind-friendly (default)
    #[default]
    Viridis,
    /// Plasma - perceptually uniform, high contrast
    Plasma,
    /// Inferno - perceptually uniform, dark background friendly
    Inferno,
    /// Turbo - perceptually uniform, vibrant colors
    Turbo,
    /// Cividis - colorblind-friendly, optimized for printing
    Cividis,
    /// Warm - warm color palette
    Warm,
    /// Cool - cool color palette
    Cool,
    /// Rainbow - traditional rainbow colors (use with caution)
    Rainbow,
    /// Spectral - diverging colormap
    Spectral,
}

impl ColorMaps {
    /// Map a normalized position in `[0.0, 1.0]` to a color.
    pub fn map(&self, value: f32) -> Rgb {
        let clamped_value = value.clamp(0.0, 1.0);

        // Note: colorgrad Color has r, g, b, a as f32 in range [0.0, 1.0]
        let color = match self {
            ColorMaps::Viridis => colorgrad::preset::viridis().at(clamped_value),
            ColorMaps::Plasma => colorgrad::preset::plasma().at(clamped_value),
            ColorMaps::Inferno => colorgrad::preset::inferno().at(clamped_value),
            ColorMaps::Turbo => colorgrad::preset::turbo().at(clamped_value),
            ColorMaps::Cividis => colorgrad::preset::cividis().at(clamped_value),
            ColorMaps::Warm => colorgrad::preset::warm().at(clamped_value),
            ColorMaps::Cool => colorgrad::preset::cool().at(clamped_value),
            ColorMaps::Rainbow => colorgrad::preset::rainbow().at(clamped_value),
            ColorMaps::Spectral => colorgrad::preset::spectral().at(clamped_value),
        };
        Rgb::new(
            (color.r * 255.0) as u8,
            (color.g * 255.0) as u8,
            (color.b * 255.0) as u8,
        )
    }

    /// Color for item `index` out of `count` evenly spaced samples.
    pub fn map_index(&self, index: usize, count: usize) -> Rgb {
        if count <= 1 {
            return self.map(0.0);
        }
        self.map(index as f32 / (count - 1) as f32)
    }
}

impl std::fmt::Display for ColorMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMaps::Viridis => write!(f, "Viridis"),
            ColorMaps::Plasma => write!(f, "Plasma"),
            ColorMaps::Inferno => write!(f, "Inferno"),
            ColorMaps::Turbo => write!(f, "Turbo"),
            ColorMaps::Cividis => write!(f, "Cividis"),
            ColorMaps::Warm => write!(f, "Warm"),
            ColorMaps::Cool => write!(f, "Cool"),
            ColorMaps::Rainbow => write!(f, "Rainbow"),
            ColorMaps::Spectral => write!(f, "Spectral"),
        }
    }
}
