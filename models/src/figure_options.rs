//! Declared dimensions of a figure and the size hint derived from them.

use serde::{Deserialize, Serialize};

/// Points per inch used by the host when laying out embedded controls.
const POINTS_PER_INCH: f64 = 72.0;

/// Preferred control size, in points, reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeHint {
    pub width: f64,
    pub height: f64,
}

/// Style options a figure declares about itself.
///
/// Both dimensions are optional; plotting libraries frequently leave them
/// unset for responsive layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl FigureOptions {
    pub fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    /// Convert the declared pixel size into points at `dpi`.
    ///
    /// Returns `None` unless both width and height are declared.
    pub fn size_hint(&self, dpi: f64) -> Option<SizeHint> {
        let (width, height) = (self.width?, self.height?);
        Some(SizeHint {
            width: width * POINTS_PER_INCH / dpi,
            height: height * POINTS_PER_INCH / dpi,
        })
    }
}
