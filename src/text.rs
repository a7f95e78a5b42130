//! Text measurement types shared by the engine and its hosts.

use serde::{Deserialize, Serialize};

/// Layout direction of the scrolled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    /// Text enters from the right edge and exits on the left.
    #[default]
    #[value(name = "ltr", alias = "left-to-right")]
    #[serde(alias = "ltr")]
    LeftToRight,
    /// Text enters from the left edge and exits on the right.
    #[value(name = "rtl", alias = "right-to-left")]
    #[serde(alias = "rtl")]
    RightToLeft,
}

/// Style descriptor handed to measurement and drawing as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub bold: bool,
}

/// Single-line pixel extent of a string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures a string as one unwrapped line.
pub trait TextMetrics {
    fn measure(&self, text: &str, style: &TextStyle, direction: TextDirection) -> TextSize;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, style: &TextStyle, direction: TextDirection) -> TextSize {
        (**self).measure(text, style, direction)
    }
}

/// Fixed-advance metrics: every char is `advance` pixels wide.
///
/// The style and direction do not influence the result; a terminal cell grid
/// renders every glyph at the same width regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
    pub line_height: f64,
}

impl MonospaceMetrics {
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, _style: &TextStyle, _direction: TextDirection) -> TextSize {
        TextSize::new(text.chars().count() as f64 * self.advance, self.line_height)
    }
}
