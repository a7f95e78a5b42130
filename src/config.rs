use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use unescape::unescape;

use crate::error::ConfigError;
use crate::text::{MonospaceMetrics, TextDirection, TextStyle};

/// Default scroll velocity in pixels per second.
pub const DEFAULT_SPEED: f64 = 50.0;
/// Default pause between two texts, in seconds.
pub const DEFAULT_PAUSE_SECS: f64 = 1.5;
/// Highest accepted frame rate; keeps the frame interval at 1ms or more.
pub const MAX_FPS: u32 = 1000;
/// Widest accepted viewport, in pixels.
pub const MAX_VIEWPORT_WIDTH: f64 = 100_000.0;

/// Engine options for one marquee instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarqueeOptions {
    pub texts: Vec<String>,
    pub style: TextStyle,
    /// Pixels per second.
    pub scroll_speed: f64,
    /// Seconds to hold each new text before it starts moving.
    pub pause_secs: f64,
    pub direction: TextDirection,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            texts: Vec::new(),
            style: TextStyle::default(),
            scroll_speed: DEFAULT_SPEED,
            pause_secs: DEFAULT_PAUSE_SECS,
            direction: TextDirection::default(),
        }
    }
}

impl MarqueeOptions {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, scroll_speed: f64) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    pub fn with_pause_secs(mut self, pause_secs: f64) -> Self {
        self.pause_secs = pause_secs;
        self
    }

    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Rejects values that would freeze or run away the animation.
    /// Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scroll_speed.is_finite() || self.scroll_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.scroll_speed));
        }
        if !self.pause_secs.is_finite() || self.pause_secs < 0.0 {
            return Err(ConfigError::InvalidPause(self.pause_secs));
        }
        Ok(())
    }

    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn pause_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.pause_secs).unwrap_or_default()
    }

    /// Reads options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration parsed from command-line arguments.
#[derive(Debug, Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Texts to cycle through (escape sequences such as \t are expanded)
    pub texts: Vec<String>,
    /// JSON options file; command-line values take precedence
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,
    /// Scroll speed in pixels per second [default: 50]
    #[arg(short = 's', long = "speed")]
    pub speed: Option<f64>,
    /// Pause between texts in seconds [default: 1.5]
    #[arg(short = 'p', long = "pause", allow_negative_numbers = true)]
    pub pause: Option<f64>,
    /// Scroll direction
    #[arg(short = 'd', long = "direction", value_enum)]
    pub direction: Option<TextDirection>,
    /// Text style as JSON, e.g. '{"color": "#ffffff", "bold": true}'
    #[arg(long = "style")]
    pub style_json: Option<String>,
    /// Viewport width in pixels
    #[arg(short = 'w', long = "width", default_value_t = 320.0, allow_negative_numbers = true)]
    pub width: f64,
    /// Width of one output cell in pixels
    #[arg(long = "cell-width", default_value_t = 8.0)]
    pub cell_width: f64,
    /// Line height in pixels
    #[arg(long = "line-height", default_value_t = 16.0)]
    pub line_height: f64,
    /// Frames per second driving the animation
    #[arg(long = "fps", default_value_t = 30)]
    pub fps: u32,
    /// Read commands from stdin (width=<px>, dir=ltr|rtl, or texts separated by '|')
    #[arg(long = "watch-stdin", default_value_t = false, action = clap::ArgAction::SetTrue)]
    pub watch_stdin: bool,
}

impl Config {
    /// Parse arguments from the process command line.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Layers the options file (if any) under the command-line values.
    pub fn marquee_options(&self) -> Result<MarqueeOptions, ConfigError> {
        let mut options = match &self.config_file {
            Some(path) => MarqueeOptions::from_file(path)?,
            None => MarqueeOptions::default(),
        };
        if !self.texts.is_empty() {
            options.texts = self
                .texts
                .iter()
                .map(|t| unescape(t).ok_or_else(|| ConfigError::Escape(t.clone())))
                .collect::<Result<_, _>>()?;
        }
        if let Some(speed) = self.speed {
            options.scroll_speed = speed;
        }
        if let Some(pause) = self.pause {
            options.pause_secs = pause;
        }
        if let Some(direction) = self.direction {
            options.direction = direction;
        }
        if let Some(json) = &self.style_json {
            options.style = serde_json::from_str(json).map_err(ConfigError::Style)?;
        }
        options.validate()?;
        Ok(options)
    }

    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.fps > MAX_FPS {
            return Err(ConfigError::FrameRateTooHigh(self.fps));
        }
        Ok(Duration::from_secs(1) / self.fps)
    }

    pub fn metrics(&self) -> Result<MonospaceMetrics, ConfigError> {
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(ConfigError::InvalidCellWidth(self.cell_width));
        }
        Ok(MonospaceMetrics::new(self.cell_width, self.line_height))
    }

    pub fn viewport_width(&self) -> Result<f64, ConfigError> {
        if !self.width.is_finite() || !(0.0..=MAX_VIEWPORT_WIDTH).contains(&self.width) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        Ok(self.width)
    }
}
