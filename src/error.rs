//! Errors surfaced while setting up a marquee.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("scroll speed must be a positive, finite number of pixels per second (got {0})")]
    InvalidSpeed(f64),
    #[error("pause duration must be a non-negative, finite number of seconds (got {0})")]
    InvalidPause(f64),
    #[error("frame rate must be at least 1 frame per second")]
    ZeroFrameRate,
    #[error(
        "frame rate must not exceed {max} frames per second (got {0})",
        max = crate::config::MAX_FPS
    )]
    FrameRateTooHigh(u32),
    #[error(
        "viewport width must be a finite number of pixels between 0 and {max} (got {0})",
        max = crate::config::MAX_VIEWPORT_WIDTH
    )]
    InvalidWidth(f64),
    #[error("cell width must be a positive, finite number of pixels (got {0})")]
    InvalidCellWidth(f64),
    #[error("invalid text style: {0}")]
    Style(#[source] serde_json::Error),
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid escape sequence in text {0:?}")]
    Escape(String),
}
