//! Horizontally scrolling text ("marquee") engine.
//!
//! Texts travel across a fixed-width viewport at a constant pixel velocity,
//! one after another, with a pause between them. The engine is driven by an
//! external frame clock and pulls measurements from a [`TextMetrics`]
//! provider; hosts pull draw instructions out of it once per frame.

pub mod config;
pub mod driver;
pub mod error;
pub mod marquee;
pub mod output;
pub mod render;
pub mod scroll;
pub mod text;

pub use config::MarqueeOptions;
pub use error::ConfigError;
pub use marquee::Marquee;
pub use render::{DrawInstruction, RenderOutcome, Surface};
pub use scroll::{PendingResume, ScrollPhase, ScrollSession, TickOutcome};
pub use text::{MonospaceMetrics, TextDirection, TextMetrics, TextSize, TextStyle};
