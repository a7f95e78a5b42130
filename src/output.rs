//! Text-cell rendering and waybar-style JSON status lines.

use crate::render::{DrawInstruction, Surface};
use crate::scroll::ScrollPhase;

/// A single row of fixed-width cells acting as the drawing surface.
#[derive(Debug, Clone)]
pub struct CellSurface {
    advance: f64,
    cells: Vec<char>,
}

impl CellSurface {
    pub fn new(advance: f64) -> Self {
        Self {
            advance,
            cells: Vec::new(),
        }
    }

    /// Contents of the last draw, padded to the full viewport.
    pub fn contents(&self) -> String {
        self.cells.iter().collect()
    }
}

impl Surface for CellSurface {
    fn draw_text(&mut self, instruction: &DrawInstruction) {
        let clip = instruction.clip;
        let columns = if self.advance > 0.0 {
            (clip.width / self.advance).floor().max(0.0) as usize
        } else {
            0
        };
        self.cells.clear();
        self.cells.resize(columns, ' ');

        for (i, ch) in instruction.text.chars().enumerate() {
            let x = instruction.origin.x + i as f64 * self.advance - clip.x;
            let column = (x / self.advance).floor();
            if column < 0.0 {
                continue;
            }
            let column = column as usize;
            if column >= columns {
                break;
            }
            self.cells[column] = ch;
        }
    }
}

/// CSS class reported for a session phase.
pub fn phase_class(phase: ScrollPhase) -> &'static str {
    match phase {
        ScrollPhase::Uninitialized => "idle",
        ScrollPhase::PreStart | ScrollPhase::Paused => "paused",
        ScrollPhase::Scrolling => "scrolling",
    }
}

/// Builds JSON status lines, suppressing repeats.
#[derive(Debug, Default)]
pub struct StatusLine {
    last_output: String,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line to print, or `None` if it matches the previous one.
    pub fn update(&mut self, text: &str, class: &str, tooltip: &str) -> Option<String> {
        let json_output = serde_json::json!({
            "text": text,
            "class": class,
            "tooltip": tooltip,
        })
        .to_string();

        if self.last_output == json_output {
            return None;
        }
        self.last_output = json_output.clone();
        Some(json_output)
    }
}
