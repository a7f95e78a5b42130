//! Maps scroll progress to a single clipped draw call.

use crate::scroll::Frame;
use crate::text::{TextDirection, TextSize, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle anchored at the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

/// One "draw this text here" request, clipped to `clip`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub text: String,
    pub style: TextStyle,
    pub origin: Point,
    pub clip: Rect,
}

/// A drawing target for draw instructions.
pub trait Surface {
    fn draw_text(&mut self, instruction: &DrawInstruction);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A draw call was issued.
    Drawn,
    /// Nothing visible changed since the last draw.
    Skipped,
    /// There is nothing to show.
    Empty,
}

/// Top-left corner of the text for the given progress.
///
/// Left-to-right text starts just past the right edge and travels left;
/// right-to-left text starts just before the left edge and travels right.
/// Either way it is fully gone after `text.width + container_width`.
pub fn draw_origin(
    scroll_offset: f64,
    container_width: f64,
    text: TextSize,
    viewport_height: f64,
    direction: TextDirection,
) -> Point {
    let x = match direction {
        TextDirection::LeftToRight => container_width - scroll_offset,
        TextDirection::RightToLeft => -text.width + scroll_offset,
    };
    Point {
        x,
        y: (viewport_height - text.height) / 2.0,
    }
}

/// Builds the draw instruction for `frame`.
///
/// `viewport_height` falls back to the text height, giving a clip of
/// `[0, container_width] x [0, text_height]`.
pub fn draw_instruction(frame: &Frame<'_>, viewport_height: Option<f64>) -> DrawInstruction {
    let height = viewport_height.unwrap_or(frame.text_size.height);
    DrawInstruction {
        text: frame.text.to_string(),
        style: frame.style.clone(),
        origin: draw_origin(
            frame.scroll_offset,
            frame.container_width,
            frame.text_size,
            height,
            frame.direction,
        ),
        clip: Rect::from_size(frame.container_width, height),
    }
}

/// Issues draw calls, skipping ones identical to the previous.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    last: Option<DrawInstruction>,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<S>(
        &mut self,
        instruction: Option<DrawInstruction>,
        surface: &mut S,
    ) -> RenderOutcome
    where
        S: Surface + ?Sized,
    {
        let Some(instruction) = instruction else {
            self.last = None;
            return RenderOutcome::Empty;
        };
        if self.last.as_ref() == Some(&instruction) {
            return RenderOutcome::Skipped;
        }
        surface.draw_text(&instruction);
        self.last = Some(instruction);
        RenderOutcome::Drawn
    }

    /// Forces the next render to draw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&DrawInstruction> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<DrawInstruction>);

    impl Surface for Recorder {
        fn draw_text(&mut self, instruction: &DrawInstruction) {
            self.0.push(instruction.clone());
        }
    }

    fn frame<'a>(style: &'a TextStyle, offset: f64, direction: TextDirection) -> Frame<'a> {
        Frame {
            text: "AB",
            style,
            scroll_offset: offset,
            container_width: 200.0,
            text_size: TextSize::new(20.0, 10.0),
            direction,
        }
    }

    #[test]
    fn ltr_starts_at_right_edge_and_moves_left() {
        let size = TextSize::new(20.0, 10.0);
        assert_eq!(draw_origin(0.0, 200.0, size, 10.0, TextDirection::LeftToRight).x, 200.0);
        assert_eq!(draw_origin(50.0, 200.0, size, 10.0, TextDirection::LeftToRight).x, 150.0);
        // Fully exited on the left.
        assert_eq!(draw_origin(220.0, 200.0, size, 10.0, TextDirection::LeftToRight).x, -20.0);
    }

    #[test]
    fn rtl_starts_left_of_viewport_and_moves_right() {
        let size = TextSize::new(20.0, 10.0);
        assert_eq!(draw_origin(0.0, 200.0, size, 10.0, TextDirection::RightToLeft).x, -20.0);
        assert_eq!(draw_origin(50.0, 200.0, size, 10.0, TextDirection::RightToLeft).x, 30.0);
        // Fully exited on the right.
        assert_eq!(draw_origin(220.0, 200.0, size, 10.0, TextDirection::RightToLeft).x, 200.0);
    }

    #[test]
    fn text_is_vertically_centred() {
        let size = TextSize::new(20.0, 10.0);
        assert_eq!(draw_origin(0.0, 200.0, size, 30.0, TextDirection::LeftToRight).y, 10.0);
        assert_eq!(draw_origin(0.0, 200.0, size, 10.0, TextDirection::RightToLeft).y, 0.0);
    }

    #[test]
    fn clip_defaults_to_text_height() {
        let style = TextStyle::default();
        let instruction = draw_instruction(&frame(&style, 0.0, TextDirection::LeftToRight), None);
        assert_eq!(instruction.clip, Rect::from_size(200.0, 10.0));
        assert_eq!(instruction.origin, Point { x: 200.0, y: 0.0 });

        let tall = frame(&style, 0.0, TextDirection::LeftToRight);
        let instruction = draw_instruction(&tall, Some(40.0));
        assert_eq!(instruction.clip.height, 40.0);
        assert_eq!(instruction.origin.y, 15.0);
    }

    #[test]
    fn identical_frames_draw_once() {
        let style = TextStyle::default();
        let mut renderer = FrameRenderer::new();
        let mut surface = Recorder::default();

        let first = draw_instruction(&frame(&style, 10.0, TextDirection::LeftToRight), None);
        assert_eq!(renderer.render(Some(first.clone()), &mut surface), RenderOutcome::Drawn);
        assert_eq!(renderer.render(Some(first), &mut surface), RenderOutcome::Skipped);

        let moved = draw_instruction(&frame(&style, 11.0, TextDirection::LeftToRight), None);
        assert_eq!(renderer.render(Some(moved), &mut surface), RenderOutcome::Drawn);

        let flipped = draw_instruction(&frame(&style, 11.0, TextDirection::RightToLeft), None);
        assert_eq!(renderer.render(Some(flipped), &mut surface), RenderOutcome::Drawn);
        assert_eq!(surface.0.len(), 3);
    }

    #[test]
    fn empty_and_invalidate_force_a_redraw() {
        let style = TextStyle::default();
        let mut renderer = FrameRenderer::new();
        let mut surface = Recorder::default();
        let instruction = draw_instruction(&frame(&style, 0.0, TextDirection::LeftToRight), None);

        renderer.render(Some(instruction.clone()), &mut surface);
        renderer.invalidate();
        assert_eq!(renderer.render(Some(instruction.clone()), &mut surface), RenderOutcome::Drawn);

        assert_eq!(renderer.render(None, &mut surface), RenderOutcome::Empty);
        assert!(renderer.last().is_none());
        assert_eq!(renderer.render(Some(instruction), &mut surface), RenderOutcome::Drawn);
        assert_eq!(surface.0.len(), 3);
    }
}
