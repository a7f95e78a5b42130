//! Async host loop: frame clock, pause timer and control commands.

use std::future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior, Sleep};

use crate::config::MAX_VIEWPORT_WIDTH;
use crate::marquee::Marquee;
use crate::render::{RenderOutcome, Surface};
use crate::scroll::{PendingResume, TickOutcome};
use crate::text::{TextDirection, TextMetrics, TextStyle};

/// Control messages accepted while a marquee runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize { width: f64, height: Option<f64> },
    SetTexts(Vec<String>),
    SetStyle(TextStyle),
    SetDirection(TextDirection),
    Stop,
}

impl Command {
    /// Parses one line of the stdin control protocol.
    ///
    /// `width=<px>` resizes (out-of-range widths are dropped), `dir=ltr|rtl`
    /// flips direction, `stop` tears the marquee down, anything else replaces
    /// the texts (split on `|`).
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }
        if let Some(width) = line.strip_prefix("width=") {
            return width
                .trim()
                .parse()
                .ok()
                .filter(|width: &f64| (0.0..=MAX_VIEWPORT_WIDTH).contains(width))
                .map(|width| Command::Resize {
                    width,
                    height: None,
                });
        }
        if let Some(dir) = line.strip_prefix("dir=") {
            return match dir.trim() {
                "ltr" => Some(Command::SetDirection(TextDirection::LeftToRight)),
                "rtl" => Some(Command::SetDirection(TextDirection::RightToLeft)),
                _ => None,
            };
        }
        if line.trim() == "stop" {
            return Some(Command::Stop);
        }
        Some(Command::SetTexts(
            line.split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}

type PendingPause = Option<(PendingResume, Pin<Box<Sleep>>)>;

/// Owns a marquee and its surface and animates them on the current task.
pub struct Driver<M, S> {
    marquee: Marquee<M>,
    surface: S,
    frame_interval: Duration,
    commands: mpsc::Receiver<Command>,
}

impl<M, S> Driver<M, S>
where
    M: TextMetrics,
    S: Surface,
{
    pub fn new(
        marquee: Marquee<M>,
        surface: S,
        frame_interval: Duration,
        commands: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            marquee,
            surface,
            frame_interval,
            commands,
        }
    }

    /// Runs until [`Command::Stop`] arrives or every sender is dropped.
    ///
    /// `on_draw` is called after each render that actually drew. On return
    /// the marquee is torn down and no timer is left behind.
    pub async fn run<F>(self, mut on_draw: F) -> (Marquee<M>, S)
    where
        F: FnMut(&Marquee<M>, &S),
    {
        let Self {
            mut marquee,
            mut surface,
            frame_interval,
            mut commands,
        } = self;

        let clock_origin = Instant::now();
        let mut frames = time::interval(frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut pause: PendingPause = None;

        marquee.start();
        redraw(&mut marquee, &mut surface, &mut on_draw);

        loop {
            tokio::select! {
                _ = frames.tick(), if marquee.is_clock_running() => {
                    let outcome = marquee.tick(clock_origin.elapsed());
                    if let TickOutcome::CycleCompleted(ticket) = outcome {
                        pause = Some((ticket, Box::pin(time::sleep(ticket.duration()))));
                    }
                    redraw(&mut marquee, &mut surface, &mut on_draw);
                }
                ticket = wait_for_pause(&mut pause) => {
                    pause = None;
                    if marquee.resume(ticket) {
                        frames.reset();
                    }
                    redraw(&mut marquee, &mut surface, &mut on_draw);
                }
                command = commands.recv() => {
                    match command {
                        None | Some(Command::Stop) => break,
                        Some(Command::Resize { width, height }) => {
                            tracing::debug!(width, "viewport resized");
                            marquee.layout(width, height);
                        }
                        Some(Command::SetTexts(texts)) => {
                            pause = None;
                            marquee.set_texts(texts);
                        }
                        Some(Command::SetStyle(style)) => {
                            pause = None;
                            marquee.set_style(style);
                        }
                        Some(Command::SetDirection(direction)) => {
                            pause = None;
                            marquee.set_direction(direction);
                        }
                    }
                    redraw(&mut marquee, &mut surface, &mut on_draw);
                }
            }
        }

        drop(pause);
        marquee.stop();
        (marquee, surface)
    }
}

fn redraw<M, S, F>(marquee: &mut Marquee<M>, surface: &mut S, on_draw: &mut F)
where
    M: TextMetrics,
    S: Surface,
    F: FnMut(&Marquee<M>, &S),
{
    if marquee.render(surface) == RenderOutcome::Drawn {
        on_draw(marquee, surface);
    }
}

async fn wait_for_pause(pause: &mut PendingPause) -> PendingResume {
    match pause {
        Some((ticket, sleep)) => {
            sleep.as_mut().await;
            *ticket
        }
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_control_lines() {
        assert_eq!(
            Command::parse_line("width=240\n"),
            Some(Command::Resize {
                width: 240.0,
                height: None
            })
        );
        assert_eq!(
            Command::parse_line("dir=rtl"),
            Some(Command::SetDirection(TextDirection::RightToLeft))
        );
        assert_eq!(Command::parse_line("stop"), Some(Command::Stop));
        assert_eq!(
            Command::parse_line("one | two||three"),
            Some(Command::SetTexts(vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string()
            ]))
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(Command::parse_line(""), None);
        assert_eq!(Command::parse_line("   "), None);
        assert_eq!(Command::parse_line("width=wide"), None);
        assert_eq!(Command::parse_line("dir=up"), None);
        assert_eq!(Command::parse_line("width=1e15"), None);
        assert_eq!(Command::parse_line("width=-5"), None);
        assert_eq!(Command::parse_line("width=NaN"), None);
    }
}
