use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use scroll_marquee::driver::{Command, Driver};
use scroll_marquee::output::CellSurface;
use scroll_marquee::{
    DrawInstruction, Marquee, MarqueeOptions, MonospaceMetrics, ScrollPhase, Surface,
    TextDirection,
};
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

const METRICS: MonospaceMetrics = MonospaceMetrics {
    advance: 10.0,
    line_height: 12.0,
};

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    index: Option<usize>,
    phase: ScrollPhase,
    row: String,
}

const FRAME: Duration = Duration::from_millis(10);

type CellDriver = Driver<MonospaceMetrics, CellSurface>;

fn options(pause_secs: f64) -> MarqueeOptions {
    MarqueeOptions::new(["AB", "CDE"])
        .with_speed(100.0)
        .with_pause_secs(pause_secs)
}

fn driver(pause_secs: f64) -> (CellDriver, mpsc::Sender<Command>) {
    let mut marquee = Marquee::new(options(pause_secs), METRICS).unwrap();
    marquee.layout(200.0, None);
    let (tx, rx) = mpsc::channel(8);
    let driver = Driver::new(marquee, CellSurface::new(METRICS.advance), FRAME, rx);
    (driver, tx)
}

fn snapshot(marquee: &Marquee<MonospaceMetrics>, surface: &CellSurface) -> Snapshot {
    Snapshot {
        index: marquee.session().current_index(),
        phase: marquee.phase(),
        row: surface.contents(),
    }
}

#[tokio::test(start_paused = true)]
async fn scrolls_pauses_and_advances() {
    let (driver, tx) = driver(1.0);
    let mut frames = Vec::new();

    let control = async {
        sleep(Duration::from_millis(3_600)).await;
        tx.send(Command::Stop).await.unwrap();
    };
    let ((marquee, _), ()) = tokio::join!(
        driver.run(|m, s| frames.push(snapshot(m, s))),
        control
    );

    // First frame: "AB" parked just right of the viewport.
    assert_eq!(frames[0].index, Some(0));
    assert_eq!(frames[0].row, " ".repeat(20));

    // Somewhere in the middle "AB" is fully visible.
    assert!(frames.iter().any(|f| f.index == Some(0) && f.row.contains("AB")));

    // After ~2.2s the second text is shown, parked, during the pause.
    let paused = frames
        .iter()
        .position(|f| f.index == Some(1))
        .expect("second text should appear");
    assert_eq!(frames[paused].phase, ScrollPhase::Paused);
    assert_eq!(frames[paused].row, " ".repeat(20));

    // After the pause it scrolls in.
    assert!(frames[paused..].iter().any(|f| f.index == Some(1) && f.row.contains('C')));

    assert_eq!(marquee.phase(), ScrollPhase::Uninitialized);
}

/// Counts draw calls while forwarding them to a real surface.
struct CountingSurface {
    inner: CellSurface,
    draws: Rc<Cell<usize>>,
}

impl Surface for CountingSurface {
    fn draw_text(&mut self, instruction: &DrawInstruction) {
        self.draws.set(self.draws.get() + 1);
        self.inner.draw_text(instruction);
    }
}

#[tokio::test(start_paused = true)]
async fn stop_during_pause_leaves_nothing_behind() {
    let draws = Rc::new(Cell::new(0));
    let surface = CountingSurface {
        inner: CellSurface::new(METRICS.advance),
        draws: Rc::clone(&draws),
    };
    let mut marquee = Marquee::new(options(5.0), METRICS).unwrap();
    marquee.layout(200.0, None);
    let (tx, rx) = mpsc::channel(8);
    let driver = Driver::new(marquee, surface, FRAME, rx);

    let started = Instant::now();
    let mut draws_at_stop = 0;
    let mut last_phase = None;
    let control = async {
        // First text finishes at ~2.2s; stop well inside the 5s pause.
        sleep(Duration::from_millis(3_000)).await;
        draws_at_stop = draws.get();
        tx.send(Command::Stop).await.unwrap();
    };
    let ((marquee, surface), ()) = tokio::join!(
        driver.run(|m, _| last_phase = Some(m.phase())),
        control
    );

    // The stop landed mid-pause and the run did not wait out the deadline.
    assert_eq!(last_phase, Some(ScrollPhase::Paused));
    assert!(started.elapsed() < Duration::from_millis(3_100));
    // No draw happened between the stop and the return.
    assert!(draws_at_stop > 0);
    assert_eq!(draws.get(), draws_at_stop);
    assert_eq!(surface.inner.contents(), " ".repeat(20));
    assert_eq!(marquee.phase(), ScrollPhase::Uninitialized);
    assert!(!marquee.is_clock_running());
}

#[tokio::test(start_paused = true)]
async fn commands_reconfigure_the_running_marquee() {
    let (driver, tx) = driver(1.0);
    let mut frames = Vec::new();

    let control = async {
        sleep(Duration::from_millis(500)).await;
        tx.send(Command::SetDirection(TextDirection::RightToLeft))
            .await
            .unwrap();
        sleep(Duration::from_millis(500)).await;
        tx.send(Command::Resize {
            width: 100.0,
            height: None,
        })
        .await
        .unwrap();
        sleep(Duration::from_millis(100)).await;
        drop(tx);
    };
    let ((marquee, surface), ()) = tokio::join!(
        driver.run(|m, s| frames.push(snapshot(m, s))),
        control
    );

    // The direction change restarted at the first text.
    assert!(frames.iter().all(|f| f.index == Some(0)));
    // Rows are 10 cells wide once the viewport shrank.
    assert_eq!(frames.last().unwrap().row.chars().count(), 10);
    assert_eq!(surface.contents().chars().count(), 10);
    // Dropping the sender tears the marquee down.
    assert_eq!(marquee.phase(), ScrollPhase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn empty_texts_idle_until_texts_arrive() {
    let options = MarqueeOptions::new(Vec::<String>::new()).with_speed(100.0);
    let mut marquee = Marquee::new(options, METRICS).unwrap();
    marquee.layout(50.0, None);
    let (tx, rx) = mpsc::channel(8);
    let driver = Driver::new(marquee, CellSurface::new(METRICS.advance), FRAME, rx);
    let mut frames = Vec::new();

    let control = async {
        sleep(Duration::from_secs(1)).await;
        tx.send(Command::SetTexts(vec!["HI".to_string()])).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        tx.send(Command::Stop).await.unwrap();
    };
    tokio::join!(driver.run(|m, s| frames.push(snapshot(m, s))), control);

    assert!(!frames.is_empty());
    assert!(frames.iter().all(|f| f.index == Some(0)));
    assert!(frames.iter().any(|f| f.row.contains("HI")));
}
