use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use scroll_marquee::config::Config;
use scroll_marquee::driver::{Command, Driver};
use scroll_marquee::output::{CellSurface, StatusLine, phase_class};
use scroll_marquee::Marquee;

fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Forwards stdin control lines to the driver until EOF.
async fn watch_stdin(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match Command::parse_line(&line) {
                Some(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                None => tracing::warn!(%line, "ignoring unrecognised command"),
            },
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "stdin closed");
                break;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();
    let config = Config::parse();

    let options = config.marquee_options()?;
    let metrics = config.metrics()?;
    let frame_interval = config.frame_interval()?;
    let width = config.viewport_width()?;

    let mut marquee = Marquee::new(options, metrics)?;
    marquee.layout(width, None);

    let (tx, rx) = mpsc::channel::<Command>(8);
    if config.watch_stdin {
        tokio::spawn(watch_stdin(tx.clone()));
    }
    let stop_tx = tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(Command::Stop).await;
        }
    });

    let mut status = StatusLine::new();
    if marquee.options().texts.is_empty() {
        if let Some(line) = status.update("", phase_class(marquee.phase()), "") {
            println!("{}", line);
        }
    }
    let driver = Driver::new(marquee, CellSurface::new(metrics.advance), frame_interval, rx);
    driver
        .run(|marquee, surface| {
            let tooltip = marquee.session().current_text().unwrap_or_default();
            let class = phase_class(marquee.phase());
            if let Some(line) = status.update(&surface.contents(), class, tooltip) {
                println!("{}", line);
            }
        })
        .await;

    tracing::info!("marquee stopped");
    Ok(())
}
