//! Meeting control signals: stdin commands plus OS shutdown signals

use std::io::BufRead;

use colored::Colorize;
use tokio::sync::mpsc;
use tracing::debug;

/// Commands that drive a live meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingSignal {
    /// Pause when running, resume when paused
    TogglePause,
    /// End the meeting and archive it
    End,
    /// SIGINT/SIGTERM; ends and archives like `End`
    Shutdown,
}

/// Map one line typed on stdin to a command
pub fn parse_command(line: &str) -> Option<MeetingSignal> {
    match line.trim().to_lowercase().as_str() {
        "p" | "pause" | "r" | "resume" => Some(MeetingSignal::TogglePause),
        "e" | "end" | "q" | "quit" | "stop" => Some(MeetingSignal::End),
        _ => None,
    }
}

/// Merges stdin commands and OS shutdown signals into one channel.
///
/// Closing stdin counts as `End`, so piped input always finishes the meeting.
pub struct MeetingSignalHandler {
    receiver: mpsc::Receiver<MeetingSignal>,
}

impl MeetingSignalHandler {
    /// Start listening on stdin and for SIGINT/SIGTERM
    pub async fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        spawn_shutdown_listeners(tx.clone())?;

        // A plain thread: a blocked stdin read must not hold up runtime shutdown
        std::thread::spawn(move || read_commands(std::io::stdin().lock(), tx));

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<MeetingSignal> {
        self.receiver.recv().await
    }
}

fn read_commands(input: impl BufRead, tx: mpsc::Sender<MeetingSignal>) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        match parse_command(&line) {
            Some(signal) => {
                if tx.blocking_send(signal).is_err() {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => eprintln!(
                "{} Unknown command {:?}: use p (pause/resume) or e (end)",
                "?".yellow(),
                line.trim()
            ),
        }
    }
    debug!("stdin closed");
    let _ = tx.blocking_send(MeetingSignal::End);
}

#[cfg(unix)]
fn spawn_shutdown_listeners(tx: mpsc::Sender<MeetingSignal>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let tx_int = tx.clone();
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        sigint.recv().await;
        debug!("received SIGINT");
        let _ = tx_int.send(MeetingSignal::Shutdown).await;
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        debug!("received SIGTERM");
        let _ = tx.send(MeetingSignal::Shutdown).await;
    });

    Ok(())
}

#[cfg(not(unix))]
fn spawn_shutdown_listeners(tx: mpsc::Sender<MeetingSignal>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("received Ctrl+C");
            let _ = tx.send(MeetingSignal::Shutdown).await;
        }
    });
    Ok(())
}
