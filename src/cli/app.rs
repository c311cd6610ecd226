//! Main app runners

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Local;
use tokio::time::{interval, MissedTickBehavior};
use tracing::warn;

use crate::application::ports::ArchiveStore;
use crate::application::{
    ArchivedMeeting, ConfigureError, ConfigureMeetingUseCase, SessionError, SessionOrchestrator,
};
use crate::domain::error::PreferenceError;
use crate::domain::timing::{SystemClock, TimerSnapshot, TimerState, TICK_INTERVAL_MS};
use crate::infrastructure::{SqliteArchiveStore, XdgPreferenceStore};

use super::archive_cmd::handle_archive_command;
use super::args::{ArchiveAction, PrefsAction, StartArgs};
use super::prefs_cmd::handle_prefs_command;
use super::presenter::Presenter;
use super::signals::{MeetingSignal, MeetingSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Preference store at the given path, or the XDG default
pub fn preference_store(path: Option<PathBuf>) -> XdgPreferenceStore {
    path.map(XdgPreferenceStore::with_path).unwrap_or_default()
}

/// Open the archive at the given path, or the XDG default
pub fn open_archive(path: Option<PathBuf>) -> Result<SqliteArchiveStore, String> {
    let path = path.unwrap_or_else(SqliteArchiveStore::default_path);
    SqliteArchiveStore::open(&path).map_err(|e| e.to_string())
}

/// Configure a meeting, time it live and archive it when it ends
pub async fn run_meeting(
    args: StartArgs,
    prefs_path: Option<PathBuf>,
    archive_path: Option<PathBuf>,
) -> ExitCode {
    let mut presenter = Presenter::new();

    let use_case = ConfigureMeetingUseCase::new(preference_store(prefs_path));
    let configured = match use_case
        .configure(args.to_request(), Local::now().date_naive())
        .await
    {
        Ok(configured) => configured,
        Err(ConfigureError::Validation(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    if !configured.preferences_saved {
        presenter.warn("Could not save preferences for next time");
    }

    let archive = match open_archive(archive_path) {
        Ok(archive) => archive,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut signals = match MeetingSignalHandler::new().await {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut orchestrator = SessionOrchestrator::new(archive, Arc::new(SystemClock));
    presenter.meeting_header(&configured.config);
    let snapshot = match orchestrator.begin_session(configured.config) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let line = presenter.format_snapshot(&snapshot);
    presenter.start_spinner(&line);

    meeting_loop(&mut orchestrator, &mut signals, &presenter).await;
    presenter.stop_spinner();

    let result = match orchestrator.end_session().await {
        Err(SessionError::Archive { record, source }) => {
            presenter.warn(&format!("Archiving failed ({}), retrying", source));
            orchestrator.retry_archive(*record).await
        }
        other => other,
    };

    match result {
        Ok(archived) => {
            report_archived(&presenter, &archived);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(SessionError::Archive { record, source }) => {
            presenter.error(&format!("Meeting was not archived: {}", source));
            presenter.output(&format!(
                "{}  {}",
                record.name,
                presenter.format_snapshot(&TimerSnapshot {
                    elapsed_ms: record.duration_milliseconds,
                    cost: record.total_cost,
                })
            ));
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Tick the display until the user or the OS ends the meeting
async fn meeting_loop<A: ArchiveStore>(
    orchestrator: &mut SessionOrchestrator<A>,
    signals: &mut MeetingSignalHandler,
    presenter: &Presenter,
) {
    let mut ticker = interval(StdDuration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(snapshot) = orchestrator.tick() {
                    presenter.show_snapshot(&snapshot, false);
                }
            }
            signal = signals.recv() => {
                match signal {
                    Some(MeetingSignal::TogglePause) => {
                        let snapshot = orchestrator.toggle();
                        let paused = orchestrator.state() == TimerState::Paused;
                        presenter.show_snapshot(&snapshot, paused);
                    }
                    Some(MeetingSignal::End) | None => break,
                    Some(MeetingSignal::Shutdown) => {
                        warn!("shutdown requested, ending meeting");
                        break;
                    }
                }
            }
        }
    }
}

fn report_archived(presenter: &Presenter, archived: &ArchivedMeeting) {
    presenter.success(&format!("Meeting archived as #{}", archived.id));
    presenter.output(&format!(
        "{}  {}",
        archived.record.name,
        presenter.format_snapshot(&TimerSnapshot {
            elapsed_ms: archived.record.duration_milliseconds,
            cost: archived.record.total_cost,
        })
    ));
}

/// Run an archive subcommand
pub async fn run_archive_command(
    action: ArchiveAction,
    archive_path: Option<PathBuf>,
) -> ExitCode {
    let presenter = Presenter::new();
    let store = match open_archive(archive_path) {
        Ok(store) => store,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match handle_archive_command(action, &store, &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run a prefs subcommand
pub async fn run_prefs_command(action: PrefsAction, prefs_path: Option<PathBuf>) -> ExitCode {
    let presenter = Presenter::new();
    match handle_prefs_command(action, preference_store(prefs_path), &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e @ PreferenceError::ValidationError { .. }) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_USAGE_ERROR)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
