//! Archive command handler

use std::path::Path;

use thiserror::Error;
use tokio::fs;

use crate::application::ports::{ArchiveStore, StoreError};
use crate::domain::meeting::{ArchiveSummary, MeetingRecord};

use super::args::ArchiveAction;
use super::presenter::Presenter;

/// Errors from archive subcommands
#[derive(Debug, Error)]
pub enum ArchiveCommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to export archive: {0}")]
    Export(String),
}

/// Handle archive subcommand
pub async fn handle_archive_command<A: ArchiveStore>(
    action: ArchiveAction,
    store: &A,
    presenter: &Presenter,
) -> Result<(), ArchiveCommandError> {
    match action {
        ArchiveAction::List => handle_list(store, presenter).await,
        ArchiveAction::Show { id } => {
            let record = store.get(id).await?;
            presenter.record_detail(&record);
            Ok(())
        }
        ArchiveAction::Clear { yes } => handle_clear(store, presenter, yes).await,
        ArchiveAction::Stats => {
            let records = store.list_all().await?;
            presenter.summary(&ArchiveSummary::from_records(&records));
            Ok(())
        }
        ArchiveAction::Export { output } => handle_export(store, presenter, output.as_deref()).await,
    }
}

async fn handle_list<A: ArchiveStore>(
    store: &A,
    presenter: &Presenter,
) -> Result<(), ArchiveCommandError> {
    let records = store.list_all().await?;
    if records.is_empty() {
        presenter.info("No archived meetings");
        return Ok(());
    }

    for record in &records {
        presenter.record_row(record);
    }
    Ok(())
}

async fn handle_clear<A: ArchiveStore>(
    store: &A,
    presenter: &Presenter,
    yes: bool,
) -> Result<(), ArchiveCommandError> {
    let count = store.list_all().await?.len();
    if count == 0 {
        presenter.info("Archive is already empty");
        return Ok(());
    }

    let question = format!("Delete all {} archived meetings? This cannot be undone.", count);
    if !yes && !presenter.confirm(&question) {
        presenter.info("Cancelled");
        return Ok(());
    }

    let removed = store.clear_all().await?;
    presenter.success(&format!("Removed {} meetings", removed));
    Ok(())
}

async fn handle_export<A: ArchiveStore>(
    store: &A,
    presenter: &Presenter,
    output: Option<&Path>,
) -> Result<(), ArchiveCommandError> {
    let records = store.list_all().await?;
    let json = to_json(&records)?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .await
                .map_err(|e| ArchiveCommandError::Export(format!("{}: {}", path.display(), e)))?;
            presenter.success(&format!(
                "Exported {} meetings to {}",
                records.len(),
                path.display()
            ));
        }
        None => presenter.output(&json),
    }
    Ok(())
}

/// Records as a pretty JSON array with camelCase fields
fn to_json(records: &[MeetingRecord]) -> Result<String, ArchiveCommandError> {
    serde_json::to_string_pretty(records).map_err(|e| ArchiveCommandError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meeting::NewMeetingRecord;
    use crate::infrastructure::SqliteArchiveStore;
    use chrono::DateTime;

    fn record(name: &str, ended_at: i64) -> NewMeetingRecord {
        NewMeetingRecord {
            name: name.to_string(),
            date: DateTime::from_timestamp_millis(ended_at).unwrap(),
            attendee_names: vec!["Ana".to_string()],
            average_hourly_rate: 100.0,
            duration_milliseconds: 900_000,
            total_cost: 25.0,
            started_at: ended_at - 900_000,
            ended_at,
        }
    }

    #[tokio::test]
    async fn export_writes_camel_case_json_array() {
        let store = SqliteArchiveStore::open_in_memory().unwrap();
        store.insert(record("One", 1_000)).await.unwrap();
        store.insert(record("Two", 2_000)).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        handle_archive_command(
            ArchiveAction::Export {
                output: Some(path.clone()),
            },
            &store,
            &Presenter::new(),
        )
        .await
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<MeetingRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Two");
        assert!(content.contains("durationMilliseconds"));
    }

    #[tokio::test]
    async fn clear_with_yes_empties_archive() {
        let store = SqliteArchiveStore::open_in_memory().unwrap();
        store.insert(record("One", 1_000)).await.unwrap();

        handle_archive_command(ArchiveAction::Clear { yes: true }, &store, &Presenter::new())
            .await
            .unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn show_missing_is_not_found() {
        let store = SqliteArchiveStore::open_in_memory().unwrap();
        let err = handle_archive_command(ArchiveAction::Show { id: 9 }, &store, &Presenter::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveCommandError::Store(StoreError::NotFound(9))));
    }
}
