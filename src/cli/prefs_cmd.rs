//! Prefs command handler

use crate::application::ports::PreferenceStore;
use crate::application::ConfigureMeetingUseCase;
use crate::domain::cost::format_currency;
use crate::domain::error::PreferenceError;
use crate::domain::preferences::PreferenceKey;

use super::args::PrefsAction;
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle prefs subcommand
pub async fn handle_prefs_command<S: PreferenceStore>(
    action: PrefsAction,
    store: S,
    presenter: &Presenter,
) -> Result<(), PreferenceError> {
    match action {
        PrefsAction::Init => handle_init(&store, presenter).await,
        PrefsAction::Set { key, value } => handle_set(&store, presenter, &key, &value).await,
        PrefsAction::Get { key } => handle_get(&store, presenter, &key).await,
        PrefsAction::List => handle_list(&store, presenter).await,
        PrefsAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
        PrefsAction::SuggestRole { prefix } => {
            let use_case = ConfigureMeetingUseCase::new(store);
            match use_case.suggest_role(&prefix).await {
                Some((role, rate)) => presenter.output(&format!("{}:{}", role, rate)),
                None => presenter.info(&format!("No remembered role starts with \"{}\"", prefix)),
            }
            Ok(())
        }
    }
}

async fn handle_init<S: PreferenceStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), PreferenceError> {
    store.init().await?;
    presenter.success(&format!(
        "Preferences file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: PreferenceStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), PreferenceError> {
    let key: PreferenceKey = key.parse()?;

    let mut prefs = store.load().await?;
    prefs.set(key, value)?;
    store.save(&prefs).await?;

    presenter.success(&format!(
        "{} = {}",
        key,
        prefs.get(key).unwrap_or_default()
    ));
    Ok(())
}

async fn handle_get<S: PreferenceStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), PreferenceError> {
    let key: PreferenceKey = key.parse()?;
    let prefs = store.load().await?;

    match prefs.get(key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }
    Ok(())
}

async fn handle_list<S: PreferenceStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), PreferenceError> {
    let prefs = store.load().await?;

    for key in PreferenceKey::all() {
        let value = prefs.get(*key);
        presenter.key_value(key.as_str(), value.as_deref().unwrap_or(NOT_SET));
    }

    let memory = prefs.role_memory();
    if !memory.is_empty() {
        presenter.output("role rates:");
        for (role, rate) in memory.iter() {
            presenter.output(&format!("  {} = {}/h", role, format_currency(rate)));
        }
    }
    Ok(())
}
