//! Meeting configuration use case

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::attendees::{AttendeeInput, InputMode, RoleGroup, RoleGroupSpec};
use crate::domain::error::ValidationError;
use crate::domain::meeting::MeetingConfig;
use crate::domain::preferences::Preferences;

use super::ports::PreferenceStore;

/// Errors from configuring a meeting
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Attendees as requested by the user
#[derive(Debug, Clone, PartialEq)]
pub enum AttendeeRequest {
    /// Names separated by commas or newlines
    List { text: String },
    /// Head count
    Simple { count: u32 },
    /// Role groups; missing rates come from role-rate memory
    Detailed { groups: Vec<RoleGroupSpec> },
    /// Repeat the last saved setup in the last used mode
    Saved,
}

/// Input for configuring a meeting
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureRequest {
    /// Meeting name; saved or date-stamped default when absent
    pub name: Option<String>,
    /// Rate for list and simple modes; saved or 50.00 when absent
    pub hourly_rate: Option<f64>,
    pub attendees: AttendeeRequest,
}

/// Output of the configure use case
#[derive(Debug, Clone)]
pub struct ConfiguredMeeting {
    pub config: MeetingConfig,
    pub mode: InputMode,
    /// Whether the updated preferences were written back
    pub preferences_saved: bool,
}

/// Turns user input plus saved preferences into a meeting configuration,
/// then remembers what was used.
pub struct ConfigureMeetingUseCase<P>
where
    P: PreferenceStore,
{
    store: P,
}

impl<P> ConfigureMeetingUseCase<P>
where
    P: PreferenceStore,
{
    pub fn new(store: P) -> Self {
        Self { store }
    }

    /// Load preferences, falling back to empty ones when unreadable
    pub async fn load_preferences(&self) -> Preferences {
        self.try_load().await.unwrap_or_else(Preferences::empty)
    }

    /// Saved preferences, or `None` when the file exists but cannot be read
    async fn try_load(&self) -> Option<Preferences> {
        match self.store.load().await {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                warn!("ignoring unreadable preferences: {}", e);
                None
            }
        }
    }

    /// Build a meeting configuration and save the inputs as new defaults.
    /// A failed preference write is logged but does not reject the meeting.
    /// An unreadable preferences file is left untouched.
    pub async fn configure(
        &self,
        request: ConfigureRequest,
        today: NaiveDate,
    ) -> Result<ConfiguredMeeting, ConfigureError> {
        let loaded = self.try_load().await;
        let writable = loaded.is_some();
        let mut prefs = loaded.unwrap_or_else(Preferences::empty);

        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| prefs.meeting_name_or_default(today));
        let hourly_rate = request
            .hourly_rate
            .unwrap_or_else(|| prefs.hourly_rate_or_default());

        let input = self.resolve_input(request.attendees, hourly_rate, &prefs)?;
        if request.hourly_rate.is_some() && input.mode() == InputMode::Detailed {
            warn!("hourly rate ignored: role groups carry their own rates");
        }
        let config = input.normalize(&name)?;

        remember_inputs(&mut prefs, &name, &input);
        let preferences_saved = if writable {
            self.save_preferences(&prefs).await
        } else {
            warn!(
                path = %self.store.path().display(),
                "not overwriting unreadable preferences file"
            );
            false
        };

        Ok(ConfiguredMeeting {
            config,
            mode: input.mode(),
            preferences_saved,
        })
    }

    async fn save_preferences(&self, prefs: &Preferences) -> bool {
        match self.store.save(prefs).await {
            Ok(()) => {
                debug!(path = %self.store.path().display(), "preferences saved");
                true
            }
            Err(e) => {
                warn!("failed to save preferences: {}", e);
                false
            }
        }
    }

    /// Best remembered role for a partially typed role name
    pub async fn suggest_role(&self, prefix: &str) -> Option<(String, f64)> {
        let prefs = self.load_preferences().await;
        prefs
            .role_memory()
            .suggest(prefix)
            .map(|(role, rate)| (role.to_string(), rate))
    }

    fn resolve_input(
        &self,
        request: AttendeeRequest,
        hourly_rate: f64,
        prefs: &Preferences,
    ) -> Result<AttendeeInput, ValidationError> {
        let request = match request {
            AttendeeRequest::Saved => saved_request(prefs),
            other => other,
        };

        match request {
            AttendeeRequest::List { text } => Ok(AttendeeInput::List { text, hourly_rate }),
            AttendeeRequest::Simple { count } => Ok(AttendeeInput::Simple { count, hourly_rate }),
            AttendeeRequest::Detailed { groups } => {
                let memory = prefs.role_memory();
                let groups = groups
                    .iter()
                    .map(|spec| spec.resolve(&memory))
                    .collect::<Result<Vec<RoleGroup>, _>>()?;
                Ok(AttendeeInput::Detailed { groups })
            }
            AttendeeRequest::Saved => Err(ValidationError::NoAttendees),
        }
    }
}

/// Rebuild the last request from preferences
fn saved_request(prefs: &Preferences) -> AttendeeRequest {
    match prefs.mode_or_default() {
        InputMode::List => AttendeeRequest::List {
            text: prefs.attendees_or_default().to_string(),
        },
        InputMode::Simple => AttendeeRequest::Simple {
            count: prefs.attendee_count_or_default(),
        },
        InputMode::Detailed => AttendeeRequest::Detailed {
            groups: prefs.role_specs(),
        },
    }
}

/// Write the used inputs back as defaults for next time
fn remember_inputs(prefs: &mut Preferences, name: &str, input: &AttendeeInput) {
    prefs.meeting_name = Some(name.to_string());
    prefs.mode = Some(input.mode().to_string());

    match input {
        AttendeeInput::List { text, hourly_rate } => {
            prefs.attendees = Some(text.clone());
            prefs.hourly_rate = Some(*hourly_rate);
        }
        AttendeeInput::Simple { count, hourly_rate } => {
            prefs.attendee_count = Some(*count);
            prefs.hourly_rate = Some(*hourly_rate);
        }
        AttendeeInput::Detailed { groups } => {
            let mut memory = prefs.role_memory();
            for group in groups {
                memory.remember(&group.role_name, group.hourly_rate);
            }
            prefs.set_role_memory(memory);
            prefs.roles = Some(groups.iter().map(|g| g.to_string()).collect());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PreferenceError;
    use crate::infrastructure::XdgPreferenceStore;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPreferenceStore {
        prefs: Mutex<Preferences>,
        fail_save: AtomicBool,
    }

    impl MockPreferenceStore {
        fn with(prefs: Preferences) -> Self {
            Self {
                prefs: Mutex::new(prefs),
                fail_save: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl PreferenceStore for MockPreferenceStore {
        async fn load(&self) -> Result<Preferences, PreferenceError> {
            Ok(self.prefs.lock().unwrap().clone())
        }

        async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
            if self.fail_save.load(Ordering::SeqCst) {
                return Err(PreferenceError::WriteError("read-only".to_string()));
            }
            *self.prefs.lock().unwrap() = prefs.clone();
            Ok(())
        }

        fn path(&self) -> PathBuf {
            PathBuf::from("/mock/preferences.toml")
        }

        fn exists(&self) -> bool {
            true
        }

        async fn init(&self) -> Result<(), PreferenceError> {
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn stored(use_case: &ConfigureMeetingUseCase<MockPreferenceStore>) -> Preferences {
        use_case.store.prefs.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn defaults_apply_when_nothing_saved() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::default());
        let out = use_case
            .configure(
                ConfigureRequest {
                    name: None,
                    hourly_rate: None,
                    attendees: AttendeeRequest::List {
                        text: "Alice, Bob".to_string(),
                    },
                },
                today(),
            )
            .await
            .unwrap();

        assert_eq!(out.config.name(), "2024-06-01 - Staff Sync");
        assert_eq!(out.config.average_hourly_rate(), 50.0);
        assert_eq!(out.mode, InputMode::List);
        assert!(out.preferences_saved);

        let prefs = stored(&use_case);
        assert_eq!(prefs.attendees.as_deref(), Some("Alice, Bob"));
        assert_eq!(prefs.mode.as_deref(), Some("list"));
        assert_eq!(prefs.meeting_name.as_deref(), Some("2024-06-01 - Staff Sync"));
    }

    #[tokio::test]
    async fn saved_request_repeats_last_setup() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::with(Preferences {
            meeting_name: Some("Retro".to_string()),
            hourly_rate: Some(80.0),
            mode: Some("simple".to_string()),
            attendee_count: Some(4),
            ..Default::default()
        }));

        let out = use_case
            .configure(
                ConfigureRequest {
                    name: None,
                    hourly_rate: None,
                    attendees: AttendeeRequest::Saved,
                },
                today(),
            )
            .await
            .unwrap();

        assert_eq!(out.config.name(), "Retro");
        assert_eq!(out.config.attendee_count(), 4);
        assert_eq!(out.config.average_hourly_rate(), 80.0);
    }

    #[tokio::test]
    async fn saved_list_without_attendees_fails() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::default());
        let err = use_case
            .configure(
                ConfigureRequest {
                    name: Some("Sync".to_string()),
                    hourly_rate: None,
                    attendees: AttendeeRequest::Saved,
                },
                today(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ConfigureError::Validation(ValidationError::NoAttendees));
        assert_eq!(stored(&use_case), Preferences::default());
    }

    #[tokio::test]
    async fn detailed_mode_remembers_and_fills_role_rates() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::default());
        use_case
            .configure(
                ConfigureRequest {
                    name: Some("Design".to_string()),
                    hourly_rate: None,
                    attendees: AttendeeRequest::Detailed {
                        groups: vec![
                            "Engineer:100:2".parse().unwrap(),
                            "Manager:150:1".parse().unwrap(),
                        ],
                    },
                },
                today(),
            )
            .await
            .unwrap();

        let out = use_case
            .configure(
                ConfigureRequest {
                    name: Some("Design 2".to_string()),
                    hourly_rate: None,
                    attendees: AttendeeRequest::Detailed {
                        groups: vec!["eng::1".parse().unwrap(), "Manager::1".parse().unwrap()],
                    },
                },
                today(),
            )
            .await
            .unwrap();

        assert_eq!(out.config.average_hourly_rate(), 125.0);
        assert_eq!(out.config.attendee_names(), ["eng 1", "Manager 1"]);
        assert_eq!(
            use_case.suggest_role("man").await,
            Some(("Manager".to_string(), 150.0))
        );
    }

    #[tokio::test]
    async fn save_failure_is_not_fatal() {
        let store = MockPreferenceStore::default();
        store.fail_save.store(true, Ordering::SeqCst);
        let use_case = ConfigureMeetingUseCase::new(store);

        let out = use_case
            .configure(
                ConfigureRequest {
                    name: Some("Sync".to_string()),
                    hourly_rate: Some(20.0),
                    attendees: AttendeeRequest::Simple { count: 2 },
                },
                today(),
            )
            .await
            .unwrap();
        assert!(!out.preferences_saved);
        assert_eq!(out.config.attendee_count(), 2);
    }

    #[tokio::test]
    async fn malformed_preferences_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        let content = "hourly_rate = 65.0\nbogus = [\n\n[role_rates]\nEngineer = 100.0\nManager = 150.0\n";
        std::fs::write(&path, content).unwrap();

        let use_case = ConfigureMeetingUseCase::new(XdgPreferenceStore::with_path(&path));
        let out = use_case
            .configure(
                ConfigureRequest {
                    name: Some("Sync".to_string()),
                    hourly_rate: None,
                    attendees: AttendeeRequest::Simple { count: 2 },
                },
                today(),
            )
            .await
            .unwrap();

        assert!(!out.preferences_saved);
        assert_eq!(out.config.average_hourly_rate(), 50.0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[tokio::test]
    async fn rate_does_not_override_role_rates() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::default());
        let out = use_case
            .configure(
                ConfigureRequest {
                    name: Some("Design".to_string()),
                    hourly_rate: Some(10.0),
                    attendees: AttendeeRequest::Detailed {
                        groups: vec!["Engineer:100:1".parse().unwrap()],
                    },
                },
                today(),
            )
            .await
            .unwrap();
        assert_eq!(out.config.average_hourly_rate(), 100.0);
        assert_eq!(stored(&use_case).hourly_rate, None);
    }

    #[tokio::test]
    async fn blank_name_uses_default() {
        let use_case = ConfigureMeetingUseCase::new(MockPreferenceStore::default());
        let out = use_case
            .configure(
                ConfigureRequest {
                    name: Some("   ".to_string()),
                    hourly_rate: Some(10.0),
                    attendees: AttendeeRequest::Simple { count: 1 },
                },
                today(),
            )
            .await
            .unwrap();
        assert_eq!(out.config.name(), "2024-06-01 - Staff Sync");
    }
}
