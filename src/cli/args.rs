//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::{AttendeeRequest, ConfigureRequest};
use crate::domain::attendees::RoleGroupSpec;
use crate::infrastructure::logging::DEFAULT_LOG_LEVEL;

/// WasteWatch - live meeting cost timer
#[derive(Parser, Debug)]
#[command(name = "waste-watch")]
#[command(version)]
#[command(about = "Watch what your meetings cost, live, and keep an archive of them")]
#[command(long_about = None)]
pub struct Cli {
    /// Meeting archive database file
    #[arg(long = "archive", global = true, env = "WASTE_WATCH_ARCHIVE", value_name = "FILE")]
    pub archive_path: Option<PathBuf>,

    /// Preferences file
    #[arg(long = "prefs", global = true, env = "WASTE_WATCH_PREFS", value_name = "FILE")]
    pub prefs_path: Option<PathBuf>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a meeting and watch its cost (p = pause/resume, e = end)
    Start(StartArgs),
    /// Browse the meeting archive
    Archive {
        #[command(subcommand)]
        action: ArchiveAction,
    },
    /// Manage saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

/// Options for `start`. With no attendee flags the last saved setup is reused.
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Meeting name
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Average hourly rate per attendee (list and count modes)
    #[arg(short = 'r', long, value_name = "RATE", conflicts_with = "roles")]
    pub rate: Option<f64>,

    /// Attendee names, separated by commas or newlines
    #[arg(short = 'a', long, value_name = "NAMES", conflicts_with_all = ["count", "roles"])]
    pub attendees: Option<String>,

    /// Number of attendees
    #[arg(short = 'c', long, value_name = "N", conflicts_with = "roles")]
    pub count: Option<u32>,

    /// Role group; repeatable. Leave RATE empty to use the remembered rate
    #[arg(long = "role", value_name = "ROLE:RATE:COUNT")]
    pub roles: Vec<RoleGroupSpec>,
}

impl StartArgs {
    /// Translate flags into a configure request
    pub fn to_request(&self) -> ConfigureRequest {
        let attendees = if let Some(text) = &self.attendees {
            AttendeeRequest::List { text: text.clone() }
        } else if let Some(count) = self.count {
            AttendeeRequest::Simple { count }
        } else if !self.roles.is_empty() {
            AttendeeRequest::Detailed {
                groups: self.roles.clone(),
            }
        } else {
            AttendeeRequest::Saved
        };

        ConfigureRequest {
            name: self.name.clone(),
            hourly_rate: self.rate,
            attendees,
        }
    }
}

/// Archive action subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ArchiveAction {
    /// List archived meetings, most recent first
    List,
    /// Show one archived meeting
    Show {
        /// Meeting id
        id: i64,
    },
    /// Delete every archived meeting
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Totals, averages and the cost trend
    Stats,
    /// Write the archive as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Preference action subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsAction {
    /// Create preferences file with defaults
    Init,
    /// Set a preference
    Set {
        /// Preference key
        key: String,
        /// Preference value
        value: String,
    },
    /// Get a preference
    Get {
        /// Preference key
        key: String,
    },
    /// List all preferences
    List,
    /// Show preferences file path
    Path,
    /// Suggest a remembered role for a partial name
    SuggestRole {
        /// Start of the role name
        prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn start_args(argv: &[&str]) -> StartArgs {
        let mut full = vec!["waste-watch", "start"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Start(args) => args,
            other => panic!("expected start, got {:?}", other),
        }
    }

    #[test]
    fn start_without_flags_reuses_saved_setup() {
        let args = start_args(&[]);
        assert_eq!(args.to_request().attendees, AttendeeRequest::Saved);
        assert!(args.to_request().name.is_none());
    }

    #[test]
    fn start_with_attendee_list() {
        let args = start_args(&["-n", "Sync", "-r", "42.5", "-a", "Alice, Bob"]);
        let request = args.to_request();
        assert_eq!(request.name.as_deref(), Some("Sync"));
        assert_eq!(request.hourly_rate, Some(42.5));
        assert_eq!(
            request.attendees,
            AttendeeRequest::List {
                text: "Alice, Bob".to_string()
            }
        );
    }

    #[test]
    fn start_with_count() {
        let args = start_args(&["--count", "5"]);
        assert_eq!(args.to_request().attendees, AttendeeRequest::Simple { count: 5 });
    }

    #[test]
    fn start_with_repeated_roles() {
        let args = start_args(&["--role", "Engineer:100:2", "--role", "Manager::1"]);
        match args.to_request().attendees {
            AttendeeRequest::Detailed { groups } => {
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[1].hourly_rate, None);
            }
            other => panic!("expected detailed, got {:?}", other),
        }
    }

    #[test]
    fn attendee_modes_conflict() {
        let result = Cli::try_parse_from(["waste-watch", "start", "-a", "Ann", "-c", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn rate_conflicts_with_roles() {
        let result = Cli::try_parse_from([
            "waste-watch",
            "start",
            "-r",
            "40",
            "--role",
            "Engineer:100:2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_role_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["waste-watch", "start", "--role", "Engineer"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_paths_after_subcommand() {
        let cli = Cli::parse_from([
            "waste-watch",
            "archive",
            "list",
            "--archive",
            "/tmp/a.db",
            "--prefs",
            "/tmp/p.toml",
        ]);
        assert_eq!(cli.archive_path, Some(PathBuf::from("/tmp/a.db")));
        assert_eq!(cli.prefs_path, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn archive_clear_flag() {
        let cli = Cli::parse_from(["waste-watch", "archive", "clear", "--yes"]);
        assert!(matches!(
            cli.command,
            Commands::Archive {
                action: ArchiveAction::Clear { yes: true }
            }
        ));
    }

    #[test]
    fn prefs_set() {
        let cli = Cli::parse_from(["waste-watch", "prefs", "set", "hourly_rate", "75"]);
        if let Commands::Prefs {
            action: PrefsAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "hourly_rate");
            assert_eq!(value, "75");
        } else {
            panic!("Expected Prefs Set command");
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
