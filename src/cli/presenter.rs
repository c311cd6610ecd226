//! CLI presenter for output formatting

use std::io::{self, BufRead, Write};

use chrono::{DateTime, Local, Utc};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::cost::format_currency;
use crate::domain::meeting::{ArchiveSummary, MeetingConfig, MeetingRecord};
use crate::domain::timing::{format_duration, TimerSnapshot};

const TREND_BAR_WIDTH: usize = 20;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for prefs list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Ask a yes/no question on stderr; anything but y/yes is no
    pub fn confirm(&self, question: &str) -> bool {
        eprint!("{} {} [y/N] ", "?".yellow(), question);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    /// Live line: `HH:MM:SS.cc  $cost`
    pub fn format_snapshot(&self, snapshot: &TimerSnapshot) -> String {
        format!(
            "{}  {}",
            format_duration(snapshot.elapsed_ms),
            format_currency(snapshot.cost).bold()
        )
    }

    /// Show a ticking snapshot
    pub fn show_snapshot(&self, snapshot: &TimerSnapshot, paused: bool) {
        let line = self.format_snapshot(snapshot);
        if paused {
            self.update_spinner(&format!("{}  {}", line, "paused".yellow()));
        } else {
            self.update_spinner(&line);
        }
    }

    /// Header printed when a meeting starts
    pub fn meeting_header(&self, config: &MeetingConfig) {
        eprintln!("{} {}", "●".red(), config.name().bold());
        eprintln!(
            "  {} attendees at {}/h avg, burning {}/h",
            config.attendee_count(),
            format_currency(config.average_hourly_rate()),
            format_currency(config.burn_rate())
        );
        eprintln!("  {}", "p = pause/resume, e = end".dimmed());
    }

    /// One row of `archive list`
    pub fn record_row(&self, record: &MeetingRecord) {
        println!(
            "{:>5}  {}  {}  {:>12}  {}",
            record.id.to_string().cyan(),
            format_timestamp(record.ended_at),
            format_duration(record.duration_milliseconds),
            format_currency(record.total_cost),
            record.name
        );
    }

    /// Full view of one archived meeting
    pub fn record_detail(&self, record: &MeetingRecord) {
        self.key_value("id", &record.id.to_string());
        self.key_value("name", &record.name);
        self.key_value("date", &format_date(&record.date));
        self.key_value("started", &format_timestamp(record.started_at));
        self.key_value("ended", &format_timestamp(record.ended_at));
        self.key_value("duration", &format_duration(record.duration_milliseconds));
        self.key_value("attendees", &record.attendee_count().to_string());
        self.key_value(
            "average rate",
            &format!("{}/h", format_currency(record.average_hourly_rate)),
        );
        self.key_value("total cost", &format_currency(record.total_cost));
        for name in &record.attendee_names {
            println!("  - {}", name);
        }
    }

    /// Totals plus a bar per meeting, oldest first
    pub fn summary(&self, summary: &ArchiveSummary) {
        self.key_value("meetings", &summary.meeting_count.to_string());
        self.key_value("total cost", &format_currency(summary.total_cost));
        self.key_value("total time", &format_duration(summary.total_duration_ms));
        self.key_value("average cost", &format_currency(summary.average_cost));
        self.key_value("average time", &format_duration(summary.average_duration_ms));
        if let Some(id) = summary.most_expensive {
            self.key_value("most expensive", &format!("#{}", id));
        }

        if summary.trend.is_empty() {
            return;
        }
        println!();
        let max = summary
            .trend
            .iter()
            .map(|p| p.total_cost)
            .fold(0.0_f64, f64::max);
        for point in &summary.trend {
            println!(
                "{}  {} {:>12}  {}",
                format_timestamp(point.ended_at),
                trend_bar(point.total_cost, max),
                format_currency(point.total_cost),
                point.name
            );
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bar proportional to `value / max`
fn trend_bar(value: f64, max: f64) -> String {
    let filled = if max > 0.0 {
        ((value / max) * TREND_BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(TREND_BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).cyan(),
        "░".repeat(TREND_BAR_WIDTH - filled)
    )
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|dt| format_date(&dt))
        .unwrap_or_else(|| epoch_ms.to_string())
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
