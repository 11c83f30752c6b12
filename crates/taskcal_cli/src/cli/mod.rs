use clap::{Parser, Subcommand};
use taskcal_core::error::AppError;
use taskcal_core::model::Priority;
use taskcal_core::store::PriorityFilter;

#[derive(Parser, Debug)]
#[command(name = "taskcal", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskcal add "Buy milk" --priority high --due 2024-01-10
    Add {
        title: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
        /// high, medium, or low
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Reminder (YYYY-MM-DD HH:MM, 24-hour)
        #[arg(long)]
        reminder: Option<String>,
    },
    /// List tasks with optional filters
    ///
    /// Example: taskcal list --status active --priority high --search milk
    List {
        /// all, active, or completed
        #[arg(long, default_value = "all")]
        status: String,
        /// all, high, medium, or low
        #[arg(long, default_value = "all")]
        priority: String,
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
    },
    /// List non-completed tasks due within the coming window
    ///
    /// Example: taskcal upcoming --days 7
    Upcoming {
        /// Window size in days, counted forward from today inclusive
        #[arg(long)]
        days: Option<i64>,
    },
    /// List tasks due on an exact date
    ///
    /// Example: taskcal on 2024-01-10
    On { date: String },
    /// Edit fields of a task; omitted fields are left untouched
    ///
    /// Example: taskcal edit 1 --title "Buy oat milk" --clear-reminder
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// high, medium, or low
        #[arg(long)]
        priority: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        /// New reminder (YYYY-MM-DD HH:MM)
        #[arg(long)]
        reminder: Option<String>,
        /// Remove the reminder
        #[arg(long, conflicts_with = "reminder")]
        clear_reminder: bool,
    },
    /// Mark a task completed
    Done { id: u64 },
    /// Mark a completed task active again
    Reopen { id: u64 },
    /// Delete a task permanently
    Delete { id: u64 },
    /// Show task counts by status, priority, and overdue state
    Stats,
    /// Show how many tasks are due on each date
    Agenda,
    /// Report reminders that are due now
    ///
    /// Example: taskcal remind
    /// Example: taskcal remind --watch --interval 60
    Remind {
        /// Keep polling at a fixed interval instead of checking once
        #[arg(long)]
        watch: bool,
        /// Poll interval in seconds (with --watch)
        #[arg(long)]
        interval: Option<u64>,
    },
}

/// Maps the status filter words to the store's optional completed flag.
pub fn parse_status(raw: &str) -> Result<Option<bool>, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" => Ok(None),
        "active" | "pending" => Ok(Some(false)),
        "completed" | "done" => Ok(Some(true)),
        _ => Err(AppError::invalid_input(
            "status must be all, active, or completed",
        )),
    }
}

/// "all" is the no-filter sentinel; anything else must be a real priority.
pub fn parse_priority_filter(raw: &str) -> Result<PriorityFilter, AppError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(PriorityFilter::All);
    }
    Ok(PriorityFilter::Only(raw.parse::<Priority>()?))
}
