use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

// Text layouts of the legacy data file. Changing any of these breaks
// compatibility with existing todos.json files.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const REMINDER_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

time::serde::format_description!(due_date_repr, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    reminder_repr,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]"
);
time::serde::format_description!(
    timestamp_repr,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// A single to-do record. Field order matches the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default, with = "due_date_repr::option")]
    pub due_date: Option<Date>,
    #[serde(default, with = "reminder_repr::option")]
    pub reminder: Option<PrimitiveDateTime>,
    pub completed: bool,
    #[serde(with = "timestamp_repr")]
    pub created_at: PrimitiveDateTime,
    #[serde(default, with = "timestamp_repr::option")]
    pub completed_at: Option<PrimitiveDateTime>,
}

impl Task {
    /// A non-completed task counts as overdue once its due date has passed.
    pub fn is_overdue(&self, today: Date) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Serialized as the capitalized variant name ("High", "Medium", "Low"),
/// matching the legacy data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(AppError::invalid_input(
                "priority must be high, medium, or low",
            )),
        }
    }
}

pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::invalid_input("date must be YYYY-MM-DD"))
}

pub fn parse_reminder(raw: &str) -> Result<PrimitiveDateTime, AppError> {
    PrimitiveDateTime::parse(raw.trim(), REMINDER_FORMAT)
        .map_err(|_| AppError::invalid_input("reminder must be YYYY-MM-DD HH:MM"))
}

pub fn format_date(date: Date) -> Result<String, AppError> {
    date.format(DATE_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn format_reminder(at: PrimitiveDateTime) -> Result<String, AppError> {
    at.format(REMINDER_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn format_timestamp(at: PrimitiveDateTime) -> Result<String, AppError> {
    at.format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
