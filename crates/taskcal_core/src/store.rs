use crate::error::AppError;
use crate::model::{Priority, Task};
use crate::storage::json_store;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Fields supplied when creating a task. Everything except the title is
/// optional; the store fills in id, timestamps, and completion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<Date>,
    pub reminder: Option<PrimitiveDateTime>,
}

impl TaskDraft {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            reminder: None,
        }
    }
}

/// Priority filter with an explicit "no filter" sentinel, mirroring the
/// "All" choice a filter dropdown offers alongside the real priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl From<Option<Priority>> for PriorityFilter {
    fn from(priority: Option<Priority>) -> Self {
        match priority {
            Some(priority) => Self::Only(priority),
            None => Self::All,
        }
    }
}

/// Tri-state change for an optional field, so "leave it alone" and
/// "clear it" stay distinguishable in an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T: Copy> FieldPatch<T> {
    fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

/// Field-level changes for [`TaskStore::update`]. `None` / `Keep` leaves a
/// field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: FieldPatch<Date>,
    pub reminder: FieldPatch<PrimitiveDateTime>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub overdue: usize,
}

/// The task store: an owned, insertion-ordered task list backed by a JSON
/// file. Every mutator rewrites the whole file synchronously before
/// returning, so the in-memory list and the file never diverge. Single
/// user, single writer; the whole-file rewrite is the accepted scaling
/// limit at this data size.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Opens the store at `path`. A missing or damaged file starts an empty
    /// store rather than failing. Ids continue from the highest id on file
    /// and are never reused, so deleting and re-adding cannot collide.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let tasks = json_store::load_tasks(&path);
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            path,
            tasks,
            next_id,
        }
    }

    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::open(json_store::store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        let task = Task {
            id: self.next_id,
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            priority: draft.priority,
            due_date: draft.due_date,
            reminder: draft.reminder,
            completed: false,
            created_at: now_local(),
            completed_at: None,
        };

        self.tasks.push(task.clone());
        self.next_id += 1;
        self.persist()?;

        Ok(task)
    }

    /// Tasks matching both filters, in insertion order. An omitted status
    /// filter or [`PriorityFilter::All`] matches everything.
    pub fn filtered(&self, completed: Option<bool>, priority: PriorityFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| completed.is_none_or(|wanted| task.completed == wanted))
            .filter(|task| priority.admits(task.priority))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match on title or description. A blank
    /// needle matches everything.
    pub fn search(&self, needle: &str) -> Vec<Task> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self.tasks.clone();
        }

        self.tasks
            .iter()
            .filter(|task| {
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Non-completed tasks due within `[today, today + days]` inclusive,
    /// ascending by due date.
    pub fn upcoming(&self, days: i64) -> Vec<Task> {
        self.upcoming_on(today_local(), days)
    }

    pub fn upcoming_on(&self, today: Date, days: i64) -> Vec<Task> {
        let horizon = today + Duration::days(days);
        let mut hits: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !task.completed)
            .filter(|task| {
                task.due_date
                    .is_some_and(|due| due >= today && due <= horizon)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|task| task.due_date);
        hits
    }

    /// Tasks due on exactly `date`, in insertion order, regardless of
    /// completion state.
    pub fn tasks_on(&self, date: Date) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.due_date == Some(date))
            .cloned()
            .collect()
    }

    /// Non-completed tasks whose reminder is at or before `now`. The check
    /// is stateless: a past-due reminder is reported on every call until
    /// the task is completed or the reminder is cleared. De-duplicating
    /// repeat notifications is the caller's concern.
    pub fn due_reminders(&self, now: PrimitiveDateTime) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| !task.completed)
            .filter(|task| task.reminder.is_some_and(|at| at <= now))
            .cloned()
            .collect()
    }

    /// Number of tasks due per date, for the caller's calendar view.
    pub fn due_date_counts(&self) -> BTreeMap<Date, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            if let Some(due) = task.due_date {
                *counts.entry(due).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Applies `patch` to the task with the given id. Returns `Ok(false)`
    /// without persisting when no such task exists. Changing `completed`
    /// keeps `completed_at` in step: completing stamps it, reopening
    /// clears it.
    pub fn update(&mut self, id: u64, patch: TaskPatch) -> Result<bool, AppError> {
        let title = match patch.title {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(AppError::invalid_input("title is required"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        patch.due_date.apply(&mut task.due_date);
        patch.reminder.apply(&mut task.reminder);

        match patch.completed {
            Some(true) if !task.completed => {
                task.completed = true;
                task.completed_at = Some(now_local());
            }
            Some(false) => {
                task.completed = false;
                task.completed_at = None;
            }
            _ => {}
        }

        self.persist()?;
        Ok(true)
    }

    pub fn delete(&mut self, id: u64) -> Result<bool, AppError> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };

        self.tasks.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Aggregate counts, computed fresh on each call.
    pub fn stats(&self) -> Stats {
        self.stats_on(today_local())
    }

    pub fn stats_on(&self, today: Date) -> Stats {
        let mut stats = Stats {
            total: self.tasks.len(),
            ..Stats::default()
        };

        for task in &self.tasks {
            if task.completed {
                stats.completed += 1;
            }
            match task.priority {
                Priority::High => stats.high += 1,
                Priority::Medium => stats.medium += 1,
                Priority::Low => stats.low += 1,
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }

        stats.pending = stats.total - stats.completed;
        stats
    }

    fn persist(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}

/// Current local wall-clock time at whole-second precision. Timestamps
/// persist as `YYYY-MM-DD HH:MM:SS`, so anything finer than a second
/// would be lost on the next reload; dropping it up front keeps the
/// in-memory task identical to its persisted form.
pub fn now_local() -> PrimitiveDateTime {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    let time = now.time();
    let time = Time::from_hms(time.hour(), time.minute(), time.second()).unwrap_or(time);
    PrimitiveDateTime::new(now.date(), time)
}

pub fn today_local() -> Date {
    now_local().date()
}
