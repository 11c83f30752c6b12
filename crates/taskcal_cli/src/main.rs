use clap::Parser;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskcal_cli::cli::{Cli, Command, parse_priority_filter, parse_status};
use taskcal_core::config::{Config, load_config_with_fallback};
use taskcal_core::error::AppError;
use taskcal_core::model::{Task, format_date, format_reminder, format_timestamp, parse_date,
    parse_reminder};
use taskcal_core::notify::notifier_from_env;
use taskcal_core::reminder;
use taskcal_core::storage::json_store;
use taskcal_core::store::{FieldPatch, TaskDraft, TaskPatch, TaskStore, today_local};
use time::Date;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn task_row(task: &Task, today: Date) -> Result<TaskRow, AppError> {
    let due = match task.due_date {
        Some(date) => format_date(date)?,
        None => "-".to_string(),
    };
    let status = if task.completed {
        "completed".to_string()
    } else if task.is_overdue(today) {
        "active (overdue)".to_string()
    } else {
        "active".to_string()
    };

    Ok(TaskRow {
        id: task.id,
        title: task.title.clone(),
        priority: task.priority.label(),
        due,
        status,
        created: format_timestamp(task.created_at)?,
    })
}

fn print_tasks(tasks: &[Task], json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let today = today_local();
    let rows = tasks
        .iter()
        .map(|task| task_row(task, today))
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", Table::new(rows).with(Style::sharp()));
    Ok(())
}

fn print_task(task: &Task, json: bool, verb: &str) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(task)?);
    } else {
        println!("{verb} task {}: {}", task.id, task.title);
    }
    Ok(())
}

fn resolve_store_path(config: &Config) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASKCAL_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    match config.data_file.as_ref() {
        Some(path) => Ok(path.clone()),
        None => json_store::store_path(),
    }
}

fn set_completed(store: &mut TaskStore, id: u64, completed: bool) -> Result<Task, AppError> {
    let patch = TaskPatch {
        completed: Some(completed),
        ..TaskPatch::default()
    };
    if !store.update(id, patch)? {
        return Err(AppError::task_not_found(id));
    }
    store
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::invalid_data("task missing after update"))
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARNING: {err}");
    }
    let config = loaded.config;
    let store_path = resolve_store_path(&config)?;

    match cli.command {
        Command::Add {
            title,
            description,
            priority,
            due,
            reminder,
        } => {
            let draft = TaskDraft {
                title,
                description,
                priority: priority.parse()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
                reminder: reminder.as_deref().map(parse_reminder).transpose()?,
            };

            let mut store = TaskStore::open(&store_path);
            let task = store.add(draft)?;
            print_task(&task, cli.json, "Added")?;
        }
        Command::List {
            status,
            priority,
            search,
        } => {
            let completed = parse_status(&status)?;
            let priority = parse_priority_filter(&priority)?;

            let store = TaskStore::open(&store_path);
            let mut tasks = store.filtered(completed, priority);
            if let Some(needle) = search.as_deref() {
                let matches: Vec<u64> = store.search(needle).iter().map(|task| task.id).collect();
                tasks.retain(|task| matches.contains(&task.id));
            }
            print_tasks(&tasks, cli.json)?;
        }
        Command::Upcoming { days } => {
            let days = days.unwrap_or_else(|| config.upcoming_window());
            let store = TaskStore::open(&store_path);
            print_tasks(&store.upcoming(days), cli.json)?;
        }
        Command::On { date } => {
            let date = parse_date(&date)?;
            let store = TaskStore::open(&store_path);
            print_tasks(&store.tasks_on(date), cli.json)?;
        }
        Command::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
            reminder,
            clear_reminder,
        } => {
            let due_date = if clear_due {
                FieldPatch::Clear
            } else {
                match due.as_deref() {
                    Some(raw) => FieldPatch::Set(parse_date(raw)?),
                    None => FieldPatch::Keep,
                }
            };
            let reminder = if clear_reminder {
                FieldPatch::Clear
            } else {
                match reminder.as_deref() {
                    Some(raw) => FieldPatch::Set(parse_reminder(raw)?),
                    None => FieldPatch::Keep,
                }
            };
            let patch = TaskPatch {
                title,
                description,
                priority: priority.as_deref().map(str::parse).transpose()?,
                due_date,
                reminder,
                completed: None,
            };

            let mut store = TaskStore::open(&store_path);
            if !store.update(id, patch)? {
                return Err(AppError::task_not_found(id));
            }
            let task = store
                .get(id)
                .cloned()
                .ok_or_else(|| AppError::invalid_data("task missing after update"))?;
            print_task(&task, cli.json, "Updated")?;
        }
        Command::Done { id } => {
            let mut store = TaskStore::open(&store_path);
            let task = set_completed(&mut store, id, true)?;
            print_task(&task, cli.json, "Completed")?;
        }
        Command::Reopen { id } => {
            let mut store = TaskStore::open(&store_path);
            let task = set_completed(&mut store, id, false)?;
            print_task(&task, cli.json, "Reopened")?;
        }
        Command::Delete { id } => {
            let mut store = TaskStore::open(&store_path);
            let task = store
                .get(id)
                .cloned()
                .ok_or_else(|| AppError::task_not_found(id))?;
            store.delete(id)?;
            print_task(&task, cli.json, "Deleted")?;
        }
        Command::Stats => {
            let store = TaskStore::open(&store_path);
            let stats = store.stats();
            if cli.json {
                let json = serde_json::json!({
                    "total": stats.total,
                    "completed": stats.completed,
                    "pending": stats.pending,
                    "high": stats.high,
                    "medium": stats.medium,
                    "low": stats.low,
                    "overdue": stats.overdue,
                });
                println!("{json}");
            } else {
                println!("Total: {}", stats.total);
                println!("Completed: {}", stats.completed);
                println!("Pending: {}", stats.pending);
                println!(
                    "High: {} | Medium: {} | Low: {}",
                    stats.high, stats.medium, stats.low
                );
                println!("Overdue: {}", stats.overdue);
            }
        }
        Command::Agenda => {
            let store = TaskStore::open(&store_path);
            let counts = store.due_date_counts();
            if cli.json {
                let mut entries = Vec::with_capacity(counts.len());
                for (date, count) in &counts {
                    entries.push(serde_json::json!({
                        "date": format_date(*date)?,
                        "tasks": count,
                    }));
                }
                println!("{}", serde_json::Value::Array(entries));
            } else if counts.is_empty() {
                println!("No due dates.");
            } else {
                for (date, count) in &counts {
                    println!("{}  {count} task(s)", format_date(*date)?);
                }
            }
        }
        Command::Remind { watch, interval } => {
            let notifier = notifier_from_env()?;
            let interval = interval
                .map(std::time::Duration::from_secs)
                .unwrap_or_else(|| config.poll_interval());

            if watch {
                loop {
                    reminder::check_once(&store_path, notifier.as_ref());
                    std::thread::sleep(interval);
                }
            }

            let store = TaskStore::open(&store_path);
            let due = store.due_reminders(taskcal_core::store::now_local());
            if cli.json {
                println!("{}", serde_json::to_string(&due)?);
            } else if due.is_empty() {
                println!("No reminders due.");
            } else {
                for task in &due {
                    let at = match task.reminder {
                        Some(at) => format_reminder(at)?,
                        None => "-".to_string(),
                    };
                    println!("Reminder due ({at}): {} [{}]", task.title, task.id);
                }
            }
            for task in &due {
                if let Err(err) = notifier.notify(task) {
                    eprintln!("WARNING: could not deliver reminder for task {}: {err}", task.id);
                }
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
