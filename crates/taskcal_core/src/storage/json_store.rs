use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "todos.json";

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASKCAL_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskcal").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskcal")
            .join(STORE_FILE_NAME))
    }
}

/// Loads the persisted task list. A missing, unreadable, or malformed file
/// yields an empty list instead of an error so a damaged data file never
/// blocks startup.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(
                "could not read {}: {err}; starting with an empty task list",
                path.display()
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::warn!(
                "malformed task file {}: {err}; starting with an empty task list",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Rewrites the whole task list as a pretty-printed JSON array. Write
/// failures propagate so the caller can abort the in-progress edit.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(tasks)?;
    std::fs::write(path, content)?;
    Ok(())
}
