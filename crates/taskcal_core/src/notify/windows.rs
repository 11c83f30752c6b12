use crate::error::AppError;
use crate::model::Task;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct WindowsNotifier;

impl Notifier for WindowsNotifier {
    fn notify(&self, task: &Task) -> Result<(), AppError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(&format!("Reminder: {}", task.title))
            .text1(&task.description)
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
