use crate::error::AppError;
use crate::model::Task;
use crate::notify::Notifier;
use notify_rust::Notification;

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, task: &Task) -> Result<(), AppError> {
        let mut notification = Notification::new();
        notification.summary(&format!("Reminder: {}", task.title));
        if !task.description.is_empty() {
            notification.body(&task.description);
        }

        notification
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
