use crate::notify::Notifier;
use crate::store::{TaskStore, now_local};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

const STOP_CHECK_SLICE: Duration = Duration::from_millis(50);

/// Re-reads the task file and hands every due reminder to the notifier.
/// Purely a read: it never mutates the store, so a past-due reminder fires
/// again on the next check until the task is completed or the reminder is
/// cleared. Delivery failures are logged and skipped.
pub fn check_once(path: &Path, notifier: &dyn Notifier) {
    let store = TaskStore::open(path);
    for task in store.due_reminders(now_local()) {
        if let Err(err) = notifier.notify(&task) {
            tracing::warn!("reminder delivery failed for task {}: {err}", task.id);
        }
    }
}

/// Background reminder polling on a fixed interval, off the caller's
/// thread. The host (a GUI event loop, typically) spawns one of these at
/// startup; `stop` (or dropping the poller) shuts the thread down.
pub struct ReminderPoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderPoller {
    pub fn spawn(path: PathBuf, interval: Duration, notifier: Box<dyn Notifier>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                check_once(&path, notifier.as_ref());
                sleep_unless_stopped(interval, &stop_flag);
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ReminderPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// Sleeps in short slices so stop() does not have to wait out a full
// polling interval.
fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) {
    let mut remaining = total;
    while !stop.load(Ordering::Relaxed) && !remaining.is_zero() {
        let slice = remaining.min(STOP_CHECK_SLICE);
        std::thread::sleep(slice);
        remaining -= slice;
    }
}
