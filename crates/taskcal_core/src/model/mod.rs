mod task;

pub use task::{
    DATE_FORMAT, Priority, REMINDER_FORMAT, TIMESTAMP_FORMAT, Task, format_date, format_reminder,
    format_timestamp, parse_date, parse_reminder,
};
