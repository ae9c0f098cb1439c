use chrono::Local;

/// Source of the wall-clock label stamped on each bubble.
pub trait Clock {
    fn time_label(&self) -> String;
}

/// Local time rendered like a browser's `toLocaleTimeString` (`3:04:05 PM`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn time_label(&self) -> String {
        Local::now().format("%-I:%M:%S %p").to_string()
    }
}
