use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    Break,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(self) -> bool {
        matches!(self, TimerMode::Break | TimerMode::LongBreak)
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerMode::Focus => "Focus",
            TimerMode::Break => "Break",
            TimerMode::LongBreak => "Long Break",
        };
        write!(f, "{label}")
    }
}

/// One completed countdown, as kept in the statistics history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: u64,
    pub mode: TimerMode,
    #[serde(default)]
    pub task_label: Option<String>,
}

impl SessionRecord {
    pub fn focus_at(duration_seconds: u64, task_label: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            duration_seconds,
            mode: TimerMode::Focus,
            task_label,
        }
    }
}

/// Live state of the countdown. `running` and `paused` are never both set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub mode: TimerMode,
    pub running: bool,
    pub paused: bool,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub sessions_completed: u64,
    pub current_session_index: u32,
}

impl TimerState {
    pub fn new_focus(total_seconds: u64) -> Self {
        Self {
            mode: TimerMode::Focus,
            running: false,
            paused: false,
            remaining_seconds: total_seconds,
            total_seconds,
            sessions_completed: 0,
            current_session_index: 1,
        }
    }

    /// Replace the current countdown with a fresh one for `mode`.
    pub fn arm(&mut self, mode: TimerMode, total_seconds: u64) {
        self.mode = mode;
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.remaining_seconds)
    }

    pub fn is_idle(&self) -> bool {
        !self.running && !self.paused
    }
}
