//! Pomodoro focus timer: a focus/break/long-break state machine with
//! persisted settings, capped session history and derived statistics.
//!
//! The [`timer::Engine`] is the entry point. It is driven either one second
//! at a time with `tick`, or against the wall clock with `pump`, and reports
//! what happened through [`timer::TimerEvent`]s.

pub mod logging;
pub mod models;
pub mod report;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod ticker;
pub mod timer;
pub mod tui;
pub mod utils;

pub use models::{SessionRecord, TimerMode, TimerState};
pub use settings::{SettingsError, SettingsPatch, SettingsStore, TimerSettings};
pub use stats::{Period, Statistics, StatsSummary};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use timer::{CompletionSummary, Engine, TimerEvent};
