use crate::models::{SessionRecord, TimerMode};
use crate::storage::{stored_field, KeyValueStore, STATISTICS_KEY};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HISTORY_LIMIT: usize = 50;
pub const RECENT_LIMIT: usize = 10;

const DAILY_GOAL_SECONDS: u64 = 8 * 3600;
const WEEKLY_GOAL_SECONDS: u64 = 10 * 3600;

const KNOWN_FIELDS: [&str; 5] = [
    "total_focus_seconds",
    "completed_focus_sessions",
    "current_streak_days",
    "last_active_date",
    "history",
];

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl Period {
    fn includes(self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        match self {
            Period::Today => local_date(record.timestamp) == local_date(now),
            Period::Week => record.timestamp >= now - Duration::days(7),
            Period::Month => record.timestamp >= now - Duration::days(30),
            Period::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSummary {
    pub total_focus_seconds: u64,
    pub session_count: u64,
    pub average_session_minutes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub today_focus_seconds: u64,
    pub today_fraction: f64,
    /// Lifetime focus seconds; the weekly bar is not windowed.
    pub weekly_focus_seconds: u64,
    pub weekly_fraction: f64,
}

/// Capped session history plus lifetime counters.
///
/// The counters are incremented on every recorded session and never derived
/// from `history`, so they keep counting after the history starts evicting.
/// `query` only sees the history. The two diverge once more than
/// `HISTORY_LIMIT` sessions have been recorded.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_focus_seconds: u64,
    pub completed_focus_sessions: u64,
    pub current_streak_days: u32,
    pub last_active_date: Option<NaiveDate>,
    /// Most recent first.
    pub history: Vec<SessionRecord>,
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

fn fraction(value: u64, goal: u64) -> f64 {
    (value as f64 / goal as f64).min(1.0)
}

impl Statistics {
    pub fn record_focus_session(&mut self, duration_seconds: u64, task_label: Option<String>) {
        self.record_focus_session_at(duration_seconds, task_label, Utc::now());
    }

    pub fn record_focus_session_at(
        &mut self,
        duration_seconds: u64,
        task_label: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.history
            .insert(0, SessionRecord::focus_at(duration_seconds, task_label, now));
        self.history.truncate(HISTORY_LIMIT);

        self.total_focus_seconds += duration_seconds;
        self.completed_focus_sessions += 1;

        let today = local_date(now);
        if self.last_active_date != Some(today) {
            self.current_streak_days += 1;
            self.last_active_date = Some(today);
        }
        debug!(
            "recorded focus session of {duration_seconds}s, {} lifetime sessions",
            self.completed_focus_sessions
        );
    }

    pub fn query(&self, period: Period) -> StatsSummary {
        self.query_at(period, Utc::now())
    }

    pub fn query_at(&self, period: Period, now: DateTime<Utc>) -> StatsSummary {
        let (total, count) = self
            .history
            .iter()
            .filter(|r| r.mode == TimerMode::Focus && period.includes(r, now))
            .fold((0u64, 0u64), |(total, count), r| {
                (total + r.duration_seconds, count + 1)
            });

        let average_session_minutes = if count > 0 {
            (total as f64 / count as f64 / 60.0).round() as u64
        } else {
            0
        };

        StatsSummary {
            total_focus_seconds: total,
            session_count: count,
            average_session_minutes,
        }
    }

    pub fn progress_at(&self, now: DateTime<Utc>) -> Progress {
        let today_focus_seconds = self.query_at(Period::Today, now).total_focus_seconds;
        Progress {
            today_focus_seconds,
            today_fraction: fraction(today_focus_seconds, DAILY_GOAL_SECONDS),
            weekly_focus_seconds: self.total_focus_seconds,
            weekly_fraction: fraction(self.total_focus_seconds, WEEKLY_GOAL_SECONDS),
        }
    }

    pub fn recent(&self, limit: usize) -> &[SessionRecord] {
        &self.history[..limit.min(self.history.len())]
    }

    /// Empties the history and zeroes the lifetime counters.
    /// `last_active_date` is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.total_focus_seconds = 0;
        self.completed_focus_sessions = 0;
        self.current_streak_days = 0;
    }

    pub fn from_stored(value: &Value) -> Self {
        let mut stats = Self::default();
        let Some(map) = value.as_object() else {
            warn!("stored statistics are not an object, starting empty");
            return stats;
        };

        for key in map.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                warn!("dropping unknown stored statistics field {key}");
            }
        }

        if let Some(v) = stored_field(map, "total_focus_seconds") {
            stats.total_focus_seconds = v;
        }
        if let Some(v) = stored_field(map, "completed_focus_sessions") {
            stats.completed_focus_sessions = v;
        }
        if let Some(v) = stored_field(map, "current_streak_days") {
            stats.current_streak_days = v;
        }
        stats.last_active_date = stored_field::<Option<NaiveDate>>(map, "last_active_date").flatten();

        if let Some(entries) = map.get("history").and_then(Value::as_array) {
            stats.history = entries
                .iter()
                .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        warn!("dropping stored history entry: {err}");
                        None
                    }
                })
                .take(HISTORY_LIMIT)
                .collect();
        }

        stats
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.load(STATISTICS_KEY) {
            Ok(Some(value)) => Self::from_stored(&value),
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("could not load timer statistics, starting empty: {err:#}");
                Self::default()
            }
        }
    }

    /// Writes the whole record. Failures are logged and dropped.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let result = serde_json::to_value(self)
            .map_err(anyhow::Error::from)
            .and_then(|value| store.save(STATISTICS_KEY, &value));
        if let Err(err) = result {
            warn!("could not save timer statistics: {err:#}");
        }
    }
}
