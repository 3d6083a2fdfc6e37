use crate::models::TimerMode;
use crate::storage::{stored_field, KeyValueStore, SETTINGS_KEY};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const NUMERIC_FIELDS: [&str; 4] = [
    "focus_minutes",
    "break_minutes",
    "long_break_minutes",
    "sessions_before_long_break",
];
const FLAG_FIELDS: [&str; 3] = ["sound_enabled", "auto_start_breaks", "auto_start_focus"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: i64,
        min: i64,
    },
    #[error("{field} is too large: {value}")]
    TooLarge { field: &'static str, value: i64 },
}

impl SettingsError {
    pub fn field(&self) -> &'static str {
        match self {
            SettingsError::TooSmall { field, .. } | SettingsError::TooLarge { field, .. } => field,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_before_long_break: u32,
    pub sound_enabled: bool,
    pub auto_start_breaks: bool,
    pub auto_start_focus: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
            sound_enabled: true,
            auto_start_breaks: true,
            auto_start_focus: false,
        }
    }
}

impl TimerSettings {
    pub fn seconds_for(&self, mode: TimerMode) -> u64 {
        let minutes = match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::Break => self.break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes) * 60
    }

    pub fn auto_starts(&self, mode: TimerMode) -> bool {
        if mode.is_break() {
            self.auto_start_breaks
        } else {
            self.auto_start_focus
        }
    }

    /// Rebuilds settings from a persisted document.
    ///
    /// Every known field is parsed and range-checked on its own; a bad value
    /// falls back to the default for that field. Unknown fields are dropped.
    pub fn from_stored(value: &Value) -> Self {
        let mut settings = Self::default();
        let Some(map) = value.as_object() else {
            warn!("stored settings are not an object, using defaults");
            return settings;
        };

        for key in map.keys() {
            if !NUMERIC_FIELDS.contains(&key.as_str()) && !FLAG_FIELDS.contains(&key.as_str()) {
                warn!("dropping unknown stored setting {key}");
            }
        }

        let numeric = [
            (NUMERIC_FIELDS[0], &mut settings.focus_minutes),
            (NUMERIC_FIELDS[1], &mut settings.break_minutes),
            (NUMERIC_FIELDS[2], &mut settings.long_break_minutes),
            (NUMERIC_FIELDS[3], &mut settings.sessions_before_long_break),
        ];
        for (field, slot) in numeric {
            if let Some(raw) = stored_field::<i64>(map, field) {
                match check_positive(field, raw) {
                    Ok(v) => *slot = v,
                    Err(err) => warn!("dropping stored setting: {err}"),
                }
            }
        }

        let flags = [
            (FLAG_FIELDS[0], &mut settings.sound_enabled),
            (FLAG_FIELDS[1], &mut settings.auto_start_breaks),
            (FLAG_FIELDS[2], &mut settings.auto_start_focus),
        ];
        for (field, slot) in flags {
            if let Some(v) = stored_field::<bool>(map, field) {
                *slot = v;
            }
        }

        settings
    }
}

// Every numeric setting has a lower bound of 1.
fn check_positive(field: &'static str, value: i64) -> Result<u32, SettingsError> {
    if value < 1 {
        return Err(SettingsError::TooSmall {
            field,
            value,
            min: 1,
        });
    }
    u32::try_from(value).map_err(|_| SettingsError::TooLarge { field, value })
}

/// A partial settings change. `None` leaves the field untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsPatch {
    pub focus_minutes: Option<i64>,
    pub break_minutes: Option<i64>,
    pub long_break_minutes: Option<i64>,
    pub sessions_before_long_break: Option<i64>,
    pub sound_enabled: Option<bool>,
    pub auto_start_breaks: Option<bool>,
    pub auto_start_focus: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a copy of `current`. Any invalid field rejects the
    /// whole patch.
    pub fn apply_to(&self, current: &TimerSettings) -> Result<TimerSettings, SettingsError> {
        let mut next = current.clone();

        let numeric = [
            (NUMERIC_FIELDS[0], self.focus_minutes, &mut next.focus_minutes),
            (NUMERIC_FIELDS[1], self.break_minutes, &mut next.break_minutes),
            (NUMERIC_FIELDS[2], self.long_break_minutes, &mut next.long_break_minutes),
            (
                NUMERIC_FIELDS[3],
                self.sessions_before_long_break,
                &mut next.sessions_before_long_break,
            ),
        ];
        for (field, value, slot) in numeric {
            if let Some(value) = value {
                *slot = check_positive(field, value)?;
            }
        }

        if let Some(v) = self.sound_enabled {
            next.sound_enabled = v;
        }
        if let Some(v) = self.auto_start_breaks {
            next.auto_start_breaks = v;
        }
        if let Some(v) = self.auto_start_focus {
            next.auto_start_focus = v;
        }

        Ok(next)
    }
}

pub struct SettingsStore {
    current: TimerSettings,
}

impl SettingsStore {
    pub fn new(current: TimerSettings) -> Self {
        Self { current }
    }

    /// Loads the persisted record, falling back to defaults when it is absent
    /// or unreadable.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let current = match store.load(SETTINGS_KEY) {
            Ok(Some(value)) => TimerSettings::from_stored(&value),
            Ok(None) => TimerSettings::default(),
            Err(err) => {
                warn!("could not load timer settings, using defaults: {err:#}");
                TimerSettings::default()
            }
        };
        Self { current }
    }

    pub fn get(&self) -> &TimerSettings {
        &self.current
    }

    /// Validates and applies `patch`, then persists the whole record.
    /// A failed save is logged and the in-memory value still wins.
    pub fn update<S: KeyValueStore + ?Sized>(
        &mut self,
        patch: &SettingsPatch,
        store: &mut S,
    ) -> Result<TimerSettings, SettingsError> {
        let next = patch.apply_to(&self.current)?;
        self.current = next;
        info!("timer settings updated: {:?}", self.current);
        self.persist(store);
        Ok(self.current.clone())
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let result = serde_json::to_value(&self.current)
            .map_err(anyhow::Error::from)
            .and_then(|value| store.save(SETTINGS_KEY, &value));
        if let Err(err) = result {
            warn!("could not save timer settings: {err:#}");
        }
    }
}
