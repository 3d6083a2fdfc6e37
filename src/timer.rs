use crate::models::{TimerMode, TimerState};
use crate::settings::{SettingsError, SettingsPatch, SettingsStore, TimerSettings};
use crate::stats::{Period, Statistics, StatsSummary};
use crate::storage::KeyValueStore;
use crate::ticker::Ticker;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::time::{Duration, Instant};

/// What the UI shows when a countdown runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub completed_mode: TimerMode,
    pub duration_seconds: u64,
    /// The focus session just finished, or the one coming up after a break.
    pub session_number: u32,
    pub next_mode: TimerMode,
    pub sessions_left: u32,
    pub lifetime_focus_seconds: u64,
    pub play_sound: bool,
    pub auto_started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Tick {
        remaining_seconds: u64,
        total_seconds: u64,
        mode: TimerMode,
    },
    SessionComplete(CompletionSummary),
    SettingsChanged(TimerSettings),
    StatisticsChanged {
        total_focus_seconds: u64,
        completed_focus_sessions: u64,
        current_streak_days: u32,
    },
}

/// The pomodoro state machine.
///
/// Owns the live `TimerState`, the settings, the statistics and the store
/// they persist to. `tick` advances exactly one second; `pump` asks the
/// internal `Ticker` how many seconds of wall clock are due and ticks that
/// many times. Events accumulate until the UI drains them with `take_events`.
pub struct Engine<S: KeyValueStore> {
    store: S,
    settings: SettingsStore,
    stats: Statistics,
    state: TimerState,
    task: Option<String>,
    ticker: Ticker,
    events: Vec<TimerEvent>,
}

impl<S: KeyValueStore> Engine<S> {
    pub fn new(store: S) -> Self {
        let settings = SettingsStore::load(&store);
        let stats = Statistics::load(&store);
        let state = TimerState::new_focus(settings.get().seconds_for(TimerMode::Focus));
        info!(
            "timer ready: {} min focus, {} lifetime sessions",
            settings.get().focus_minutes,
            stats.completed_focus_sessions
        );
        Self {
            store,
            settings,
            stats,
            state,
            task: None,
            ticker: Ticker::every(Duration::from_secs(1)),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> &TimerSettings {
        self.settings.get()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn task(&self) -> Option<&str> {
        self.task.as_deref()
    }

    pub fn session_label(&self) -> String {
        format!(
            "Session {} of {}",
            self.state.current_session_index,
            self.settings.get().sessions_before_long_break
        )
    }

    pub fn take_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Starts counting down, with the first tick due one second after `now`.
    pub fn start_at(&mut self, now: Instant) {
        if self.state.running {
            debug!("start ignored, timer already running");
            return;
        }
        self.state.running = true;
        self.state.paused = false;
        self.ticker.arm(now);
        debug!("{} started at {}s", self.state.mode, self.state.remaining_seconds);
    }

    pub fn pause(&mut self) {
        if !self.state.running {
            debug!("pause ignored, timer not running");
            return;
        }
        self.ticker.cancel();
        self.state.running = false;
        self.state.paused = true;
        debug!("{} paused at {}s", self.state.mode, self.state.remaining_seconds);
    }

    /// Stops the countdown and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state.running = false;
        self.state.paused = false;
        self.state.remaining_seconds = self.state.total_seconds;
        self.emit_tick();
    }

    pub fn tick(&mut self) {
        self.advance(None);
    }

    /// Applies every tick that is due at `now`. Returns how many fired.
    pub fn pump(&mut self, now: Instant) -> u32 {
        self.pump_at(now, Utc::now())
    }

    /// Like `pump`, with `wall_now` as the wall-clock time matching `now`.
    /// Sessions finished while catching up are stamped with the time their
    /// countdown reached zero.
    pub fn pump_at(&mut self, now: Instant, wall_now: DateTime<Utc>) -> u32 {
        let mut fired = 0;
        while self.state.running {
            let Some(at) = self.ticker.poll(now) else {
                break;
            };
            let lag = now.saturating_duration_since(at);
            let wall = chrono::Duration::from_std(lag)
                .ok()
                .and_then(|lag| wall_now.checked_sub_signed(lag))
                .unwrap_or(wall_now);
            self.advance(Some((at, wall)));
            fired += 1;
        }
        fired
    }

    fn advance(&mut self, due: Option<(Instant, DateTime<Utc>)>) {
        if !self.state.running {
            return;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.emit_tick();
        if self.state.remaining_seconds == 0 {
            self.complete(due);
        }
    }

    fn complete(&mut self, due: Option<(Instant, DateTime<Utc>)>) {
        self.ticker.cancel();
        self.state.running = false;
        self.state.paused = false;

        let completed_mode = self.state.mode;
        let duration_seconds = self.state.elapsed_seconds();
        let settings = self.settings.get().clone();
        let threshold = settings.sessions_before_long_break;

        let (next_mode, session_number) = match completed_mode {
            TimerMode::Focus => {
                let finished_at = due.map_or_else(Utc::now, |(_, wall)| wall);
                self.stats
                    .record_focus_session_at(duration_seconds, self.task.clone(), finished_at);
                self.stats.save(&mut self.store);
                self.state.sessions_completed += 1;
                self.state.current_session_index += 1;
                self.emit_statistics();

                let next = if self.state.current_session_index > threshold {
                    TimerMode::LongBreak
                } else {
                    TimerMode::Break
                };
                (next, self.state.current_session_index - 1)
            }
            TimerMode::Break | TimerMode::LongBreak => {
                if self.state.current_session_index > threshold {
                    self.state.current_session_index = 1;
                }
                (TimerMode::Focus, self.state.current_session_index)
            }
        };

        self.state.arm(next_mode, settings.seconds_for(next_mode));
        let auto_started = settings.auto_starts(next_mode);

        info!("{completed_mode} complete after {duration_seconds}s, next: {next_mode}");
        self.events.push(TimerEvent::SessionComplete(CompletionSummary {
            completed_mode,
            duration_seconds,
            session_number,
            next_mode,
            sessions_left: threshold.saturating_add(1).saturating_sub(self.state.current_session_index),
            lifetime_focus_seconds: self.stats.total_focus_seconds,
            play_sound: settings.sound_enabled,
            auto_started,
        }));
        self.emit_tick();

        if auto_started {
            self.start_at(due.map_or_else(Instant::now, |(at, _)| at));
        }
    }

    /// Validates and stores a settings change. A new focus duration re-arms
    /// the countdown when idle or paused in focus mode; a running countdown
    /// keeps its duration.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<TimerSettings, SettingsError> {
        let updated = self.settings.update(patch, &mut self.store)?;

        if patch.focus_minutes.is_some()
            && self.state.mode == TimerMode::Focus
            && !self.state.running
        {
            self.state.arm(TimerMode::Focus, updated.seconds_for(TimerMode::Focus));
            self.state.paused = false;
            self.emit_tick();
        }

        self.events.push(TimerEvent::SettingsChanged(updated.clone()));
        Ok(updated)
    }

    /// Sets the label recorded with the next focus session. Blank means none.
    pub fn select_task(&mut self, label: Option<&str>) {
        self.task = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
    }

    pub fn clear_history(&mut self) {
        self.stats.clear_history();
        self.stats.save(&mut self.store);
        info!("session history cleared");
        self.emit_statistics();
    }

    pub fn query_statistics(&self, period: Period) -> StatsSummary {
        self.stats.query(period)
    }

    fn emit_tick(&mut self) {
        self.events.push(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
            total_seconds: self.state.total_seconds,
            mode: self.state.mode,
        });
    }

    fn emit_statistics(&mut self) {
        self.events.push(TimerEvent::StatisticsChanged {
            total_focus_seconds: self.stats.total_focus_seconds,
            completed_focus_sessions: self.stats.completed_focus_sessions,
            current_streak_days: self.stats.current_streak_days,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SETTINGS_KEY, STATISTICS_KEY};
    use anyhow::Result;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    struct OfflineStore;

    impl KeyValueStore for OfflineStore {
        fn load(&self, _key: &str) -> Result<Option<Value>> {
            Err(anyhow::anyhow!("storage offline"))
        }

        fn save(&mut self, _key: &str, _value: &Value) -> Result<()> {
            Err(anyhow::anyhow!("storage offline"))
        }
    }

    fn engine_with(settings: Value) -> Engine<MemoryStore> {
        Engine::new(MemoryStore::new().with_entry(SETTINGS_KEY, settings))
    }

    fn finish_current<S: KeyValueStore>(engine: &mut Engine<S>) {
        if !engine.state().running {
            engine.start();
        }
        for _ in 0..engine.state().remaining_seconds {
            engine.tick();
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::new(MemoryStore::new());
        let state = engine.state();

        assert_eq!(state.mode, TimerMode::Focus);
        assert!(state.is_idle());
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.total_seconds, 1500);
        assert_eq!(state.current_session_index, 1);
        assert_eq!(engine.session_label(), "Session 1 of 4");
    }

    #[test]
    fn test_reset_restores_focus_duration_for_any_length() {
        let mut engine = Engine::new(MemoryStore::new());
        for minutes in [1i64, 7, 25, 90, 240] {
            engine
                .update_settings(&SettingsPatch {
                    focus_minutes: Some(minutes),
                    ..Default::default()
                })
                .unwrap();
            engine.start();
            engine.tick();
            engine.reset();

            let expected = minutes as u64 * 60;
            assert_eq!(engine.state().remaining_seconds, expected);
            assert_eq!(engine.state().total_seconds, expected);
        }
    }

    #[test]
    fn test_remaining_never_increases_without_reset() {
        let mut engine = engine_with(json!({ "focus_minutes": 1 }));
        let mut last = engine.state().remaining_seconds;

        for step in 0..40 {
            match step % 5 {
                0 => engine.start(),
                3 => engine.pause(),
                _ => engine.tick(),
            }
            let now = engine.state().remaining_seconds;
            assert!(now <= last, "remaining went from {last} to {now}");
            last = now;
        }
    }

    #[test]
    fn test_tick_ignored_while_idle_or_paused() {
        let mut engine = Engine::new(MemoryStore::new());
        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 1500);

        engine.start();
        engine.tick();
        engine.pause();
        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 1499);
        assert!(engine.state().paused);
        assert!(!engine.state().running);
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let mut engine = Engine::new(MemoryStore::new());
        engine.pause();

        assert_eq!(engine.state().remaining_seconds, 1500);
        assert!(!engine.state().paused);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut engine = Engine::new(MemoryStore::new());
        let t0 = Instant::now();
        engine.start_at(t0);
        engine.start_at(t0 + Duration::from_millis(900));

        // the first arming stands
        assert_eq!(engine.pump(t0 + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut engine = Engine::new(MemoryStore::new());
        engine.start();
        engine.tick();
        engine.tick();

        engine.reset();
        let once = engine.state().clone();
        engine.reset();
        assert_eq!(*engine.state(), once);
    }

    #[test]
    fn test_pump_applies_due_ticks() {
        let mut engine = Engine::new(MemoryStore::new());
        let t0 = Instant::now();
        engine.start_at(t0);

        assert_eq!(engine.pump(t0 + Duration::from_millis(500)), 0);
        assert_eq!(engine.pump(t0 + Duration::from_secs(3)), 3);
        assert_eq!(engine.state().remaining_seconds, 1497);
    }

    #[test]
    fn test_catch_up_stamps_each_session_when_it_finished() {
        let mut engine = engine_with(json!({
            "focus_minutes": 1,
            "break_minutes": 1,
            "auto_start_focus": true
        }));
        let t0 = Instant::now();
        let wall_now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        engine.start_at(t0);

        assert_eq!(engine.pump_at(t0 + Duration::from_secs(600), wall_now), 600);
        assert_eq!(engine.statistics().completed_focus_sessions, 4);
        assert_eq!(engine.state().mode, TimerMode::LongBreak);

        // focus ends at 60s, 180s, 300s and 420s; history is newest first
        let stamps: Vec<_> = engine
            .statistics()
            .history
            .iter()
            .map(|r| r.timestamp)
            .collect();
        let expected: Vec<_> = [180, 300, 420, 540]
            .iter()
            .map(|secs| wall_now - chrono::Duration::seconds(*secs))
            .collect();
        assert_eq!(stamps, expected);
    }

    #[test]
    fn test_catch_up_keeps_the_day_it_finished() {
        let mut engine = engine_with(json!({ "focus_minutes": 1 }));
        let t0 = Instant::now();
        let wall_now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        engine.start_at(t0);

        engine.pump_at(t0 + Duration::from_secs(60 + 2 * 86_400), wall_now);

        let record = &engine.statistics().history[0];
        assert_eq!(record.timestamp, wall_now - chrono::Duration::days(2));
        assert_eq!(engine.query_statistics(Period::All).session_count, 1);
    }

    #[test]
    fn test_no_stale_tick_after_pause_or_reset() {
        let mut engine = Engine::new(MemoryStore::new());
        let t0 = Instant::now();

        engine.start_at(t0);
        engine.reset();
        assert_eq!(engine.pump(t0 + Duration::from_secs(5)), 0);
        assert_eq!(engine.state().remaining_seconds, 1500);

        engine.start_at(t0);
        engine.pump(t0 + Duration::from_secs(2));
        engine.pause();
        assert_eq!(engine.pump(t0 + Duration::from_secs(10)), 0);
        assert_eq!(engine.state().remaining_seconds, 1498);
    }

    #[test]
    fn test_tick_and_reset_events() {
        let mut engine = Engine::new(MemoryStore::new());
        engine.start();
        engine.tick();
        assert_eq!(
            engine.take_events(),
            vec![TimerEvent::Tick {
                remaining_seconds: 1499,
                total_seconds: 1500,
                mode: TimerMode::Focus,
            }]
        );

        engine.tick();
        engine.reset();
        assert_eq!(
            engine.take_events().last(),
            Some(&TimerEvent::Tick {
                remaining_seconds: 1500,
                total_seconds: 1500,
                mode: TimerMode::Focus,
            })
        );
    }

    #[test]
    fn test_settings_changed_event() {
        let mut engine = Engine::new(MemoryStore::new());
        let updated = engine
            .update_settings(&SettingsPatch {
                long_break_minutes: Some(20),
                sound_enabled: Some(false),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.long_break_minutes, 20);
        assert!(!updated.sound_enabled);
        assert_eq!(
            engine.take_events(),
            vec![TimerEvent::SettingsChanged(updated.clone())]
        );

        // a focus change also refreshes the countdown
        engine
            .update_settings(&SettingsPatch {
                focus_minutes: Some(30),
                ..Default::default()
            })
            .unwrap();
        let events = engine.take_events();
        assert_eq!(
            events[0],
            TimerEvent::Tick {
                remaining_seconds: 1800,
                total_seconds: 1800,
                mode: TimerMode::Focus,
            }
        );
        match &events[1] {
            TimerEvent::SettingsChanged(settings) => {
                assert_eq!(settings.focus_minutes, 30);
                assert_eq!(settings.long_break_minutes, 20);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_focus_completion_moves_to_break() {
        let mut engine = engine_with(json!({ "focus_minutes": 1, "auto_start_breaks": false }));
        engine.select_task(Some("  Calculus  "));
        finish_current(&mut engine);

        let state = engine.state();
        assert_eq!(state.mode, TimerMode::Break);
        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.sessions_completed, 1);
        assert_eq!(state.current_session_index, 2);

        let stats = engine.statistics();
        assert_eq!(stats.completed_focus_sessions, 1);
        assert_eq!(stats.total_focus_seconds, 60);
        assert_eq!(stats.history[0].task_label.as_deref(), Some("Calculus"));
        assert!(engine.store().get(STATISTICS_KEY).is_some());
    }

    #[test]
    fn test_completion_events() {
        let mut engine = engine_with(json!({ "focus_minutes": 1, "sound_enabled": true }));
        finish_current(&mut engine);

        let events = engine.take_events();
        let summary = events
            .iter()
            .find_map(|e| match e {
                TimerEvent::SessionComplete(s) => Some(s.clone()),
                _ => None,
            })
            .expect("completion event");

        assert_eq!(summary.completed_mode, TimerMode::Focus);
        assert_eq!(summary.duration_seconds, 60);
        assert_eq!(summary.session_number, 1);
        assert_eq!(summary.next_mode, TimerMode::Break);
        assert_eq!(summary.sessions_left, 3);
        assert!(summary.play_sound);
        assert!(summary.auto_started);
        assert!(events.contains(&TimerEvent::StatisticsChanged {
            total_focus_seconds: 60,
            completed_focus_sessions: 1,
            current_streak_days: 1,
        }));
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_break_completion_waits_for_manual_start() {
        let mut engine = engine_with(json!({ "focus_minutes": 1, "break_minutes": 1 }));
        finish_current(&mut engine);
        assert!(engine.state().running, "breaks auto-start by default");

        finish_current(&mut engine);
        let state = engine.state();
        assert_eq!(state.mode, TimerMode::Focus);
        assert!(state.is_idle());
        assert_eq!(state.remaining_seconds, 60);
        assert_eq!(state.current_session_index, 2);
    }

    #[test]
    fn test_four_sessions_lead_to_long_break() {
        let mut engine = engine_with(json!({
            "focus_minutes": 25,
            "sessions_before_long_break": 4,
            "auto_start_breaks": true,
            "auto_start_focus": true
        }));
        engine.start();

        for _ in 0..10_000 {
            if engine.statistics().completed_focus_sessions == 4 {
                break;
            }
            engine.tick();
        }

        let state = engine.state();
        assert_eq!(state.mode, TimerMode::LongBreak);
        assert_eq!(state.current_session_index, 5);
        assert_eq!(state.total_seconds, 900);
        assert_eq!(engine.statistics().completed_focus_sessions, 4);
        assert_eq!(engine.statistics().total_focus_seconds, 6000);

        finish_current(&mut engine);
        assert_eq!(engine.state().mode, TimerMode::Focus);
        assert_eq!(engine.state().current_session_index, 1);
    }

    #[test]
    fn test_threshold_change_applies_at_next_comparison() {
        let mut engine = engine_with(json!({
            "focus_minutes": 1,
            "break_minutes": 1,
            "sessions_before_long_break": 4
        }));
        finish_current(&mut engine);
        finish_current(&mut engine);
        assert_eq!(engine.state().current_session_index, 2);

        engine
            .update_settings(&SettingsPatch {
                sessions_before_long_break: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(engine.state().current_session_index, 2);

        finish_current(&mut engine);
        assert_eq!(engine.state().mode, TimerMode::LongBreak);
        assert_eq!(engine.state().current_session_index, 3);
    }

    #[test]
    fn test_short_break_resets_index_when_over_threshold() {
        let mut engine = engine_with(json!({
            "focus_minutes": 1,
            "break_minutes": 1,
            "sessions_before_long_break": 4
        }));
        finish_current(&mut engine);
        finish_current(&mut engine);
        finish_current(&mut engine);
        assert_eq!(engine.state().mode, TimerMode::Break);
        assert_eq!(engine.state().current_session_index, 3);

        engine
            .update_settings(&SettingsPatch {
                sessions_before_long_break: Some(2),
                ..Default::default()
            })
            .unwrap();
        finish_current(&mut engine);

        assert_eq!(engine.state().mode, TimerMode::Focus);
        assert_eq!(engine.state().current_session_index, 1);
    }

    #[test]
    fn test_focus_change_rearms_only_when_not_running() {
        let mut engine = Engine::new(MemoryStore::new());
        engine
            .update_settings(&SettingsPatch {
                focus_minutes: Some(30),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(engine.state().remaining_seconds, 1800);
        assert_eq!(engine.state().total_seconds, 1800);

        engine.start();
        engine.tick();
        engine
            .update_settings(&SettingsPatch {
                focus_minutes: Some(10),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(engine.state().remaining_seconds, 1799);
        assert_eq!(engine.state().total_seconds, 1800);

        // reset restores the in-flight duration, not the new setting
        engine.reset();
        assert_eq!(engine.state().remaining_seconds, 1800);
    }

    #[test]
    fn test_break_change_does_not_rearm_focus() {
        let mut engine = Engine::new(MemoryStore::new());
        engine
            .update_settings(&SettingsPatch {
                break_minutes: Some(10),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(engine.state().remaining_seconds, 1500);
    }

    #[test]
    fn test_invalid_settings_leave_engine_untouched() {
        let mut engine = Engine::new(MemoryStore::new());
        let err = engine
            .update_settings(&SettingsPatch {
                break_minutes: Some(0),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.field(), "break_minutes");
        assert_eq!(engine.settings().break_minutes, 5);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_clear_history_then_query_all() {
        let mut engine = engine_with(json!({ "focus_minutes": 1 }));
        finish_current(&mut engine);
        assert_eq!(engine.query_statistics(Period::All).session_count, 1);

        engine.clear_history();
        assert_eq!(
            engine.query_statistics(Period::All),
            StatsSummary {
                total_focus_seconds: 0,
                session_count: 0,
                average_session_minutes: 0
            }
        );
        assert_eq!(engine.statistics().completed_focus_sessions, 0);
    }

    #[test]
    fn test_select_task_blank_is_none() {
        let mut engine = Engine::new(MemoryStore::new());
        engine.select_task(Some("Reading"));
        assert_eq!(engine.task(), Some("Reading"));
        engine.select_task(Some("   "));
        assert_eq!(engine.task(), None);
        engine.select_task(None);
        assert_eq!(engine.task(), None);
    }

    #[test]
    fn test_survives_offline_store() {
        let mut engine = Engine::new(OfflineStore);
        assert_eq!(engine.settings(), &TimerSettings::default());

        engine
            .update_settings(&SettingsPatch {
                focus_minutes: Some(1),
                ..Default::default()
            })
            .unwrap();
        finish_current(&mut engine);

        assert_eq!(engine.settings().focus_minutes, 1);
        assert_eq!(engine.statistics().completed_focus_sessions, 1);
        assert_eq!(engine.state().mode, TimerMode::Break);
    }

    #[test]
    fn test_reload_keeps_lifetime_counters() {
        let mut engine = engine_with(json!({ "focus_minutes": 1 }));
        finish_current(&mut engine);
        let store = engine.store().clone();

        let reloaded = Engine::new(store);
        assert_eq!(reloaded.settings().focus_minutes, 1);
        assert_eq!(reloaded.statistics().completed_focus_sessions, 1);
        assert_eq!(reloaded.statistics().history.len(), 1);
        // live counters start fresh each run
        assert_eq!(reloaded.state().sessions_completed, 0);
    }
}
