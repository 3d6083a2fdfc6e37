use crate::stats::{Period, Statistics};
use crate::storage::KeyValueStore;
use crate::utils::format_hours_minutes;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::io::Write;

pub struct Reporter {
    stats: Statistics,
}

fn period_title(period: Period) -> &'static str {
    match period {
        Period::Today => "Today",
        Period::Week => "Last 7 days",
        Period::Month => "Last 30 days",
        Period::All => "All time",
    }
}

impl Reporter {
    pub fn new<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            stats: Statistics::load(store),
        }
    }

    pub fn from_statistics(stats: Statistics) -> Self {
        Self { stats }
    }

    pub fn report(&self, out: &mut impl Write, period: Period) -> Result<()> {
        self.report_at(out, period, Utc::now())
    }

    pub fn report_at(&self, out: &mut impl Write, period: Period, now: DateTime<Utc>) -> Result<()> {
        let summary = self.stats.query_at(period, now);
        let progress = self.stats.progress_at(now);
        let title = period_title(period);

        writeln!(out, "Pomoflow Report: {title}")?;
        writeln!(out, "{}", "=".repeat(17 + title.len()))?;
        writeln!(
            out,
            "Focus Time:          {}",
            format_hours_minutes(summary.total_focus_seconds)
        )?;
        writeln!(out, "Completed Sessions:  {}", summary.session_count)?;
        writeln!(out, "Avg Session:         {}m", summary.average_session_minutes)?;
        writeln!(out, "Current Streak:      {} days", self.stats.current_streak_days)?;
        writeln!(out)?;
        writeln!(
            out,
            "Today:   {} ({:.0}% of 8h)",
            format_hours_minutes(progress.today_focus_seconds),
            progress.today_fraction * 100.0
        )?;
        writeln!(
            out,
            "Overall: {} ({:.0}% of 10h)",
            format_hours_minutes(progress.weekly_focus_seconds),
            progress.weekly_fraction * 100.0
        )?;
        writeln!(
            out,
            "Lifetime: {} sessions",
            self.stats.completed_focus_sessions
        )?;
        Ok(())
    }

    pub fn history(&self, out: &mut impl Write, limit: usize) -> Result<()> {
        let recent = self.stats.recent(limit);
        if recent.is_empty() {
            writeln!(out, "No sessions recorded yet.")?;
            return Ok(());
        }

        for record in recent {
            let local = record.timestamp.with_timezone(&Local);
            let minutes = (record.duration_seconds as f64 / 60.0).round() as u64;
            let mut line = format!(
                "{}  {}  {} session, {} minutes",
                local.format("%Y-%m-%d"),
                local.format("%H:%M"),
                record.mode,
                minutes
            );
            if let Some(task) = &record.task_label {
                line.push_str(&format!("  [{task}]"));
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
