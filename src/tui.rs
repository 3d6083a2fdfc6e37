use crate::models::TimerMode;
use crate::stats::{Period, StatsSummary, RECENT_LIMIT};
use crate::storage::KeyValueStore;
use crate::timer::{CompletionSummary, Engine, TimerEvent};
use crate::utils::{format_clock, format_hours_minutes};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::{Duration as StdDuration, Instant};

#[derive(Default)]
struct UiState {
    banner: Option<String>,
}

pub fn run_tui<S: KeyValueStore>(engine: &mut Engine<S>) -> Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, engine);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine<S>,
) -> Result<()> {
    let mut ui = UiState::default();

    loop {
        terminal.draw(|f| draw(f, engine, &ui))?;

        if event::poll(StdDuration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('s') => {
                        ui.banner = None;
                        engine.start();
                    }
                    KeyCode::Char('p') => engine.pause(),
                    KeyCode::Char('r') => engine.reset(),
                    _ => {}
                }
            }
        }

        engine.pump(Instant::now());

        for event in engine.take_events() {
            if let TimerEvent::SessionComplete(summary) = event {
                if summary.play_sound {
                    let backend = terminal.backend_mut();
                    backend.write_all(b"\x07")?;
                    Write::flush(backend)?;
                }
                info!("completion shown: {:?}", summary);
                ui.banner = Some(banner_text(&summary));
            }
        }
    }
}

fn banner_text(summary: &CompletionSummary) -> String {
    let minutes = summary.duration_seconds / 60;
    let next = if summary.auto_started {
        format!("{} started", summary.next_mode)
    } else {
        format!("press 's' to start {}", summary.next_mode)
    };
    match summary.completed_mode {
        TimerMode::Focus => format!(
            "Focus session {} complete ({} min). Total focus {}. Next: {}",
            summary.session_number,
            minutes,
            format_hours_minutes(summary.lifetime_focus_seconds),
            next
        ),
        TimerMode::Break | TimerMode::LongBreak => format!(
            "Break over ({} min). Session {} next, {} left before the long break. {}",
            minutes, summary.session_number, summary.sessions_left, next
        ),
    }
}

fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Focus => Color::Green,
        TimerMode::Break => Color::Cyan,
        TimerMode::LongBreak => Color::Magenta,
    }
}

fn draw<S: KeyValueStore>(frame: &mut Frame, engine: &Engine<S>, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Countdown
            Constraint::Length(6), // Stats
            Constraint::Min(0),    // Recent sessions
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], engine);
    draw_countdown(frame, chunks[1], engine);
    draw_stats(frame, chunks[2], engine);
    draw_recent(frame, chunks[3], engine);
    draw_footer(frame, chunks[4], ui);
}

fn draw_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, engine: &Engine<S>) {
    let state = engine.state();
    let status_text = if state.running {
        Span::styled(
            "RUNNING",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else if state.paused {
        Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "READY",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    let header_spans = vec![
        Span::styled(
            " Pomoflow ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        status_text,
        Span::raw(" | "),
        Span::raw(format!(
            "Streak: {} days",
            engine.statistics().current_streak_days
        )),
        Span::raw(" | "),
        Span::raw(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
    ];

    let header = Paragraph::new(Line::from(header_spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_countdown<S: KeyValueStore>(frame: &mut Frame, area: Rect, engine: &Engine<S>) {
    let state = engine.state();
    let color = mode_color(state.mode);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", state.mode.to_string().to_uppercase()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let clock = Paragraph::new(Span::styled(
        format_clock(state.remaining_seconds),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(clock, rows[0]);

    let task = engine.task().unwrap_or("No task selected");
    frame.render_widget(
        Paragraph::new(format!("{} | {}", engine.session_label(), task)).alignment(Alignment::Center),
        rows[1],
    );

    let ratio = if state.total_seconds > 0 {
        state.elapsed_seconds() as f64 / state.total_seconds as f64
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, rows[2]);
}

fn draw_stats<S: KeyValueStore>(frame: &mut Frame, area: Rect, engine: &Engine<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    draw_summary_block(frame, chunks[0], " TODAY ", &engine.query_statistics(Period::Today));
    draw_summary_block(frame, chunks[1], " WEEK ", &engine.query_statistics(Period::Week));
    draw_summary_block(frame, chunks[2], " MONTH ", &engine.query_statistics(Period::Month));
}

fn draw_summary_block(frame: &mut Frame, area: Rect, title: &str, summary: &StatsSummary) {
    let lines = vec![
        Line::from(vec![
            Span::styled("  Focus:    ", Style::default().fg(Color::Green)),
            Span::raw(format_hours_minutes(summary.total_focus_seconds)),
        ]),
        Line::raw(format!("  Sessions: {}", summary.session_count)),
        Line::raw(format!("  Average:  {}m", summary.average_session_minutes)),
    ];

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_recent<S: KeyValueStore>(frame: &mut Frame, area: Rect, engine: &Engine<S>) {
    let recent = engine.statistics().recent(RECENT_LIMIT);
    let lines: Vec<Line> = if recent.is_empty() {
        vec![Line::raw("  No sessions yet. Complete a focus session to see it here.")]
    } else {
        recent
            .iter()
            .map(|record| {
                let local = record.timestamp.with_timezone(&Local);
                let mut spans = vec![
                    Span::raw(format!("  {}  ", local.format("%m-%d %H:%M"))),
                    Span::styled(
                        format!("{:>3} min", (record.duration_seconds as f64 / 60.0).round() as u64),
                        Style::default().fg(mode_color(record.mode)),
                    ),
                ];
                if let Some(task) = &record.task_label {
                    spans.push(Span::raw(format!("  {task}")));
                }
                Line::from(spans)
            })
            .collect()
    };

    let block = Block::default()
        .title(" Recent Sessions ")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, ui: &UiState) {
    let text = match &ui.banner {
        Some(banner) => banner.clone(),
        None => "'s' start | 'p' pause | 'r' reset | 'q' quit".to_string(),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
