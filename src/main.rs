use anyhow::Result;
use clap::{Parser, Subcommand};
use pomoflow::report::Reporter;
use pomoflow::settings::{SettingsPatch, SettingsStore};
use pomoflow::stats::{Period, RECENT_LIMIT};
use pomoflow::storage::{get_base_dir, open_lock, JsonFileStore};
use pomoflow::timer::Engine;
use pomoflow::{logging, tui};
use std::io;

#[derive(Parser)]
#[command(name = "pomoflow")]
#[command(about = "A pomodoro focus timer with session statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer
    Run {
        /// Label recorded with completed focus sessions
        #[arg(short, long)]
        task: Option<String>,
    },
    /// Show focus statistics for a period
    Stats {
        #[arg(short, long, value_enum, default_value_t = Period::Today)]
        period: Period,
    },
    /// List the most recent sessions
    History {
        #[arg(short, long, default_value_t = RECENT_LIMIT)]
        limit: usize,
    },
    /// Show or change timer settings
    Settings {
        /// Focus length in minutes
        #[arg(long)]
        focus: Option<i64>,
        /// Short break length in minutes
        #[arg(long = "break")]
        break_minutes: Option<i64>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<i64>,
        /// Focus sessions before a long break
        #[arg(long)]
        sessions: Option<i64>,
        #[arg(long)]
        sound: Option<bool>,
        #[arg(long)]
        auto_start_breaks: Option<bool>,
        #[arg(long)]
        auto_start_focus: Option<bool>,
    },
    /// Delete session history and reset lifetime counters.
    /// Refused while a timer is running.
    ClearHistory {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = get_base_dir()?;

    let log_file = match cli.command {
        Commands::Run { .. } => Some(base_dir.join("pomoflow.log")),
        _ => None,
    };
    logging::init(log_file.as_deref())?;

    let mut store = JsonFileStore::from_dir(base_dir.clone());

    match cli.command {
        Commands::Run { task } => {
            let mut lock = open_lock(&base_dir)?;
            let _guard = lock.try_write().map_err(|_| {
                anyhow::anyhow!("Another pomoflow timer is already running. Close it before starting a new one.")
            })?;

            let mut engine = Engine::new(store);
            engine.select_task(task.as_deref());

            tui::run_tui(&mut engine)?;

            let reporter = Reporter::from_statistics(engine.statistics().clone());
            reporter.report(&mut io::stdout(), Period::Today)?;
        }
        Commands::Stats { period } => {
            Reporter::new(&store).report(&mut io::stdout(), period)?;
        }
        Commands::History { limit } => {
            Reporter::new(&store).history(&mut io::stdout(), limit)?;
        }
        Commands::Settings {
            focus,
            break_minutes,
            long_break,
            sessions,
            sound,
            auto_start_breaks,
            auto_start_focus,
        } => {
            let patch = SettingsPatch {
                focus_minutes: focus,
                break_minutes,
                long_break_minutes: long_break,
                sessions_before_long_break: sessions,
                sound_enabled: sound,
                auto_start_breaks,
                auto_start_focus,
            };
            let mut settings = SettingsStore::load(&store);
            if !patch.is_empty() {
                settings.update(&patch, &mut store)?;
            }
            println!("{}", serde_json::to_string_pretty(settings.get())?);
        }
        Commands::ClearHistory { yes } => {
            if !yes {
                anyhow::bail!("Refusing to clear session history without --yes");
            }
            let mut lock = open_lock(&base_dir)?;
            let _guard = lock.try_write().map_err(|_| {
                anyhow::anyhow!("A pomoflow timer is running. Close it before clearing the history.")
            })?;
            Engine::new(store).clear_history();
            println!("Session history cleared!");
        }
    }

    Ok(())
}
