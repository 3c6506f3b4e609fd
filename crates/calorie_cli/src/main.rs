//! Terminal front end for the calorie tracker.
//!
//! # Responsibility
//! - Play the role of the calorie screen: add prompt, list and chart.
//! - Resolve configuration from environment, overridden by flags.

use anyhow::{Context, Result};
use calorie_core::db::open_db;
use calorie_core::{
    init_logging_from_config, render_text_chart, CalorieScreen, CalorieService, EntriesChanged,
    SqliteCalorieRepository, TrackerConfig,
};
use clap::{Parser, Subcommand};
use log::info;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const DEFAULT_CHART_HEIGHT: usize = 8;

/// Calorie tracker command line arguments.
#[derive(Parser, Debug)]
#[command(name = "calorie")]
#[command(about = "Record calorie intake and view it as a list and chart")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Add an entry; text that is not an integer is stored as 0
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Print entries in chronological order
    List,
    /// Print the chart of amounts
    Chart {
        #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
        height: usize,
    },
    /// Remove every entry
    Reset,
    /// Print list and chart
    Show,
}

impl Cli {
    fn config(&self) -> TrackerConfig {
        let mut config = TrackerConfig::from_env();
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging_from_config(&config).map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let repo = SqliteCalorieRepository::try_new(&conn).context("database is not usable")?;
    let mut service = CalorieService::new(repo);
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let screen = Rc::new(RefCell::new(CalorieScreen::from_entries(&service.entries())));
    let sink = Rc::clone(&screen);
    service.subscribe(move |event: &EntriesChanged| sink.borrow_mut().apply(event));

    match cli.command.unwrap_or(Command::Show) {
        Command::Add { amount } => {
            let entry = service
                .create_entry(&amount)
                .context("failed to save entry")?;
            println!("Added Calorie: {}", entry.amount);
            print_list(&screen.borrow());
        }
        Command::List => print_list(&screen.borrow()),
        Command::Chart { height } => print_chart(&screen.borrow(), height),
        Command::Reset => {
            let removed = service.reset().context("failed to reset entries")?;
            println!("Removed {removed} entries.");
        }
        Command::Show => {
            let screen = screen.borrow();
            print_list(&screen);
            println!();
            print_chart(&screen, DEFAULT_CHART_HEIGHT);
        }
    }

    Ok(())
}

fn print_list(screen: &CalorieScreen) {
    if screen.is_empty() {
        println!("No entries yet.");
        return;
    }
    for row in screen.rows() {
        match &row.detail {
            Some(detail) => println!("{:<20} {detail}", row.title),
            None => println!("{}", row.title),
        }
    }
}

fn print_chart(screen: &CalorieScreen, height: usize) {
    print!("{}", render_text_chart(screen.chart(), height));
}
