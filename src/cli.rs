use std::io;

use chrono::Local;
use clap::{CommandFactory, Parser};

use crate::{
    constants::HABIT_COUNT,
    domain::{self, DailyState, HabitList},
    error::{PentadError, Result},
    storage, sync,
};

#[derive(Parser, Debug)]
#[command(name = "pentad")]
#[command(about = "Daily habit tracking with a radial indicator", long_about = None)]
pub enum Cli {
    #[command(about = "Configure the habit list (first-run setup)")]
    Init {
        #[arg(required = true, help = "Habit names, in display order")]
        names: Vec<String>,
    },

    #[command(about = "Mark habits done for today and log them")]
    Log {
        #[arg(help = "Habit names to mark done (none logs an empty day)")]
        names: Vec<String>,
    },

    #[command(about = "Show this week's habit counts")]
    Report,

    #[command(about = "Commit and push the habit data via git")]
    Sync,

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

pub fn init_habits(names: Vec<String>) -> Result<()> {
    if names.len() != HABIT_COUNT {
        return Err(PentadError::Configuration(format!(
            "expected {} habit names, got {}",
            HABIT_COUNT,
            names.len()
        )));
    }

    let habits = HabitList::new(names)?;
    let path = storage::habit_config_path();
    storage::save_habit_config(&path, &habits)?;

    println!("Configured habits: {}", habits.names().join(", "));
    println!("Habit list written to {}", path.display());
    Ok(())
}

pub fn log_today(names: Vec<String>) -> Result<()> {
    let habits = storage::load_habit_config(&storage::habit_config_path())?;
    let history_path = storage::history_path();
    let mut history = storage::load_history(&history_path)?;

    let today = Local::now().date_naive();
    let key = domain::date_key(today);
    let mut daily = match history.get(&key) {
        Some(completed) => DailyState::from_record(&habits, completed),
        None => DailyState::new(habits.len()),
    };

    for name in &names {
        let Some(index) = habits.index_of(name) else {
            return Err(PentadError::Configuration(format!(
                "unknown habit '{}'; configured habits: {}",
                name,
                habits.names().join(", ")
            )));
        };
        daily.mark_done(index);
    }

    let completed = daily.completed_names(&habits);
    let count = completed.len();
    history.insert(key, completed);
    storage::save_history(&history_path, &history)?;

    println!("Logged {} habit(s) for {}", count, domain::date_key(today));
    Ok(())
}

pub fn report() -> Result<()> {
    let history = storage::load_history(&storage::history_path())?;
    let summary = domain::build_weekly_summary(&history, Local::now().date_naive());

    println!("Weekly Habit Progress ({})", summary.span_label());
    println!("{}", "-".repeat(40));

    if !summary.has_data() {
        println!("No habit data for this week.");
        return Ok(());
    }

    for (date, count) in summary.dates.iter().zip(summary.daily_series.iter()) {
        println!("{:12} {:>3}", date.format("%a %Y-%m-%d"), count);
    }
    println!("{}", "-".repeat(40));
    println!("{:12} {:>3}", "TOTAL", summary.weekly_total);

    Ok(())
}

pub fn sync_data() -> Result<()> {
    sync::sync_history(&storage::history_path())
}

pub fn print_completions(shell: &str) -> Result<()> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "pentad",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(Shell::Zsh, &mut Cli::command(), "pentad", &mut io::stdout());
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "pentad",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(PentadError::Configuration(format!(
                "unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            )));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    let result = match cli {
        Cli::Init { names } => init_habits(names),
        Cli::Log { names } => log_today(names),
        Cli::Report => report(),
        Cli::Sync => sync_data(),
        Cli::Completions { shell } => print_completions(&shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_wrong_count() {
        let result = init_habits(vec!["A".to_string(), "B".to_string()]);
        assert!(matches!(result, Err(PentadError::Configuration(_))));
    }

    #[test]
    fn test_init_rejects_duplicates() {
        let names = vec!["A", "B", "C", "D", "A"]
            .into_iter()
            .map(String::from)
            .collect();
        let result = init_habits(names);
        assert!(matches!(result, Err(PentadError::Configuration(_))));
    }
}
