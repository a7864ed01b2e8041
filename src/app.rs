use std::{io, path::PathBuf, time::Duration};

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect, style::Color};

use crate::{
    constants::{GRID_SETTINGS, RADIAL_SETTINGS},
    domain::{self, DailyState, HabitList, HistoryRecord, WeeklySummary},
    error::Result,
    layout::{grid::GridLayout, radial::RadialLayout, tint},
    storage,
};

mod event_handlers;
mod render_views;
mod view_style;

struct App {
    habits: HabitList,
    daily: DailyState,
    history: HistoryRecord,
    history_path: PathBuf,
    radial: RadialLayout,
    grid: GridLayout,
    weekly: WeeklySummary,
    radial_area: Rect,
    status: Option<String>,
    render_needed: bool,
}

impl App {
    fn new(habits: HabitList, history: HistoryRecord, history_path: PathBuf) -> Self {
        let today = Local::now().date_naive();
        let daily = match history.get(&domain::date_key(today)) {
            Some(completed) => DailyState::from_record(&habits, completed),
            None => DailyState::new(habits.len()),
        };
        let weekly = domain::build_weekly_summary(&history, today);
        let radial = RadialLayout::new(
            RADIAL_SETTINGS.viewport,
            RADIAL_SETTINGS.viewport,
            habits.len(),
        );
        let grid = GridLayout::new(
            GRID_SETTINGS.rows,
            GRID_SETTINGS.cols,
            GRID_SETTINGS.gap,
            GRID_SETTINGS.corner_radius,
        );

        Self {
            habits,
            daily,
            history,
            history_path,
            radial,
            grid,
            weekly,
            radial_area: Rect::default(),
            status: None,
            render_needed: true,
        }
    }

    fn background(&self) -> Color {
        tint::background(self.daily.completion_ratio())
    }

    fn toggle_habit(&mut self, index: usize) {
        if self.daily.toggle(index) {
            self.status = None;
            self.render_needed = true;
        }
    }

    /// Persists today's completed set, then resets the daily vector. On a
    /// persistence fault the in-memory history is rolled back and the error
    /// is surfaced on the status line.
    fn log_habits(&mut self) {
        let key = domain::date_key(Local::now().date_naive());
        let completed = self.daily.completed_names(&self.habits);
        let previous = self.history.insert(key.clone(), completed);

        match storage::save_history(&self.history_path, &self.history) {
            Ok(()) => {
                self.daily.reset();
                self.weekly =
                    domain::build_weekly_summary(&self.history, Local::now().date_naive());
                self.status = Some("Logged today's habits".to_string());
            }
            Err(e) => {
                match previous {
                    Some(entry) => {
                        self.history.insert(key, entry);
                    }
                    None => {
                        self.history.remove(&key);
                    }
                }
                self.status = Some(format!("Error: {}", e));
            }
        }
        self.render_needed = true;
    }
}

pub fn run_ui() -> Result<()> {
    let habits = storage::load_habit_config(&storage::habit_config_path())?;
    let history_path = storage::history_path();
    let history = storage::load_history(&history_path)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(habits, history, history_path);

    loop {
        if app.render_needed {
            terminal.draw(|f| app.draw_frame(f))?;
            app.render_needed = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use super::*;

    fn test_app(prefix: &str) -> App {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = PathBuf::from(format!("/tmp/{}_{}", prefix, now));
        fs::create_dir_all(&dir).unwrap();

        let habits = HabitList::new(vec![
            "Calculus".to_string(),
            "Chemistry".to_string(),
            "Reading".to_string(),
            "Projects".to_string(),
            "Exercise".to_string(),
        ])
        .unwrap();

        App::new(habits, HistoryRecord::new(), dir.join("habits.json"))
    }

    fn cleanup(app: &App) {
        if let Some(dir) = app.history_path.parent() {
            fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_toggle_out_of_range_is_absorbed() {
        let mut app = test_app("pentad_app_toggle");
        let before = app.daily.clone();
        app.toggle_habit(99);
        assert_eq!(app.daily, before);
        cleanup(&app);
    }

    #[test]
    fn test_log_with_nothing_toggled_writes_empty_record() {
        let mut app = test_app("pentad_app_log_empty");
        app.log_habits();

        let saved = storage::load_history(&app.history_path).unwrap();
        let key = domain::date_key(Local::now().date_naive());
        assert_eq!(saved.get(&key), Some(&Vec::new()));
        cleanup(&app);
    }

    #[test]
    fn test_log_resets_daily_state_and_refreshes_weekly() {
        let mut app = test_app("pentad_app_log_reset");
        app.toggle_habit(0);
        app.toggle_habit(2);
        assert_eq!(app.daily.completed_count(), 2);

        app.log_habits();

        assert_eq!(app.daily.completed_count(), 0);
        assert_eq!(app.weekly.weekly_total, 2);

        let saved = storage::load_history(&app.history_path).unwrap();
        let key = domain::date_key(Local::now().date_naive());
        assert_eq!(
            saved.get(&key),
            Some(&vec!["Calculus".to_string(), "Reading".to_string()])
        );
        cleanup(&app);
    }

    #[test]
    fn test_log_overwrites_same_day_record() {
        let mut app = test_app("pentad_app_log_overwrite");
        app.toggle_habit(0);
        app.log_habits();

        app.toggle_habit(4);
        app.log_habits();

        let saved = storage::load_history(&app.history_path).unwrap();
        let key = domain::date_key(Local::now().date_naive());
        assert_eq!(saved.get(&key), Some(&vec!["Exercise".to_string()]));
        cleanup(&app);
    }

    #[test]
    fn test_new_seeds_daily_state_from_todays_record() {
        let habits = HabitList::new(vec!["A".to_string(), "B".to_string()]).unwrap();
        let mut history = HistoryRecord::new();
        history.insert(
            domain::date_key(Local::now().date_naive()),
            vec!["B".to_string()],
        );

        let app = App::new(habits, history, PathBuf::from("/tmp/pentad_unused.json"));
        assert_eq!(app.daily.flags(), &[false, true]);
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let habits = HabitList::new(vec!["A".to_string()]).unwrap();
        let mut app = App::new(
            habits,
            HistoryRecord::new(),
            PathBuf::from("/nonexistent-dir/pentad/habits.json"),
        );
        app.toggle_habit(0);

        app.log_habits();

        assert!(app.history.is_empty());
        assert_eq!(app.daily.completed_count(), 1);
        assert!(app.status.as_deref().unwrap_or("").starts_with("Error"));
    }
}
