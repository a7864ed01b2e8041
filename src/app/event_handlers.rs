use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::{constants::RADIAL_SETTINGS, layout::Point};

use super::App;

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.log_habits();
                false
            }
            _ => false,
        }
    }

    /// Only the press event toggles, so one physical click is one toggle
    /// even when the terminal also reports drag and release.
    pub(super) fn handle_mouse(&mut self, event: MouseEvent) {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        let Some(point) = self.radial_point(event.column, event.row) else {
            return;
        };
        if let Some(index) = self.radial.hit_test(point) {
            self.toggle_habit(index);
        }
    }

    /// Maps a terminal cell to radial viewport coordinates, sampling at the
    /// cell center. Clicks outside the radial pane resolve to `None`.
    fn radial_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.radial_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }

        let viewport = RADIAL_SETTINGS.viewport;
        let x = ((column - area.x) as f64 + 0.5) / area.width as f64 * viewport;
        let y = ((row - area.y) as f64 + 0.5) / area.height as f64 * viewport;
        Some(Point::new(x, y))
    }
}
