use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph,
        block::{Position, Title},
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

use crate::{
    constants::{
        CELL_EMPTY, CELL_FILLED, CHART_LINE, GRID_SETTINGS, RADIAL_SETTINGS, SECTOR_EMPTY,
        SECTOR_FILLED, SECTOR_OUTLINE,
    },
    layout::{Point, grid::Cell, radial::RadialLayout},
};

use super::{App, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let bg = self.background();

        f.render_widget(Block::default().style(Style::default().bg(bg)), size);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(size);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(halves[1]);

        self.render_radial(f, halves[0]);
        self.render_chart(f, right[0]);
        self.render_grid(f, right[1]);
    }

    fn render_radial(&mut self, f: &mut Frame, area: Rect) {
        let bg = self.background();
        let fg = view_style::text_color_for_bg(bg);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(fg))
            .style(Style::default().bg(bg))
            .title(
                Title::from(Span::styled(
                    "Track Your Habits",
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title(
                Title::from(Span::styled(
                    "click: toggle  enter: log  q: quit",
                    Style::default().fg(fg),
                ))
                .alignment(Alignment::Right)
                .position(Position::Bottom),
            );

        if let Some(status) = &self.status {
            block = block.title(
                Title::from(Span::styled(status.clone(), Style::default().fg(fg)))
                    .alignment(Alignment::Left)
                    .position(Position::Bottom),
            );
        }

        self.radial_area = block.inner(area);

        let viewport = RADIAL_SETTINGS.viewport;
        let radial = self.radial;
        let sectors = radial.sectors(self.daily.flags());
        let names = self.habits.names().to_vec();

        let canvas = Canvas::default()
            .block(block)
            .x_bounds([0.0, viewport])
            .y_bounds([0.0, viewport])
            .paint(move |ctx| {
                for sector in &sectors {
                    let color = if sector.filled {
                        SECTOR_FILLED
                    } else {
                        SECTOR_EMPTY
                    };
                    paint_sector_fill(ctx, &radial, sector.index, color, viewport);
                }

                for sector in &sectors {
                    let [center, start, end] = sector.vertices;
                    draw_segment(ctx, center, start, SECTOR_OUTLINE, viewport);
                    draw_segment(ctx, center, end, SECTOR_OUTLINE, viewport);
                    draw_segment(ctx, start, end, SECTOR_OUTLINE, viewport);
                }

                for sector in &sectors {
                    if let Some(name) = names.get(sector.index) {
                        ctx.print(
                            sector.label_anchor.x,
                            viewport - sector.label_anchor.y,
                            Line::from(Span::styled(
                                name.clone(),
                                Style::default().fg(fg).add_modifier(Modifier::BOLD),
                            )),
                        );
                    }
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_chart(&self, f: &mut Frame, area: Rect) {
        let bg = self.background();
        let fg = view_style::text_color_for_bg(bg);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(fg))
            .style(Style::default().bg(bg))
            .title(
                Title::from(Span::styled(
                    format!("Weekly Habit Progress ({})", self.weekly.span_label()),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );

        if !self.weekly.has_data() {
            let placeholder = Paragraph::new("No habit data for this week.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(fg).bg(bg))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let points: Vec<(f64, f64)> = self
            .weekly
            .daily_series
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as f64, count as f64))
            .collect();
        let x_labels: Vec<Span> = self
            .weekly
            .dates
            .iter()
            .map(|date| Span::styled(date.format("%a").to_string(), Style::default().fg(fg)))
            .collect();
        let y_labels: Vec<Span> = (0..=self.habits.len())
            .map(|count| Span::styled(count.to_string(), Style::default().fg(fg)))
            .collect();

        let dataset = Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CHART_LINE))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Date", Style::default().fg(fg)))
                    .style(Style::default().fg(fg))
                    .bounds([0.0, 6.0])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Habits Completed", Style::default().fg(fg)))
                    .style(Style::default().fg(fg))
                    .bounds([0.0, self.habits.len() as f64])
                    .labels(y_labels),
            );
        f.render_widget(chart, area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let bg = self.background();
        let fg = view_style::text_color_for_bg(bg);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(fg))
            .style(Style::default().bg(bg))
            .title(
                Title::from(Span::styled(
                    "Weekly Progress Puzzle",
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );

        let grid = self.grid;
        let cells = grid.cells(
            GRID_SETTINGS.viewport_width,
            GRID_SETTINGS.viewport_height,
            self.weekly.weekly_total,
        );
        let viewport_height = GRID_SETTINGS.viewport_height;

        let canvas = Canvas::default()
            .block(block)
            .x_bounds([0.0, GRID_SETTINGS.viewport_width])
            .y_bounds([0.0, viewport_height])
            .paint(move |ctx| {
                for cell in &cells {
                    let color = if cell.filled { CELL_FILLED } else { CELL_EMPTY };

                    let outline = grid.rounded_outline(cell);
                    for i in 0..outline.len() {
                        let a = outline[i];
                        let b = outline[(i + 1) % outline.len()];
                        draw_segment(ctx, a, b, color, viewport_height);
                    }

                    fill_cell(ctx, cell, color, viewport_height);
                }
            });
        f.render_widget(canvas, area);
    }
}

fn paint_sector_fill(
    ctx: &mut Context,
    layout: &RadialLayout,
    index: usize,
    color: Color,
    viewport: f64,
) {
    let steps = 24;
    let start = layout.start_angle(index);
    let span = layout.sector_span();
    let center = layout.center();

    for step in 0..=steps {
        let angle = start + span * step as f64 / steps as f64;
        let edge = layout.point_at(angle);
        draw_segment(ctx, center, edge, color, viewport);
    }
}

fn fill_cell(ctx: &mut Context, cell: &Cell, color: Color, viewport_height: f64) {
    let mut y = cell.y + 2.0;
    while y < cell.y + cell.height - 1.0 {
        draw_segment(
            ctx,
            Point::new(cell.x + 2.0, y),
            Point::new(cell.x + cell.width - 2.0, y),
            color,
            viewport_height,
        );
        y += 3.0;
    }
}

/// The canvas y-axis grows upward while layout coordinates grow downward,
/// so segments are flipped against the viewport height when drawn.
fn draw_segment(ctx: &mut Context, a: Point, b: Point, color: Color, viewport_height: f64) {
    ctx.draw(&CanvasLine {
        x1: a.x,
        y1: viewport_height - a.y,
        x2: b.x,
        y2: viewport_height - b.y,
        color,
    });
}
