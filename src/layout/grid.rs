use super::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub filled: bool,
}

/// Packs a cumulative count into a fixed rows x cols grid of rounded cells
/// sized to a viewport. The first `count` cells in row-major order render
/// filled.
#[derive(Clone, Copy, Debug)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    gap: f64,
    corner_radius: f64,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize, gap: f64, corner_radius: f64) -> Self {
        Self {
            rows,
            cols,
            gap,
            corner_radius,
        }
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cells(&self, width: f64, height: f64, filled_count: usize) -> Vec<Cell> {
        let cell_width = (width - (self.cols + 1) as f64 * self.gap) / self.cols as f64;
        let cell_height = (height - (self.rows + 1) as f64 * self.gap) / self.rows as f64;
        let filled_count = filled_count.min(self.capacity());

        let mut cells = Vec::with_capacity(self.capacity());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let index = row * self.cols + col;
                cells.push(Cell {
                    row,
                    col,
                    x: self.gap + col as f64 * (cell_width + self.gap),
                    y: self.gap + row as f64 * (cell_height + self.gap),
                    width: cell_width,
                    height: cell_height,
                    filled: index < filled_count,
                });
            }
        }
        cells
    }

    /// Closed polyline through corner-offset control points, approximating a
    /// rounded rectangle where no native primitive exists.
    pub fn rounded_outline(&self, cell: &Cell) -> Vec<Point> {
        let radius = self
            .corner_radius
            .min(cell.width / 2.0)
            .min(cell.height / 2.0);
        let (x1, y1) = (cell.x, cell.y);
        let (x2, y2) = (cell.x + cell.width, cell.y + cell.height);

        vec![
            Point::new(x1 + radius, y1),
            Point::new(x2 - radius, y1),
            Point::new(x2, y1 + radius),
            Point::new(x2, y2 - radius),
            Point::new(x2 - radius, y2),
            Point::new(x1 + radius, y2),
            Point::new(x1, y2 - radius),
            Point::new(x1, y1 + radius),
        ]
    }
}
