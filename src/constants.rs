use ratatui::style::Color;

pub const HABIT_COUNT: usize = 5;

pub const SECTOR_FILLED: Color = Color::Rgb(0x4c, 0xaf, 0x50);
pub const SECTOR_EMPTY: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
pub const SECTOR_OUTLINE: Color = Color::White;
pub const CELL_FILLED: Color = SECTOR_FILLED;
pub const CELL_EMPTY: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
pub const CHART_LINE: Color = SECTOR_FILLED;

pub const RADIAL_SETTINGS: RadialSettings = RadialSettings {
    viewport: 300.0,
    radius_factor: 0.35,
    label_offset: 30.0,
};

pub const GRID_SETTINGS: GridSettings = GridSettings {
    viewport_width: 380.0,
    viewport_height: 270.0,
    rows: 4,
    cols: 7,
    gap: 5.0,
    corner_radius: 8.0,
};

pub const TINT_SETTINGS: TintSettings = TintSettings {
    base: 240.0,
    range: 100.0,
};

pub struct RadialSettings {
    pub viewport: f64,
    pub radius_factor: f64,
    pub label_offset: f64,
}

pub struct GridSettings {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub rows: usize,
    pub cols: usize,
    pub gap: f64,
    pub corner_radius: f64,
}

pub struct TintSettings {
    pub base: f64,
    pub range: f64,
}
