use std::f64::consts::{PI, TAU};

use crate::constants::RADIAL_SETTINGS;

use super::Point;

/// One triangular wedge of the radial indicator, covering one habit.
#[derive(Clone, Debug)]
pub struct Sector {
    pub index: usize,
    pub vertices: [Point; 3],
    pub label_anchor: Point,
    pub filled: bool,
}

/// Lays out `sector_count` sectors around the viewport center, starting at
/// 12 o'clock and proceeding clockwise. All geometry is in viewport
/// coordinates with y growing downward.
#[derive(Clone, Copy, Debug)]
pub struct RadialLayout {
    center: Point,
    radius: f64,
    label_offset: f64,
    sector_count: usize,
}

impl RadialLayout {
    pub fn new(width: f64, height: f64, sector_count: usize) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius: width.min(height) * RADIAL_SETTINGS.radius_factor,
            label_offset: RADIAL_SETTINGS.label_offset,
            sector_count,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn sector_span(&self) -> f64 {
        TAU / self.sector_count as f64
    }

    pub fn start_angle(&self, index: usize) -> f64 {
        self.sector_span() * index as f64 - PI / 2.0
    }

    pub fn point_at(&self, angle: f64) -> Point {
        self.point_at_distance(angle, self.radius)
    }

    pub fn point_at_distance(&self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.center.x + distance * angle.cos(),
            self.center.y + distance * angle.sin(),
        )
    }

    /// Sector `i` is filled when `flags[i]` is true; missing flags render
    /// empty.
    pub fn sectors(&self, flags: &[bool]) -> Vec<Sector> {
        (0..self.sector_count)
            .map(|index| {
                let start = self.start_angle(index);
                let end = start + self.sector_span();
                Sector {
                    index,
                    vertices: [self.center, self.point_at(start), self.point_at(end)],
                    label_anchor: self
                        .point_at_distance((start + end) / 2.0, self.radius + self.label_offset),
                    filled: flags.get(index).copied().unwrap_or(false),
                }
            })
            .collect()
    }

    /// Resolves a click to the sector containing it, by normalizing the
    /// click angle into the 12-o'clock frame and bucketing by sector span.
    /// Clicks outside the outer radius miss.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if self.sector_count == 0 {
            return None;
        }

        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        if dx.hypot(dy) > self.radius {
            return None;
        }

        let relative = (dy.atan2(dx) + PI / 2.0).rem_euclid(TAU);
        let index = (relative / self.sector_span()) as usize;
        Some(index.min(self.sector_count - 1))
    }
}
