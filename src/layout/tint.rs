use ratatui::style::Color;

use crate::constants::TINT_SETTINGS;

/// Grayscale level for a completion ratio: darker as more habits are done.
pub fn intensity(completion_ratio: f64) -> u8 {
    let value = (TINT_SETTINGS.base - completion_ratio * TINT_SETTINGS.range).round();
    value.clamp(0.0, 255.0) as u8
}

pub fn background(completion_ratio: f64) -> Color {
    let level = intensity(completion_ratio);
    Color::Rgb(level, level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_endpoints() {
        assert_eq!(intensity(0.0), 240);
        assert_eq!(intensity(1.0), 140);
        assert_eq!(background(0.0), Color::Rgb(0xf0, 0xf0, 0xf0));
        assert_eq!(background(1.0), Color::Rgb(0x8c, 0x8c, 0x8c));
    }

    #[test]
    fn test_intensity_intermediate_and_clamped() {
        assert_eq!(intensity(0.4), 200);
        assert_eq!(intensity(0.6), 180);
        assert_eq!(intensity(3.0), 0);
        assert_eq!(intensity(-1.0), 255);
    }
}
