use ratatui::style::Color;

/// Picks a readable label color against the tinted background.
pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::text_color_for_bg;
    use ratatui::style::Color;

    #[test]
    fn test_tint_extremes_stay_readable() {
        assert_eq!(text_color_for_bg(Color::Rgb(0xf0, 0xf0, 0xf0)), Color::Black);
        assert_eq!(text_color_for_bg(Color::Rgb(0x20, 0x20, 0x20)), Color::White);
    }
}
