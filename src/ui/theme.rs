//! Colours shared by the viewer panes

use ratatui::style::{Color, Modifier, Style};

/// One colour per thing the viewer draws
pub struct Palette {
    /// Source text and printed output
    pub text: Color,
    /// Line numbers, comments, separators, placeholders and idle borders
    pub muted: Color,
    /// Keywords, brackets and the file label
    pub keyword: Color,
    /// Numbers and booleans
    pub literal: Color,
    pub string: Color,
    /// Called names and function values
    pub callable: Color,
    /// Names in the globals pane
    pub binding: Color,
    /// Fault line, fault badge and error values
    pub fault: Color,
    /// Clean-run badge and the last executed line number
    pub ok: Color,
    /// Background of the marked line and the status bar
    pub band: Color,
    pub focus_border: Color,
}

pub const PALETTE: Palette = Palette {
    text: Color::Rgb(205, 214, 244),
    muted: Color::Rgb(108, 112, 134),
    keyword: Color::Rgb(137, 180, 250),
    literal: Color::Rgb(250, 179, 135),
    string: Color::Rgb(166, 227, 161),
    callable: Color::Rgb(249, 226, 175),
    binding: Color::Rgb(148, 226, 213),
    fault: Color::Rgb(243, 139, 168),
    ok: Color::Rgb(166, 227, 161),
    band: Color::Rgb(50, 50, 70),
    focus_border: Color::Rgb(249, 226, 175),
};

/// Border style of a pane
pub fn pane_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(PALETTE.focus_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(PALETTE.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focused_border_is_bold() {
        assert_eq!(pane_border(true).fg, Some(PALETTE.focus_border));
        assert!(pane_border(true).add_modifier.contains(Modifier::BOLD));
        assert_eq!(pane_border(false).fg, Some(PALETTE.muted));
    }
}
