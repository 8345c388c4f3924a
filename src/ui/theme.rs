use crate::step::StepKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub comparing: Color,   // Yellow
    pub swapping: Color,    // Pink
    pub active: Color,      // Lavender for the range being worked on
    pub left: Color,        // Teal
    pub right: Color,       // Mauve
    pub eliminated: Color,  // Dim grey
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    comparing: Color::Rgb(249, 226, 175),
    swapping: Color::Rgb(245, 194, 231),
    active: Color::Rgb(180, 190, 254),
    left: Color::Rgb(148, 226, 213),
    right: Color::Rgb(203, 166, 247),
    eliminated: Color::Rgb(69, 71, 90),
};

impl Theme {
    /// Accent for a step kind in the log and status bar
    pub fn kind_color(&self, kind: StepKind) -> Color {
        if kind.is_terminal() {
            return match kind {
                StepKind::NotFound => self.error,
                _ => self.success,
            };
        }
        if kind.is_mutation() {
            return self.swapping;
        }
        match kind {
            StepKind::Compare | StepKind::PivotSelect | StepKind::FindSuccessor => self.comparing,
            StepKind::Initial => self.primary,
            _ => self.fg,
        }
    }
}
