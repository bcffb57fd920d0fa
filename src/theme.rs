//! Terminal styles for highlighted source and for messages on stderr.
//!
//! Colours are from the Catppuccin Mocha palette.

use nu_ansi_term::{Color, Style};

const SURFACE2: Color = Color::Rgb(108, 112, 134);
const OVERLAY1: Color = Color::Rgb(127, 132, 156);
const RED: Color = Color::Rgb(243, 139, 168);
const GREEN: Color = Color::Rgb(166, 227, 161);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const PEACH: Color = Color::Rgb(250, 179, 135);
const TEAL: Color = Color::Rgb(148, 226, 213);
const SKY: Color = Color::Rgb(137, 220, 235);

/// One style per instruction class, plus comments and the two kinds of
/// message the CLI prints.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub move_right: Style,
    pub move_left: Style,
    pub increment: Style,
    pub decrement: Style,
    pub output: Style,
    pub input: Style,
    pub jump: Style,
    pub comment: Style,
    pub error: Style,
    pub notice: Style,
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            move_right: Style::new().fg(SKY).bold(),
            move_left: Style::new().fg(TEAL).bold(),
            increment: Style::new().fg(GREEN).bold(),
            decrement: Style::new().fg(RED).bold(),
            output: Style::new().fg(YELLOW).bold(),
            input: Style::new().fg(PEACH).bold(),
            jump: Style::new().fg(MAUVE).bold(),
            comment: Style::new().fg(SURFACE2),
            error: Style::new().fg(RED).bold(),
            notice: Style::new().fg(OVERLAY1),
        }
    }

    /// Style for one source character; anything outside `><+-.,[]` is a comment.
    pub fn style_for(&self, ch: char) -> Style {
        match ch {
            '>' => self.move_right,
            '<' => self.move_left,
            '+' => self.increment,
            '-' => self.decrement,
            '.' => self.output,
            ',' => self.input,
            '[' | ']' => self.jump,
            _ => self.comment,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}
