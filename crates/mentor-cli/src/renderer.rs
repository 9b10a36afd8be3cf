//! Terminal output for mentor replies and dashboards.
//!
//! Rich mode renders Markdown with termimad; plain mode prints the text as
//! is, which keeps output stable for scripts and tests.

use termimad::{crossterm::style::Color, MadSkin};

/// Writes mentor output to stdout, rich or plain.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Green);
        skin.bullet.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Markdown document such as the progress dashboard.
    pub fn render(&self, markdown: &str) {
        if self.rich_enabled {
            self.skin.print_text(markdown);
        } else {
            println!("{}", markdown.trim_end());
        }
    }

    /// One mentor reply, labelled.
    pub fn reply(&self, text: &str) {
        println!("{}", self.label("Mentor"));
        self.render(text);
        println!();
    }

    /// Short status line, e.g. after a reset.
    pub fn notice(&self, text: &str) {
        if self.rich_enabled {
            println!("\x1b[2m{text}\x1b[0m");
        } else {
            println!("{text}");
        }
    }

    /// Prompt shown before the user's input.
    pub fn prompt(&self) -> String {
        format!("{} ", self.label("You"))
    }

    fn label(&self, name: &str) -> String {
        if self.rich_enabled {
            format!("\x1b[1;34m{name}:\x1b[0m")
        } else {
            format!("{name}:")
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
