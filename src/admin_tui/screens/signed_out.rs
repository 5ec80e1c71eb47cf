//! Signed-out guard screen.
//!
//! Shown when no session token exists at startup, or after the API rejects
//! the session mid-use. Token issuance is out of scope; sign-in happens via
//! the `login` subcommand.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::admin_tui::ui::{centered_rect, Styles};

pub struct SignedOutScreen {
    /// Extra context, e.g. "Session expired"
    pub note: Option<String>,
}

impl SignedOutScreen {
    pub fn new() -> Self {
        Self { note: None }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 40, area);
        f.render_widget(Clear, popup_area);

        let mut lines = Vec::new();
        if let Some(note) = &self.note {
            lines.push(Line::styled(note.clone(), Styles::error()));
            lines.push(Line::from(""));
        }
        lines.push(Line::from("You are not signed in."));
        lines.push(Line::from(""));
        lines.push(Line::from("Store an admin token, then start the console again:"));
        lines.push(Line::styled(
            "    khelo-admin login --token <token>",
            Styles::info(),
        ));
        lines.push(Line::from(""));
        lines.push(Line::styled("q / Esc - Quit", Styles::inactive()));

        let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Signed Out")
                .borders(Borders::ALL)
                .border_style(Styles::warning()),
        );
        f.render_widget(dialog, popup_area);
    }
}

impl Default for SignedOutScreen {
    fn default() -> Self {
        Self::new()
    }
}
