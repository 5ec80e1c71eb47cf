//! Help screen listing keyboard shortcuts per screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::admin_tui::components::{ListView, ListViewConfig};
use crate::admin_tui::ui::Styles;

pub struct HelpSection {
    pub title: &'static str,
    pub content: &'static str,
}

pub struct HelpScreen {
    pub sections: ListView<HelpSection>,
    pub scroll_offset: u16,
}

impl HelpScreen {
    pub fn new() -> Self {
        let mut sections = ListView::new(ListViewConfig::new("Sections"));
        sections.set_items(vec![
            HelpSection {
                title: "Global",
                content: "Esc - Back to the previous screen\n\
                    q - Quit (outside text inputs)\n\
                    r - Refresh the current listing\n\
                    Up/Down - Navigate rows and menu entries",
            },
            HelpSection {
                title: "Chief Ministers",
                content: "a - Add a new CM record\n\
                    e - Edit the selected record\n\
                    d - Delete the selected record (with confirmation)\n\
                    Enter in a dialog confirms, Esc cancels",
            },
            HelpSection {
                title: "Questions",
                content: "/ - Focus the search box, Enter runs the search\n\
                    a - Open the add-question screen\n\
                    e - Edit the selected question\n\
                    d - Delete the selected question (with confirmation)",
            },
            HelpSection {
                title: "Users",
                content: "Tab - Cycle filter fields and the table\n\
                    Enter - Apply filters (resets to page 1)\n\
                    Left/Right - Previous/next page\n\
                    The users listing is read-only",
            },
            HelpSection {
                title: "Forms",
                content: "Tab/Shift+Tab - Next/previous field\n\
                    Space - Toggle a checkbox, open a dropdown\n\
                    Ctrl+N - Add a question option\n\
                    Ctrl+D - Remove the focused option\n\
                    Ctrl+R - Mark the focused option correct\n\
                    Enter - Submit, Esc - Cancel",
            },
        ]);

        Self {
            sections,
            scroll_offset: 0,
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        self.sections.render(f, chunks[0], |_, section, is_selected| {
            let style = if is_selected {
                Styles::selected()
            } else {
                Styles::default()
            };
            ListItem::new(Line::styled(section.title, style))
        });

        let content = self
            .sections
            .selected()
            .map(|s| s.content)
            .unwrap_or_default();

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0))
            .block(
                Block::default()
                    .title("Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(paragraph, chunks[1]);
    }
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new()
    }
}
