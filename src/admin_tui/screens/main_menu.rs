//! Main menu screen for the admin TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use crate::admin_tui::app::Screen;
use crate::admin_tui::components::{ListView, ListViewConfig};
use crate::admin_tui::ui::Styles;

/// One menu entry
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: String,
    pub description: String,
    pub shortcut: char,
    pub screen: Screen,
}

impl MenuOption {
    fn new(title: &str, description: &str, shortcut: char, screen: Screen) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            shortcut,
            screen,
        }
    }
}

pub struct MainMenuScreen {
    pub menu: ListView<MenuOption>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let mut menu = ListView::new(ListViewConfig::new("Election Khelo Admin"));
        menu.set_items(vec![
            MenuOption::new(
                "Chief Ministers",
                "Browse, add, edit, and delete CM records",
                'C',
                Screen::CmList,
            ),
            MenuOption::new(
                "Questions",
                "Search and manage quiz questions",
                'Q',
                Screen::Questions,
            ),
            MenuOption::new(
                "Users",
                "Browse registered accounts with filters",
                'U',
                Screen::Users,
            ),
            MenuOption::new("Help", "Keyboard shortcuts and usage", 'H', Screen::Help),
        ]);
        Self { menu }
    }

    /// Screen bound to a shortcut key, if any.
    pub fn screen_for_shortcut(&self, key: char) -> Option<Screen> {
        self.menu
            .items
            .iter()
            .find(|option| option.shortcut.eq_ignore_ascii_case(&key))
            .map(|option| option.screen)
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new("Election Khelo Admin Console")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.menu.render(f, chunks[1], |_, option, is_selected| {
            let style = if is_selected {
                Styles::selected()
            } else {
                Styles::default()
            };
            let line = Line::from(vec![
                Span::styled(format!("[{}] ", option.shortcut), Styles::info()),
                Span::styled(format!("{:<18}", option.title), style),
                Span::styled(option.description.clone(), Styles::inactive()),
            ]);
            ListItem::new(line)
        });
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_are_case_insensitive() {
        let menu = MainMenuScreen::new();
        assert_eq!(menu.screen_for_shortcut('q'), Some(Screen::Questions));
        assert_eq!(menu.screen_for_shortcut('U'), Some(Screen::Users));
        assert_eq!(menu.screen_for_shortcut('x'), None);
    }
}
