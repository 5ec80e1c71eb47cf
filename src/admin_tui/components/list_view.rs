//! Generic ordered list view shared by every resource screen.
//!
//! Holds the fetched records in API order (no client-side sort) plus the
//! ratatui selection state. Row content comes from a caller-supplied
//! formatter; the view itself never mutates its items and never performs I/O.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::admin_tui::ui::Styles;

/// Configuration for list view rendering
#[derive(Debug, Clone)]
pub struct ListViewConfig {
    pub title: String,
    pub empty_text: String,
    pub highlight_selected: bool,
    pub show_borders: bool,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            title: "List".to_string(),
            empty_text: "No records found".to_string(),
            highlight_selected: true,
            show_borders: true,
        }
    }
}

impl ListViewConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = text.to_string();
        self
    }
}

/// Generic list view component
pub struct ListView<T> {
    pub items: Vec<T>,
    pub state: ListState,
    pub config: ListViewConfig,
}

impl<T> ListView<T> {
    pub fn new(config: ListViewConfig) -> Self {
        Self {
            items: Vec::new(),
            state: ListState::default(),
            config,
        }
    }

    /// Replace items and keep the selection in bounds.
    pub fn set_items(&mut self, items: Vec<T>) {
        let selected = self.state.selected();
        self.items = items;

        if let Some(idx) = selected {
            if idx < self.items.len() {
                self.state.select(Some(idx));
            } else if !self.items.is_empty() {
                self.state.select(Some(self.items.len() - 1));
            } else {
                self.state.select(None);
            }
        } else if !self.items.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Render the list; the formatter receives the zero-based row index, the
    /// item, and whether the row is selected.
    pub fn render<F>(&mut self, f: &mut Frame, area: Rect, item_formatter: F)
    where
        F: Fn(usize, &T, bool) -> ListItem,
    {
        let block = if self.config.show_borders {
            Block::default()
                .title(self.config.title.clone())
                .borders(Borders::ALL)
                .border_style(Styles::active_border())
        } else {
            Block::default()
        };

        if self.items.is_empty() {
            let placeholder = Paragraph::new(self.config.empty_text.clone())
                .style(Styles::inactive())
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = Some(i) == self.state.selected();
                item_formatter(i, item, is_selected)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(if self.config.highlight_selected {
                Styles::selected()
            } else {
                Style::default()
            });

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with(items: Vec<&str>) -> ListView<String> {
        let mut view = ListView::new(ListViewConfig::new("Test"));
        view.set_items(items.into_iter().map(String::from).collect());
        view
    }

    #[test]
    fn test_set_items_selects_first_row() {
        let view = view_with(vec!["a", "b"]);
        assert_eq!(view.selected_index(), Some(0));
        assert_eq!(view.selected().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_selection_clamps_when_items_shrink() {
        let mut view = view_with(vec!["a", "b", "c"]);
        view.next();
        view.next();
        assert_eq!(view.selected_index(), Some(2));

        view.set_items(vec!["a".to_string()]);
        assert_eq!(view.selected_index(), Some(0));

        view.set_items(Vec::new());
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut view = view_with(vec!["a", "b"]);
        view.previous();
        assert_eq!(view.selected_index(), Some(1));
        view.next();
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut view: ListView<String> = ListView::new(ListViewConfig::default());
        view.next();
        view.previous();
        assert_eq!(view.selected_index(), None);
    }
}
