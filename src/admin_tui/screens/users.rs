//! Users management screen: read-only table with server-side filters and
//! pagination

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use crate::admin_tui::components::table::{
    format_header, format_row, user_row_cells, USER_HEADER, USER_WIDTHS,
};
use crate::admin_tui::components::{FormField, FormFieldKind, ListView, ListViewConfig};
use crate::admin_tui::events::RequestSeq;
use crate::admin_tui::ui::Styles;
use crate::models::{Role, User, UserFilters};

const FILTER_COUNT: usize = 4;

pub struct UsersScreen {
    pub username_filter: FormField,
    pub email_filter: FormField,
    pub role_filter: FormField,
    pub verified_filter: FormField,
    /// 0..4 focuses a filter field, FILTER_COUNT focuses the table
    pub focus: usize,
    pub list: ListView<User>,
    pub page: u32,
    pub total_pages: u32,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
    pub seq: RequestSeq,
}

impl UsersScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            username_filter: FormField::new("Username", FormFieldKind::Text)
                .with_placeholder("Search username"),
            email_filter: FormField::new("Email", FormFieldKind::Text)
                .with_placeholder("Search email"),
            role_filter: FormField::new("Role", FormFieldKind::Dropdown).with_options(vec![
                "all".to_string(),
                Role::User.as_str().to_string(),
                Role::Admin.as_str().to_string(),
            ]),
            verified_filter: FormField::new("Verified", FormFieldKind::Dropdown).with_options(
                vec![
                    "all".to_string(),
                    "verified".to_string(),
                    "not verified".to_string(),
                ],
            ),
            focus: FILTER_COUNT,
            list: ListView::new(ListViewConfig::new("Users").with_empty_text("No users found")),
            page: 1,
            total_pages: 1,
            is_loading: false,
            fetch_error: None,
            seq: RequestSeq::default(),
        };
        screen.update_focus();
        screen
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.is_loading = true;
        self.seq.next()
    }

    fn filters_mut(&mut self) -> [&mut FormField; FILTER_COUNT] {
        [
            &mut self.username_filter,
            &mut self.email_filter,
            &mut self.role_filter,
            &mut self.verified_filter,
        ]
    }

    pub fn focused_filter_mut(&mut self) -> Option<&mut FormField> {
        match self.focus {
            0 => Some(&mut self.username_filter),
            1 => Some(&mut self.email_filter),
            2 => Some(&mut self.role_filter),
            3 => Some(&mut self.verified_filter),
            _ => None,
        }
    }

    pub fn update_focus(&mut self) {
        let focus = self.focus;
        for (i, field) in self.filters_mut().into_iter().enumerate() {
            field.set_focus(i == focus);
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = (self.focus + 1) % (FILTER_COUNT + 1);
        self.update_focus();
    }

    pub fn previous_focus(&mut self) {
        self.focus = if self.focus == 0 {
            FILTER_COUNT
        } else {
            self.focus - 1
        };
        self.update_focus();
    }

    pub fn table_focused(&self) -> bool {
        self.focus == FILTER_COUNT
    }

    /// Current filter values as the server-side filter set.
    pub fn filters(&self) -> UserFilters {
        UserFilters {
            username: self.username_filter.trimmed().to_string(),
            email: self.email_filter.trimmed().to_string(),
            role: Role::parse(self.role_filter.trimmed()),
            verified: match self.verified_filter.trimmed() {
                "verified" => Some(true),
                "not verified" => Some(false),
                _ => None,
            },
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let filter_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); FILTER_COUNT])
            .split(chunks[0]);
        self.username_filter.render(f, filter_chunks[0]);
        self.email_filter.render(f, filter_chunks[1]);
        self.role_filter.render(f, filter_chunks[2]);
        self.verified_filter.render(f, filter_chunks[3]);

        let (status, style) = if self.is_loading {
            ("Loading users...".to_string(), Styles::warning())
        } else if let Some(error) = &self.fetch_error {
            (error.clone(), Styles::error())
        } else {
            (
                format!(
                    "Page {} of {} | Enter: apply filters | Left/Right: page",
                    self.page, self.total_pages
                ),
                Styles::info(),
            )
        };
        let status_bar = Paragraph::new(status)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, chunks[1]);

        let table_header =
            Paragraph::new(format_header(&USER_HEADER, &USER_WIDTHS)).style(Styles::title());
        f.render_widget(table_header, chunks[2]);

        self.list.render(f, chunks[3], |_, user, _| {
            ListItem::new(Line::from(format_row(&user_row_cells(user), &USER_WIDTHS)))
        });

        // Dropdown overlays for the filter row
        for (i, chunk) in filter_chunks.iter().enumerate().take(FILTER_COUNT) {
            let field = match i {
                2 => &mut self.role_filter,
                3 => &mut self.verified_filter,
                _ => continue,
            };
            if field.show_dropdown {
                let dropdown_area = Rect {
                    x: chunk.x,
                    y: chunk.y + 2,
                    width: chunk.width.min(20),
                    height: 5,
                };
                field.render_dropdown(f, dropdown_area);
            }
        }
    }
}

impl Default for UsersScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_are_empty() {
        let screen = UsersScreen::new();
        assert_eq!(screen.filters(), UserFilters::default());
    }

    #[test]
    fn test_filters_map_dropdown_values() {
        let mut screen = UsersScreen::new();
        screen.username_filter.insert_char('p');
        screen.role_filter.set_dropdown_value("admin");
        screen.verified_filter.set_dropdown_value("not verified");

        let filters = screen.filters();
        assert_eq!(filters.username, "p");
        assert_eq!(filters.role, Some(Role::Admin));
        assert_eq!(filters.verified, Some(false));
    }

    #[test]
    fn test_pagination_bounds() {
        let mut screen = UsersScreen::new();
        screen.page = 1;
        screen.total_pages = 3;
        assert!(!screen.has_previous_page());
        assert!(screen.has_next_page());

        screen.page = 3;
        assert!(screen.has_previous_page());
        assert!(!screen.has_next_page());
    }

    #[test]
    fn test_focus_cycles_through_filters_and_table() {
        let mut screen = UsersScreen::new();
        assert!(screen.table_focused());

        screen.next_focus();
        assert_eq!(screen.focus, 0);
        assert!(screen.focused_filter_mut().is_some());

        screen.previous_focus();
        assert!(screen.table_focused());
    }
}
