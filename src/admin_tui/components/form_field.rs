//! Form field component for user input

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::admin_tui::ui::Styles;

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldKind {
    Text,
    Number,
    Date,
    Dropdown,
    Checkbox,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub kind: FormFieldKind,
    pub is_focused: bool,
    pub cursor_position: usize,
    pub dropdown_options: Vec<String>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
    pub checked: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, kind: FormFieldKind) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            kind,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
            checked: false,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = self.value.len();
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.dropdown_options = options;
        if !self.dropdown_options.is_empty() {
            self.dropdown_state.select(Some(0));
            self.value = self.dropdown_options[0].clone();
        }
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if !focused {
            self.show_dropdown = false;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if matches!(self.kind, FormFieldKind::Dropdown | FormFieldKind::Checkbox) {
            return;
        }
        self.value.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = floor_char_boundary(&self.value, self.cursor_position - 1);
            self.value.remove(prev);
            self.cursor_position = prev;
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.len() {
            self.value.remove(self.cursor_position);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = floor_char_boundary(&self.value, self.cursor_position - 1);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.len() {
            let mut next = self.cursor_position + 1;
            while next < self.value.len() && !self.value.is_char_boundary(next) {
                next += 1;
            }
            self.cursor_position = next;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.checked = false;
        self.validation_error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Toggle a checkbox field. No-op for other kinds.
    pub fn toggle(&mut self) {
        if self.kind == FormFieldKind::Checkbox {
            self.checked = !self.checked;
        }
    }

    pub fn open_dropdown(&mut self) {
        if self.kind == FormFieldKind::Dropdown && !self.dropdown_options.is_empty() {
            self.show_dropdown = true;
        }
    }

    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        self.dropdown_state
            .select(Some((selected + 1) % self.dropdown_options.len()));
    }

    pub fn select_dropdown_value(&mut self) {
        if let Some(selected) = self.dropdown_state.selected() {
            if let Some(value) = self.dropdown_options.get(selected) {
                self.value = value.clone();
                self.cursor_position = self.value.len();
                self.show_dropdown = false;
                self.validation_error = None;
            }
        }
    }

    /// Select a dropdown value by its string form, used when pre-filling the
    /// form from an existing entity.
    pub fn set_dropdown_value(&mut self, value: &str) {
        if let Some(idx) = self.dropdown_options.iter().position(|o| o == value) {
            self.dropdown_state.select(Some(idx));
            self.value = value.to_string();
            self.cursor_position = self.value.len();
        }
    }

    /// Validate field value against its kind
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;

        match self.kind {
            FormFieldKind::Date => {
                if !self.is_empty()
                    && chrono::NaiveDate::parse_from_str(self.trimmed(), "%Y-%m-%d").is_err()
                {
                    self.validation_error = Some("Invalid date format (YYYY-MM-DD)".to_string());
                    return false;
                }
            }
            FormFieldKind::Number => {
                if self.trimmed().parse::<i64>().is_err() {
                    self.validation_error = Some("Must be a number".to_string());
                    return false;
                }
            }
            _ => {}
        }

        true
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = if let Some(ref error) = self.validation_error {
            format!("{} - {}", self.label, error)
        } else {
            self.label.clone()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let display_text = match self.kind {
            FormFieldKind::Checkbox => {
                if self.checked {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            _ => {
                if self.value.is_empty() && !self.placeholder.is_empty() {
                    self.placeholder.clone()
                } else {
                    self.value.clone()
                }
            }
        };

        let text_style = if self.value.is_empty()
            && !self.placeholder.is_empty()
            && self.kind != FormFieldKind::Checkbox
        {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text).style(text_style).block(block);
        f.render_widget(paragraph, area);

        if self.is_focused
            && matches!(
                self.kind,
                FormFieldKind::Text | FormFieldKind::Number | FormFieldKind::Date
            )
        {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render the dropdown option list over the given area if it is open
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.dropdown_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(option.clone()).style(style)
            })
            .collect();

        let block = Block::default()
            .title(self.label.clone())
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        f.render_widget(ratatui::widgets::Clear, area);
        f.render_stateful_widget(List::new(items).block(block), area, &mut self.dropdown_state);
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_round_cursor() {
        let mut field = FormField::new("Name", FormFieldKind::Text);
        for c in "abc".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "abc");

        field.move_cursor_left();
        field.delete_char();
        assert_eq!(field.value, "ac");
        assert_eq!(field.cursor_position, 1);
    }

    #[test]
    fn test_number_validation() {
        let mut field = FormField::new("Age", FormFieldKind::Number).with_value("58");
        assert!(field.validate());

        let mut bad = FormField::new("Age", FormFieldKind::Number).with_value("old");
        assert!(!bad.validate());
        assert!(bad.validation_error.is_some());
    }

    #[test]
    fn test_date_validation_allows_empty() {
        let mut empty = FormField::new("Term End", FormFieldKind::Date);
        assert!(empty.validate());

        let mut good = FormField::new("Term End", FormFieldKind::Date).with_value("2024-01-31");
        assert!(good.validate());

        let mut bad = FormField::new("Term End", FormFieldKind::Date).with_value("31/01/2024");
        assert!(!bad.validate());
    }

    #[test]
    fn test_checkbox_toggle_only_applies_to_checkboxes() {
        let mut check = FormField::new("Current", FormFieldKind::Checkbox);
        check.toggle();
        assert!(check.checked);

        let mut text = FormField::new("Name", FormFieldKind::Text);
        text.toggle();
        assert!(!text.checked);
    }

    #[test]
    fn test_dropdown_selection() {
        let mut field = FormField::new("Gender", FormFieldKind::Dropdown)
            .with_options(vec!["male".into(), "female".into(), "other".into()]);
        assert_eq!(field.value, "male");

        field.dropdown_down();
        field.select_dropdown_value();
        assert_eq!(field.value, "female");

        field.set_dropdown_value("other");
        assert_eq!(field.value, "other");
        assert_eq!(field.dropdown_state.selected(), Some(2));
    }

    #[test]
    fn test_typing_is_ignored_for_dropdowns() {
        let mut field =
            FormField::new("Role", FormFieldKind::Dropdown).with_options(vec!["user".into()]);
        field.insert_char('x');
        assert_eq!(field.value, "user");
    }
}
