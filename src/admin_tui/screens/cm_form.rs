//! Create/edit form for Chief Minister records

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::admin_tui::components::{FormField, FormFieldKind};
use crate::models::{ChiefMinister, CmPayload, Gender};

const FIELD_COUNT: usize = 8;

pub struct CmForm {
    pub name: FormField,
    pub party: FormField,
    pub state: FormField,
    pub age: FormField,
    pub gender: FormField,
    pub term_start: FormField,
    pub term_end: FormField,
    pub is_current: FormField,
    focus: usize,
}

impl CmForm {
    pub fn new() -> Self {
        let gender_options = Gender::all()
            .iter()
            .map(|g| g.as_str().to_string())
            .collect();

        let mut form = Self {
            name: FormField::new("Name", FormFieldKind::Text),
            party: FormField::new("Party", FormFieldKind::Text),
            state: FormField::new("State", FormFieldKind::Text),
            age: FormField::new("Age", FormFieldKind::Number),
            gender: FormField::new("Gender", FormFieldKind::Dropdown).with_options(gender_options),
            term_start: FormField::new("Term Start", FormFieldKind::Date)
                .with_placeholder("YYYY-MM-DD"),
            term_end: FormField::new("Term End", FormFieldKind::Date)
                .with_placeholder("YYYY-MM-DD"),
            is_current: FormField::new("Is Current CM", FormFieldKind::Checkbox),
            focus: 0,
        };
        form.update_focus();
        form
    }

    fn fields_mut(&mut self) -> [&mut FormField; FIELD_COUNT] {
        [
            &mut self.name,
            &mut self.party,
            &mut self.state,
            &mut self.age,
            &mut self.gender,
            &mut self.term_start,
            &mut self.term_end,
            &mut self.is_current,
        ]
    }

    fn focused_mut(&mut self) -> &mut FormField {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.party,
            2 => &mut self.state,
            3 => &mut self.age,
            4 => &mut self.gender,
            5 => &mut self.term_start,
            6 => &mut self.term_end,
            _ => &mut self.is_current,
        }
    }

    fn update_focus(&mut self) {
        let focus = self.focus;
        for (i, field) in self.fields_mut().into_iter().enumerate() {
            field.set_focus(i == focus);
        }
    }

    pub fn reset(&mut self) {
        for field in self.fields_mut() {
            field.clear();
            field.validation_error = None;
        }
        self.gender.set_dropdown_value(Gender::Male.as_str());
        self.focus = 0;
        self.update_focus();
    }

    /// Pre-fill the form from an existing record.
    pub fn load(&mut self, cm: &ChiefMinister) {
        self.reset();
        self.name = FormField::new("Name", FormFieldKind::Text).with_value(&cm.name);
        self.party = FormField::new("Party", FormFieldKind::Text).with_value(&cm.party);
        self.state = FormField::new("State", FormFieldKind::Text).with_value(&cm.state);
        self.age = FormField::new("Age", FormFieldKind::Number).with_value(&cm.age.to_string());
        self.gender.set_dropdown_value(cm.gender.as_str());
        if let Some(start) = cm.term_start {
            self.term_start = FormField::new("Term Start", FormFieldKind::Date)
                .with_value(&start.date_naive().to_string());
        }
        if let Some(end) = cm.term_end {
            self.term_end = FormField::new("Term End", FormFieldKind::Date)
                .with_value(&end.date_naive().to_string());
        }
        self.is_current.checked = cm.is_current;
        self.focus = 0;
        self.update_focus();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
        self.update_focus();
    }

    pub fn previous_field(&mut self) {
        self.focus = if self.focus == 0 {
            FIELD_COUNT - 1
        } else {
            self.focus - 1
        };
        self.update_focus();
    }

    /// Handle a key aimed at the form. Returns true when the key was
    /// consumed; Enter and Esc are left to the owning modal unless the
    /// gender dropdown is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.gender.show_dropdown {
            match key.code {
                KeyCode::Up => self.gender.dropdown_up(),
                KeyCode::Down => self.gender.dropdown_down(),
                KeyCode::Enter => self.gender.select_dropdown_value(),
                KeyCode::Esc => self.gender.show_dropdown = false,
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.previous_field(),
            KeyCode::Char(' ') => match self.focused_mut().kind {
                FormFieldKind::Checkbox => self.focused_mut().toggle(),
                FormFieldKind::Dropdown => self.focused_mut().open_dropdown(),
                _ => self.focused_mut().insert_char(' '),
            },
            KeyCode::Char(c) => self.focused_mut().insert_char(c),
            KeyCode::Backspace => self.focused_mut().delete_char(),
            KeyCode::Delete => self.focused_mut().delete_char_forward(),
            KeyCode::Left => self.focused_mut().move_cursor_left(),
            KeyCode::Right => self.focused_mut().move_cursor_right(),
            KeyCode::Home => self.focused_mut().move_cursor_to_start(),
            KeyCode::End => self.focused_mut().move_cursor_to_end(),
            _ => return false,
        }
        true
    }

    /// Validate and build the trimmed payload. The first failing rule wins.
    pub fn validate(&self) -> Result<CmPayload, String> {
        if self.name.is_empty() {
            return Err("Name is required.".to_string());
        }
        if self.party.is_empty() {
            return Err("Party is required.".to_string());
        }
        if self.state.is_empty() {
            return Err("State is required.".to_string());
        }

        let age = self
            .age
            .trimmed()
            .parse::<u32>()
            .map_err(|_| "Age must be a number.".to_string())?;

        let gender =
            Gender::parse(self.gender.trimmed()).ok_or_else(|| "Select a gender.".to_string())?;

        let term_start = parse_optional_date(&self.term_start, "term start")?;
        let term_end = parse_optional_date(&self.term_end, "term end")?;

        Ok(CmPayload {
            name: self.name.trimmed().to_string(),
            party: self.party.trimmed().to_string(),
            state: self.state.trimmed().to_string(),
            age,
            gender,
            term_start,
            term_end,
            is_current: self.is_current.checked,
        })
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3); FIELD_COUNT])
            .split(area);

        self.name.render(f, chunks[0]);
        self.party.render(f, chunks[1]);
        self.state.render(f, chunks[2]);
        self.age.render(f, chunks[3]);
        self.gender.render(f, chunks[4]);
        self.term_start.render(f, chunks[5]);
        self.term_end.render(f, chunks[6]);
        self.is_current.render(f, chunks[7]);

        if self.gender.show_dropdown {
            let dropdown_area = Rect {
                x: chunks[4].x + 1,
                y: chunks[4].y + 1,
                width: chunks[4].width.saturating_sub(2).min(24),
                height: 5,
            };
            self.gender.render_dropdown(f, dropdown_area);
        }
    }
}

impl Default for CmForm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_optional_date(field: &FormField, label: &str) -> Result<Option<NaiveDate>, String> {
    if field.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(field.trimmed(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid {} date. Use YYYY-MM-DD.", label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn filled_form() -> CmForm {
        let mut form = CmForm::new();
        form.name = form.name.clone().with_value("  A. Sharma ");
        form.party = form.party.clone().with_value("Unity Party");
        form.state = form.state.clone().with_value(" Rajasthan");
        form.age = form.age.clone().with_value(" 58 ");
        form.gender.set_dropdown_value("female");
        form.term_start = form.term_start.clone().with_value("2019-12-17");
        form.is_current.checked = true;
        form
    }

    #[test]
    fn test_valid_submission_yields_trimmed_payload() {
        let payload = filled_form().validate().unwrap();
        assert_eq!(
            payload,
            CmPayload {
                name: "A. Sharma".to_string(),
                party: "Unity Party".to_string(),
                state: "Rajasthan".to_string(),
                age: 58,
                gender: Gender::Female,
                term_start: NaiveDate::from_ymd_opt(2019, 12, 17),
                term_end: None,
                is_current: true,
            }
        );
    }

    #[test]
    fn test_blank_required_fields_block_submission() {
        let mut form = filled_form();
        form.name = FormField::new("Name", FormFieldKind::Text).with_value("   ");
        assert_eq!(form.validate().unwrap_err(), "Name is required.");

        let mut form = filled_form();
        form.state = FormField::new("State", FormFieldKind::Text);
        assert_eq!(form.validate().unwrap_err(), "State is required.");
    }

    #[test]
    fn test_non_numeric_age_blocks_submission() {
        let mut form = filled_form();
        form.age = FormField::new("Age", FormFieldKind::Number).with_value("fifty");
        assert_eq!(form.validate().unwrap_err(), "Age must be a number.");
    }

    #[test]
    fn test_malformed_date_blocks_submission() {
        let mut form = filled_form();
        form.term_end = FormField::new("Term End", FormFieldKind::Date).with_value("17/12/2019");
        assert_eq!(
            form.validate().unwrap_err(),
            "Invalid term end date. Use YYYY-MM-DD."
        );
    }

    #[test]
    fn test_load_prefills_every_field() {
        let cm = ChiefMinister {
            id: "cm1".to_string(),
            name: "A. Sharma".to_string(),
            party: "Unity Party".to_string(),
            state: "Rajasthan".to_string(),
            age: 58,
            gender: Gender::Other,
            term_start: Some(Utc.with_ymd_and_hms(2019, 12, 17, 0, 0, 0).unwrap()),
            term_end: None,
            is_current: true,
        };

        let mut form = CmForm::new();
        form.load(&cm);

        assert_eq!(form.name.value, "A. Sharma");
        assert_eq!(form.age.value, "58");
        assert_eq!(form.gender.value, "other");
        assert_eq!(form.term_start.value, "2019-12-17");
        assert!(form.term_end.is_empty());
        assert!(form.is_current.checked);

        // A loaded form should validate as-is
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_space_toggles_checkbox_and_types_in_text() {
        let mut form = CmForm::new();
        // Focus the checkbox (last field)
        form.previous_field();
        form.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert!(form.is_current.checked);

        let mut form = CmForm::new();
        form.handle_key(KeyEvent::from(KeyCode::Char('a')));
        form.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        form.handle_key(KeyEvent::from(KeyCode::Char('b')));
        assert_eq!(form.name.value, "a b");
    }
}
