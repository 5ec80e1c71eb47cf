//! Create/edit form for quiz questions.
//!
//! Option rows are dynamic: 2 to 6 options, one marked correct. Removing an
//! option keeps the correct marker pointing at the same option text when it
//! can, resetting to the first option only when the marked one is removed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::admin_tui::components::{FormField, FormFieldKind};
use crate::admin_tui::ui::Styles;
use crate::models::{Question, QuestionPayload};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

pub struct QuestionForm {
    pub question_text: FormField,
    pub options: Vec<FormField>,
    pub correct_index: usize,
    /// 0 focuses the question text, `1 + i` focuses option `i`
    focus: usize,
}

impl QuestionForm {
    pub fn new() -> Self {
        let mut form = Self {
            question_text: FormField::new("Question Text", FormFieldKind::Text),
            options: vec![option_field(0), option_field(1)],
            correct_index: 0,
            focus: 0,
        };
        form.update_focus();
        form
    }

    pub fn reset(&mut self) {
        self.question_text.clear();
        self.options = vec![option_field(0), option_field(1)];
        self.correct_index = 0;
        self.focus = 0;
        self.update_focus();
    }

    /// Pre-fill from an existing question.
    pub fn load(&mut self, question: &Question) {
        self.question_text =
            FormField::new("Question Text", FormFieldKind::Text).with_value(&question.question_text);
        self.options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| option_field(i).with_value(text))
            .collect();
        if self.options.len() < MIN_OPTIONS {
            while self.options.len() < MIN_OPTIONS {
                self.options.push(option_field(self.options.len()));
            }
        }
        self.correct_index = question.correct_option_index.min(self.options.len() - 1);
        self.focus = 0;
        self.update_focus();
    }

    fn field_count(&self) -> usize {
        1 + self.options.len()
    }

    fn update_focus(&mut self) {
        let focus = self.focus;
        self.question_text.set_focus(focus == 0);
        for (i, option) in self.options.iter_mut().enumerate() {
            option.set_focus(focus == i + 1);
        }
    }

    fn relabel_options(&mut self) {
        for (i, option) in self.options.iter_mut().enumerate() {
            option.label = option_label(i);
        }
    }

    fn focused_mut(&mut self) -> &mut FormField {
        if self.focus == 0 {
            &mut self.question_text
        } else {
            &mut self.options[self.focus - 1]
        }
    }

    /// Index of the focused option row, if an option is focused.
    pub fn focused_option(&self) -> Option<usize> {
        if self.focus == 0 {
            None
        } else {
            Some(self.focus - 1)
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
        self.update_focus();
    }

    pub fn previous_field(&mut self) {
        self.focus = if self.focus == 0 {
            self.field_count() - 1
        } else {
            self.focus - 1
        };
        self.update_focus();
    }

    /// Append an empty option row. Refused at the maximum of six.
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= MAX_OPTIONS {
            return false;
        }
        self.options.push(option_field(self.options.len()));
        self.focus = self.options.len();
        self.update_focus();
        true
    }

    /// Remove the option at `index`. Refused at the minimum of two.
    ///
    /// The correct marker follows the option it pointed at: removing the
    /// marked option resets it to 0, removing an earlier option shifts it
    /// down by one, removing a later option leaves it alone.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }

        self.options.remove(index);
        if self.correct_index == index {
            self.correct_index = 0;
        } else if self.correct_index > index {
            self.correct_index -= 1;
        }

        if self.focus > self.options.len() {
            self.focus = self.options.len();
        }
        self.relabel_options();
        self.update_focus();
        true
    }

    pub fn mark_correct(&mut self, index: usize) {
        if index < self.options.len() {
            self.correct_index = index;
        }
    }

    /// Handle a key aimed at the form. Returns true when consumed; Enter and
    /// Esc are left to the owner.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    self.add_option();
                    return true;
                }
                KeyCode::Char('d') => {
                    if let Some(index) = self.focused_option() {
                        self.remove_option(index);
                    }
                    return true;
                }
                KeyCode::Char('r') => {
                    if let Some(index) = self.focused_option() {
                        self.mark_correct(index);
                    }
                    return true;
                }
                _ => return false,
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
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
    pub fn validate(&self) -> Result<QuestionPayload, String> {
        if self.question_text.is_empty() {
            return Err("Question text is required.".to_string());
        }

        let trimmed: Vec<String> = self
            .options
            .iter()
            .map(|o| o.trimmed().to_string())
            .collect();

        if trimmed.iter().any(|o| o.is_empty()) {
            return Err("All options must be filled.".to_string());
        }
        if trimmed.len() < MIN_OPTIONS {
            return Err("At least 2 options are required.".to_string());
        }
        if self.correct_index >= trimmed.len() {
            return Err("Select a valid correct answer.".to_string());
        }

        Ok(QuestionPayload {
            question_text: self.question_text.trimmed().to_string(),
            options: trimmed,
            correct_option_index: self.correct_index,
        })
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(std::iter::repeat(Constraint::Length(3)).take(self.options.len()));
        constraints.push(Constraint::Length(2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.question_text.render(f, chunks[0]);

        let correct = self.correct_index;
        for (i, option) in self.options.iter_mut().enumerate() {
            option.label = if i == correct {
                format!("{} (correct)", option_label(i))
            } else {
                option_label(i)
            };
            option.render(f, chunks[i + 1]);
        }

        let hint = Paragraph::new(Line::from(
            "Ctrl+N: add option | Ctrl+D: remove option | Ctrl+R: mark correct",
        ))
        .style(Styles::info());
        f.render_widget(hint, chunks[self.options.len() + 1]);
    }
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self::new()
    }
}

fn option_label(index: usize) -> String {
    // A, B, C, ... matching the lettered cards in the list view
    let letter = (b'A' + index as u8) as char;
    format!("Option {}", letter)
}

fn option_field(index: usize) -> FormField {
    FormField::new(&option_label(index), FormFieldKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn form_with_options(options: &[&str], correct: usize) -> QuestionForm {
        let mut form = QuestionForm::new();
        form.question_text =
            FormField::new("Question Text", FormFieldKind::Text).with_value("Capital of France?");
        form.options = options
            .iter()
            .enumerate()
            .map(|(i, o)| option_field(i).with_value(o))
            .collect();
        form.correct_index = correct;
        form
    }

    #[test]
    fn test_valid_submission_yields_trimmed_payload() {
        let form = form_with_options(&[" Paris ", "Lyon"], 0);
        let payload = form.validate().unwrap();
        assert_eq!(
            payload,
            QuestionPayload {
                question_text: "Capital of France?".to_string(),
                options: vec!["Paris".to_string(), "Lyon".to_string()],
                correct_option_index: 0,
            }
        );
    }

    #[test]
    fn test_removing_before_correct_decrements_marker() {
        // 3 options, correct_option_index = 2; removing index 0 yields
        // 2 options with correct_option_index = 1
        let mut form = form_with_options(&["a", "b", "c"], 2);
        assert!(form.remove_option(0));
        assert_eq!(form.options.len(), 2);
        assert_eq!(form.correct_index, 1);
    }

    #[test]
    fn test_removing_the_correct_option_resets_marker() {
        let mut form = form_with_options(&["a", "b", "c"], 1);
        assert!(form.remove_option(1));
        assert_eq!(form.correct_index, 0);
    }

    #[test]
    fn test_removing_after_correct_leaves_marker() {
        let mut form = form_with_options(&["a", "b", "c"], 0);
        assert!(form.remove_option(2));
        assert_eq!(form.correct_index, 0);
    }

    #[test]
    fn test_minimum_two_options_enforced() {
        let mut form = form_with_options(&["a", "b"], 0);
        assert!(!form.remove_option(0));
        assert_eq!(form.options.len(), 2);
    }

    #[test]
    fn test_maximum_six_options_enforced() {
        let mut form = form_with_options(&["a", "b", "c", "d", "e", "f"], 0);
        assert!(!form.add_option());
        assert_eq!(form.options.len(), 6);

        let mut form = form_with_options(&["a", "b"], 0);
        assert!(form.add_option());
        assert_eq!(form.options.len(), 3);
    }

    #[test]
    fn test_blank_question_text_blocks_submission() {
        let mut form = form_with_options(&["a", "b"], 0);
        form.question_text = FormField::new("Question Text", FormFieldKind::Text).with_value("  ");
        assert_eq!(form.validate().unwrap_err(), "Question text is required.");
    }

    #[test]
    fn test_blank_option_blocks_submission() {
        let form = form_with_options(&["a", "   "], 0);
        assert_eq!(form.validate().unwrap_err(), "All options must be filled.");
    }

    #[test]
    fn test_out_of_range_correct_marker_blocks_submission() {
        let form = form_with_options(&["a", "b"], 2);
        assert_eq!(
            form.validate().unwrap_err(),
            "Select a valid correct answer."
        );
    }

    #[test]
    fn test_load_prefills_and_round_trips() {
        let question = Question {
            id: "q1".to_string(),
            question_text: "Capital of France?".to_string(),
            options: vec!["Paris".to_string(), "Lyon".to_string(), "Nice".to_string()],
            correct_option_index: 2,
            created_at: Utc::now(),
        };

        let mut form = QuestionForm::new();
        form.load(&question);

        assert_eq!(form.options.len(), 3);
        assert_eq!(form.correct_index, 2);

        let payload = form.validate().unwrap();
        assert_eq!(payload.options, question.options);
        assert_eq!(payload.correct_option_index, 2);
    }

    #[test]
    fn test_ctrl_shortcuts_edit_option_rows() {
        let mut form = form_with_options(&["a", "b", "c"], 2);
        // Focus option A (field index 1)
        form.next_field();

        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert!(form.handle_key(ctrl('r')));
        assert_eq!(form.correct_index, 0);

        assert!(form.handle_key(ctrl('d')));
        assert_eq!(form.options.len(), 2);

        assert!(form.handle_key(ctrl('n')));
        assert_eq!(form.options.len(), 3);
    }
}
