//! Dedicated add-question screen with success/error banners

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::admin_tui::components::status_display::render_banner;
use crate::admin_tui::components::StatusMessage;
use crate::admin_tui::ui::Styles;

use super::question_form::QuestionForm;

pub struct AddQuestionScreen {
    pub form: QuestionForm,
    pub submitting: bool,
    pub banner: Option<StatusMessage>,
}

impl AddQuestionScreen {
    pub fn new() -> Self {
        Self {
            form: QuestionForm::new(),
            submitting: false,
            banner: None,
        }
    }

    /// Apply the create result: success clears the form and replaces any
    /// error banner; failure keeps the entered data for another attempt.
    pub fn apply_result(&mut self, result: Result<String, String>) {
        self.submitting = false;
        match result {
            Ok(message) => {
                self.banner = Some(StatusMessage::success(message));
                self.form.reset();
            }
            Err(message) => {
                self.banner = Some(StatusMessage::error(message));
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        render_banner(f, chunks[0], self.banner.as_ref());
        self.form.draw(f, chunks[1]);

        let controls = if self.submitting {
            Line::styled("Please wait ...", Styles::warning())
        } else {
            Line::styled("Enter: Add Question | Esc: Back", Styles::info())
        };
        f.render_widget(Paragraph::new(controls), chunks[2]);
    }
}

impl Default for AddQuestionScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_tui::components::StatusKind;

    #[test]
    fn test_success_replaces_error_banner_and_clears_form() {
        let mut screen = AddQuestionScreen::new();
        screen.form.question_text.insert_char('x');
        screen.submitting = true;
        screen.banner = Some(StatusMessage::error("Failed to create question"));

        screen.apply_result(Ok("Question created successfully!".to_string()));

        let banner = screen.banner.as_ref().unwrap();
        assert_eq!(banner.kind, StatusKind::Success);
        assert_eq!(banner.message, "Question created successfully!");
        assert!(!screen.submitting);
        assert!(screen.form.question_text.is_empty());
    }

    #[test]
    fn test_failure_keeps_entered_data() {
        let mut screen = AddQuestionScreen::new();
        screen.form.question_text.insert_char('x');

        screen.apply_result(Err("Failed to create question".to_string()));

        assert!(screen.banner.as_ref().unwrap().is_error());
        assert_eq!(screen.form.question_text.value, "x");
    }
}
