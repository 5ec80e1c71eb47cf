//! Question management screen: search box, question cards, edit/delete modals

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Paragraph},
    Frame,
};

use crate::admin_tui::components::modal::draw_confirm_dialog;
use crate::admin_tui::components::{FormField, FormFieldKind, ListView, ListViewConfig, ModalController};
use crate::admin_tui::events::RequestSeq;
use crate::admin_tui::ui::{centered_rect, Styles};
use crate::models::Question;

use super::question_form::QuestionForm;

pub struct QuestionsScreen {
    pub search: FormField,
    pub search_focused: bool,
    pub list: ListView<Question>,
    pub modal: ModalController<Question>,
    pub form: QuestionForm,
    pub total_questions: u64,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
    pub seq: RequestSeq,
}

impl QuestionsScreen {
    pub fn new() -> Self {
        Self {
            search: FormField::new("Search", FormFieldKind::Text)
                .with_placeholder("Search questions, Enter to apply"),
            search_focused: false,
            list: ListView::new(
                ListViewConfig::new("Questions").with_empty_text("No questions found."),
            ),
            modal: ModalController::new(),
            form: QuestionForm::new(),
            total_questions: 0,
            is_loading: false,
            fetch_error: None,
            seq: RequestSeq::default(),
        }
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.is_loading = true;
        self.seq.next()
    }

    pub fn set_search_focus(&mut self, focused: bool) {
        self.search_focused = focused;
        self.search.set_focus(focused);
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.search.render(f, chunks[0]);

        let (status, style) = if self.is_loading {
            ("Loading questions...".to_string(), Styles::warning())
        } else if let Some(error) = &self.fetch_error {
            (error.clone(), Styles::error())
        } else {
            (
                format!(
                    "Total questions: {} | /: search | a: add | e: edit | d: delete",
                    self.total_questions
                ),
                Styles::info(),
            )
        };
        f.render_widget(Paragraph::new(status).style(style), chunks[1]);

        self.list.render(f, chunks[2], |i, question, is_selected| {
            ListItem::new(question_card(i, question, is_selected))
        });

        if self.modal.is_confirming_delete() {
            let subject = self
                .modal
                .selected()
                .map(|q| format!("\"{}\"", q.question_text))
                .unwrap_or_default();
            draw_confirm_dialog(
                f,
                area,
                &subject,
                self.modal.error(),
                self.modal.is_submitting(),
            );
        } else if self.modal.is_editing() {
            self.draw_edit_dialog(f, area);
        }
    }

    fn draw_edit_dialog(&mut self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 90, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Edit Question")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        self.form.draw(f, chunks[0]);

        if let Some(error) = self.modal.error() {
            f.render_widget(
                Paragraph::new(error.to_string()).style(Styles::error()),
                chunks[1],
            );
        }

        let controls = if self.modal.is_submitting() {
            Line::styled("Please wait ...", Styles::warning())
        } else {
            Line::styled("Enter: Update Question | Esc: Cancel", Styles::info())
        };
        f.render_widget(Paragraph::new(controls), chunks[2]);
    }
}

impl Default for QuestionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Card lines for one question row: numbered text, lettered options with the
/// correct one highlighted, and the creation timestamp.
fn question_card(index: usize, question: &Question, is_selected: bool) -> Vec<Line<'static>> {
    let title_style = if is_selected {
        Styles::selected()
    } else {
        Styles::title()
    };

    let mut lines = vec![Line::styled(
        format!("{}. {}", index + 1, question.question_text),
        title_style,
    )];

    for (i, option) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let is_correct = i == question.correct_option_index;
        let style = if is_correct {
            Styles::success()
        } else {
            Styles::default()
        };
        let marker = if is_correct { " (correct)" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("   {}. {}{}", letter, option, marker),
            style,
        )));
    }

    lines.push(Line::styled(
        format!(
            "   Created at: {}",
            question.created_at.format("%Y-%m-%d %H:%M")
        ),
        Styles::inactive(),
    ));
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_question_card_numbers_rows_and_marks_correct_option() {
        let question = Question {
            id: "q1".to_string(),
            question_text: "Capital of France?".to_string(),
            options: vec!["Paris".to_string(), "Lyon".to_string()],
            correct_option_index: 0,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap(),
        };

        let lines = question_card(2, &question, false);
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.clone()).collect())
            .collect();

        assert_eq!(text[0], "3. Capital of France?");
        assert_eq!(text[1], "   A. Paris (correct)");
        assert_eq!(text[2], "   B. Lyon");
        assert!(text[3].contains("2025-06-01 10:30"));
    }
}
