//! Edit/delete modal state machine, generic over the entity type.
//!
//! One controller instance per resource screen. Exactly one mutation may be
//! in flight per controller; confirm/submit controls are rejected while a
//! submission is pending, and a failed submission keeps the dialog open with
//! the error inline.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::admin_tui::ui::{centered_rect, Styles};

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Idle,
    ConfirmingDelete {
        selected: T,
        submitting: bool,
        error: Option<String>,
    },
    Editing {
        /// `None` is the add-new dialog, `Some` edits an existing entity.
        selected: Option<T>,
        submitting: bool,
        error: Option<String>,
    },
}

#[derive(Debug)]
pub struct ModalController<T> {
    state: ModalState<T>,
}

impl<T: Clone> ModalController<T> {
    pub fn new() -> Self {
        Self {
            state: ModalState::Idle,
        }
    }

    pub fn state(&self) -> &ModalState<T> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self.state,
            ModalState::ConfirmingDelete {
                submitting: true,
                ..
            } | ModalState::Editing {
                submitting: true,
                ..
            }
        )
    }

    pub fn is_confirming_delete(&self) -> bool {
        matches!(self.state, ModalState::ConfirmingDelete { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, ModalState::Editing { .. })
    }

    /// Entity the dialog acts on: the delete target, or the edit original.
    pub fn selected(&self) -> Option<&T> {
        match &self.state {
            ModalState::Idle => None,
            ModalState::ConfirmingDelete { selected, .. } => Some(selected),
            ModalState::Editing { selected, .. } => selected.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ModalState::Idle => None,
            ModalState::ConfirmingDelete { error, .. } | ModalState::Editing { error, .. } => {
                error.as_deref()
            }
        }
    }

    /// Open the delete confirmation. Ignored unless the controller is idle.
    pub fn open_delete(&mut self, entity: T) {
        if matches!(self.state, ModalState::Idle) {
            self.state = ModalState::ConfirmingDelete {
                selected: entity,
                submitting: false,
                error: None,
            };
        }
    }

    /// Open the edit dialog for an existing entity.
    pub fn open_edit(&mut self, entity: T) {
        if matches!(self.state, ModalState::Idle) {
            self.state = ModalState::Editing {
                selected: Some(entity),
                submitting: false,
                error: None,
            };
        }
    }

    /// Open the add-new dialog.
    pub fn open_create(&mut self) {
        if matches!(self.state, ModalState::Idle) {
            self.state = ModalState::Editing {
                selected: None,
                submitting: false,
                error: None,
            };
        }
    }

    /// Close the dialog, discarding in-progress edits. Controls are disabled
    /// while a submission is in flight, so cancel is ignored then.
    pub fn cancel(&mut self) {
        if !self.is_submitting() {
            self.state = ModalState::Idle;
        }
    }

    /// Mark the dialog's mutation as in flight. Returns false (and changes
    /// nothing) when the dialog is closed or a mutation is already pending.
    pub fn begin_submit(&mut self) -> bool {
        match &mut self.state {
            ModalState::Idle => false,
            ModalState::ConfirmingDelete {
                submitting, error, ..
            }
            | ModalState::Editing {
                submitting, error, ..
            } => {
                if *submitting {
                    false
                } else {
                    *submitting = true;
                    *error = None;
                    true
                }
            }
        }
    }

    /// A validation failure before any network call: surface the message in
    /// the open dialog.
    pub fn set_error(&mut self, message: String) {
        match &mut self.state {
            ModalState::Idle => {}
            ModalState::ConfirmingDelete { error, .. } | ModalState::Editing { error, .. } => {
                *error = Some(message);
            }
        }
    }

    /// The in-flight mutation succeeded: close the dialog. Returns true when
    /// a dialog was actually open, which doubles as the refetch signal.
    pub fn submit_succeeded(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = ModalState::Idle;
        was_open
    }

    /// The in-flight mutation failed: stay open, show the error inline.
    pub fn submit_failed(&mut self, message: String) {
        match &mut self.state {
            ModalState::Idle => {}
            ModalState::ConfirmingDelete {
                submitting, error, ..
            }
            | ModalState::Editing {
                submitting, error, ..
            } => {
                *submitting = false;
                *error = Some(message);
            }
        }
    }
}

impl<T: Clone> Default for ModalController<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a delete-confirmation dialog over the screen.
pub fn draw_confirm_dialog(
    f: &mut Frame,
    area: Rect,
    subject: &str,
    error: Option<&str>,
    submitting: bool,
) {
    let popup_area = centered_rect(60, 30, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(format!("Are you sure you want to delete {}?", subject)),
        Line::from(""),
    ];
    if let Some(error) = error {
        lines.push(Line::styled(error.to_string(), Styles::error()));
        lines.push(Line::from(""));
    }
    let controls = if submitting {
        Line::styled("Deleting...", Styles::warning())
    } else {
        Line::styled("Enter: Yes, Delete | Esc: Cancel", Styles::info())
    };
    lines.push(controls);

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );

    f.render_widget(dialog, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_flow_success_closes_and_signals_refetch() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_delete("q1");
        assert!(modal.is_confirming_delete());

        assert!(modal.begin_submit());
        assert!(modal.is_submitting());

        assert!(modal.submit_succeeded());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_failed_delete_keeps_dialog_open_with_error() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_delete("q1");
        modal.begin_submit();
        modal.submit_failed("Failed to delete the question.".to_string());

        assert!(modal.is_confirming_delete());
        assert!(!modal.is_submitting());
        assert_eq!(modal.error(), Some("Failed to delete the question."));
        assert_eq!(modal.selected(), Some(&"q1"));
    }

    #[test]
    fn test_single_mutation_in_flight() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_delete("q1");
        assert!(modal.begin_submit());
        assert!(!modal.begin_submit());
    }

    #[test]
    fn test_cancel_is_disabled_while_submitting() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_edit("q1");
        modal.begin_submit();
        modal.cancel();
        assert!(modal.is_open());

        modal.submit_failed("boom".to_string());
        modal.cancel();
        assert!(!modal.is_open());
    }

    #[test]
    fn test_open_create_has_no_selection() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_create();
        assert!(modal.is_editing());
        assert_eq!(modal.selected(), None);
    }

    #[test]
    fn test_dialogs_do_not_stack() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_delete("q1");
        modal.open_edit("q2");
        assert!(modal.is_confirming_delete());
        assert_eq!(modal.selected(), Some(&"q1"));
    }

    #[test]
    fn test_begin_submit_clears_previous_error() {
        let mut modal: ModalController<&str> = ModalController::new();
        modal.open_delete("q1");
        modal.begin_submit();
        modal.submit_failed("first".to_string());
        assert!(modal.begin_submit());
        assert_eq!(modal.error(), None);
    }
}
