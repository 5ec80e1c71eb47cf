//! Chief Minister management screen: table, edit modal, delete confirmation

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, ListItem, Paragraph},
    Frame,
};

use crate::admin_tui::components::modal::draw_confirm_dialog;
use crate::admin_tui::components::table::{
    cm_row_cells, format_header, format_row, CM_HEADER, CM_WIDTHS,
};
use crate::admin_tui::components::{ListView, ListViewConfig, ModalController};
use crate::admin_tui::events::RequestSeq;
use crate::admin_tui::ui::{centered_rect, Styles};
use crate::models::ChiefMinister;

use super::cm_form::CmForm;

pub struct CmScreen {
    pub list: ListView<ChiefMinister>,
    pub modal: ModalController<ChiefMinister>,
    pub form: CmForm,
    pub is_loading: bool,
    pub fetch_error: Option<String>,
    pub seq: RequestSeq,
}

impl CmScreen {
    pub fn new() -> Self {
        Self {
            list: ListView::new(
                ListViewConfig::new("Chief Ministers").with_empty_text("No CM records found"),
            ),
            modal: ModalController::new(),
            form: CmForm::new(),
            is_loading: false,
            fetch_error: None,
            seq: RequestSeq::default(),
        }
    }

    /// Mark a fetch as issued and return its request token.
    pub fn begin_fetch(&mut self) -> u64 {
        self.is_loading = true;
        self.seq.next()
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

        let (title, style) = if self.is_loading {
            ("Loading Chief Ministers...".to_string(), Styles::warning())
        } else if let Some(error) = &self.fetch_error {
            (error.clone(), Styles::error())
        } else {
            (
                format!(
                    "{} records | a: add | e: edit | d: delete | r: refresh",
                    self.list.len()
                ),
                Styles::info(),
            )
        };
        let header = Paragraph::new(title)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let table_header =
            Paragraph::new(format_header(&CM_HEADER, &CM_WIDTHS)).style(Styles::title());
        f.render_widget(table_header, chunks[1]);

        self.list.render(f, chunks[2], |i, cm, _| {
            ListItem::new(Line::from(format_row(&cm_row_cells(i, cm), &CM_WIDTHS)))
        });

        if self.modal.is_confirming_delete() {
            let subject = self
                .modal
                .selected()
                .map(|cm| cm.name.clone())
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
        let popup_area = centered_rect(70, 90, area);
        f.render_widget(Clear, popup_area);

        let title = if self.modal.selected().is_some() {
            "Edit Chief Minister"
        } else {
            "Add New Chief Minister"
        };
        let block = Block::default()
            .title(title)
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
            let error_line = Paragraph::new(error.to_string()).style(Styles::error());
            f.render_widget(error_line, chunks[1]);
        }

        let controls = if self.modal.is_submitting() {
            Line::styled("Saving...", Styles::warning())
        } else {
            Line::styled("Enter: Save | Esc: Cancel", Styles::info())
        };
        f.render_widget(Paragraph::new(controls), chunks[2]);
    }
}

impl Default for CmScreen {
    fn default() -> Self {
        Self::new()
    }
}
