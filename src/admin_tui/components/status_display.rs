//! Status banner component for success and error messages

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::admin_tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
    Loading,
}

/// Status message with kind and content
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Loading,
        }
    }

    pub fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Styles::info(),
            StatusKind::Success => Styles::success(),
            StatusKind::Error => Styles::error(),
            StatusKind::Loading => Styles::warning(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Render a one-line banner; an absent message renders an empty bordered box
/// so the layout stays stable.
pub fn render_banner(f: &mut Frame, area: Rect, message: Option<&StatusMessage>) {
    let (text, style) = match message {
        Some(msg) => (msg.message.clone(), msg.style()),
        None => (String::new(), Styles::default()),
    };

    let banner = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(banner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_constructors() {
        assert_eq!(StatusMessage::success("ok").kind, StatusKind::Success);
        assert!(StatusMessage::error("bad").is_error());
        assert!(!StatusMessage::info("hi").is_error());
    }
}
