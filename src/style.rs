//! Colours and button styles for modal and toast kinds.

use ratatui::style::{Color, Modifier, Style};

use crate::notifications::{ConfirmStyle, ModalKind, ModalSnapshot, ToastKind};

pub const BLUE: Color = Color::Rgb(37, 99, 235);
pub const YELLOW: Color = Color::Rgb(202, 138, 4);
pub const RED: Color = Color::Rgb(220, 38, 38);
pub const EMERALD: Color = Color::Rgb(16, 185, 129);
pub const SLATE: Color = Color::Rgb(71, 85, 105);

/// Accent colour used for a modal's icon and border
#[must_use]
pub fn modal_accent(kind: ModalKind) -> Color {
    match kind {
        ModalKind::Confirm | ModalKind::Info => BLUE,
        ModalKind::Warning => YELLOW,
        ModalKind::Error => RED,
    }
}

#[must_use]
pub fn toast_accent(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => EMERALD,
        ToastKind::Error => RED,
        ToastKind::Warning => YELLOW,
        ToastKind::Info => BLUE,
    }
}

/// Destructive dialogs always get a red confirm button regardless of kind.
#[must_use]
pub fn confirm_button_color(kind: ModalKind, style: ConfirmStyle) -> Color {
    match style {
        ConfirmStyle::Destructive => RED,
        ConfirmStyle::Default => modal_accent(kind),
    }
}

#[must_use]
pub fn confirm_button_style(modal: &ModalSnapshot) -> Style {
    let style = Style::default()
        .fg(Color::White)
        .bg(confirm_button_color(modal.kind, modal.confirm_style))
        .add_modifier(Modifier::BOLD);

    if modal.controls_enabled() {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

#[must_use]
pub fn cancel_button_style(modal: &ModalSnapshot) -> Style {
    let style = Style::default().fg(SLATE);

    if modal.controls_enabled() {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}
