//! Icon service for managing different icon themes
//!
//! This module provides the glyphs shown next to modals and toasts,
//! supporting emoji, Unicode, and ASCII fallbacks.

use crate::notifications::{ModalKind, ToastKind};
use serde::{Deserialize, Serialize};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    Emoji,
    /// Unicode symbols (clean, native look)
    Unicode,
    /// ASCII characters (maximum compatibility)
    #[default]
    Ascii,
}

/// Modal kind icons
#[derive(Debug, Clone)]
pub struct ModalIcons {
    pub confirm: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

/// Toast kind icons
#[derive(Debug, Clone)]
pub struct ToastIcons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
}

/// Control icons
#[derive(Debug, Clone)]
pub struct ControlIcons {
    pub busy: &'static str,
    pub dismiss: &'static str,
}

/// Complete icon set for a specific theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub modal: ModalIcons,
    pub toast: ToastIcons,
    pub controls: ControlIcons,
}

/// Icon service for managing themes and providing icons
#[derive(Debug, Clone, Default)]
pub struct IconService {
    current_theme: IconTheme,
}

impl IconService {
    /// Create a new icon service with the specified theme
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    /// Get the current theme
    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme: IconTheme) {
        self.current_theme = theme;
    }

    /// Cycle to the next icon theme in the sequence: Ascii -> Unicode -> Emoji -> Ascii
    pub fn cycle_icon_theme(&mut self) {
        self.current_theme = match self.current_theme {
            IconTheme::Ascii => IconTheme::Unicode,
            IconTheme::Unicode => IconTheme::Emoji,
            IconTheme::Emoji => IconTheme::Ascii,
        };
    }

    /// Get the complete icon set for the current theme
    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => Self::emoji_icons(),
            IconTheme::Unicode => Self::unicode_icons(),
            IconTheme::Ascii => Self::ascii_icons(),
        }
    }

    fn emoji_icons() -> IconSet {
        IconSet {
            modal: ModalIcons {
                confirm: "❓",
                warning: "⚠️",
                error: "❌",
                info: "💡",
            },
            toast: ToastIcons {
                success: "✅",
                error: "❌",
                warning: "⚠️",
                info: "💡",
            },
            controls: ControlIcons {
                busy: "⏳",
                dismiss: "✖️",
            },
        }
    }

    fn unicode_icons() -> IconSet {
        IconSet {
            modal: ModalIcons {
                confirm: "?",
                warning: "⚠",
                error: "✗",
                info: "ⓘ",
            },
            toast: ToastIcons {
                success: "✓",
                error: "✗",
                warning: "⚠",
                info: "ⓘ",
            },
            controls: ControlIcons {
                busy: "⟳",
                dismiss: "×",
            },
        }
    }

    fn ascii_icons() -> IconSet {
        IconSet {
            modal: ModalIcons {
                confirm: "?",
                warning: "!",
                error: "X",
                info: "i",
            },
            toast: ToastIcons {
                success: "+",
                error: "X",
                warning: "!",
                info: "i",
            },
            controls: ControlIcons {
                busy: "...",
                dismiss: "x",
            },
        }
    }

    #[must_use]
    pub fn modal_icon(&self, kind: ModalKind) -> &'static str {
        let icons = self.icons().modal;
        match kind {
            ModalKind::Confirm => icons.confirm,
            ModalKind::Warning => icons.warning,
            ModalKind::Error => icons.error,
            ModalKind::Info => icons.info,
        }
    }

    #[must_use]
    pub fn toast_icon(&self, kind: ToastKind) -> &'static str {
        let icons = self.icons().toast;
        match kind {
            ToastKind::Success => icons.success,
            ToastKind::Error => icons.error,
            ToastKind::Warning => icons.warning,
            ToastKind::Info => icons.info,
        }
    }

    #[must_use]
    pub fn busy(&self) -> &'static str {
        self.icons().controls.busy
    }

    #[must_use]
    pub fn dismiss(&self) -> &'static str {
        self.icons().controls.dismiss
    }
}
