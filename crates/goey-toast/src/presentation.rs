//! Maps phase and options to visual attributes. Thin by design: everything
//! here is a pure lookup feeding the host renderer.

use goey_core::Color;

use crate::types::{IconOverride, StackTheme, ToastPhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconKind {
    Spinner,
    Check,
    Cross,
    Warning,
    Info,
    None,
}

/// Resolved icon for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Icon {
    Builtin(IconKind),
    Custom(String),
}

/// Icon precedence: the optimistic success override always shows the check;
/// otherwise a caller override wins over the phase icon.
pub fn icon_for(
    phase: ToastPhase,
    icon_override: Option<&IconOverride>,
    success_override_active: bool,
) -> Icon {
    if success_override_active {
        return Icon::Builtin(IconKind::Check);
    }
    if let Some(custom) = icon_override {
        return Icon::Custom(custom.0.clone());
    }
    Icon::Builtin(match phase {
        ToastPhase::Loading => IconKind::Spinner,
        ToastPhase::Default => IconKind::None,
        ToastPhase::Success => IconKind::Check,
        ToastPhase::Error => IconKind::Cross,
        ToastPhase::Warning => IconKind::Warning,
        ToastPhase::Info => IconKind::Info,
    })
}

/// Key the host uses to cross-fade between icons; equal keys skip the
/// transition.
pub fn icon_transition_key(
    phase: ToastPhase,
    icon_override: Option<&IconOverride>,
    success_override_active: bool,
) -> String {
    match icon_for(phase, icon_override, success_override_active) {
        Icon::Builtin(kind) => format!("builtin-{kind:?}"),
        Icon::Custom(name) => format!("custom-{name}"),
    }
}

pub fn title_color(phase: ToastPhase, theme: StackTheme) -> Color {
    match (phase, theme) {
        (ToastPhase::Success, _) => Color::from_hex("#228a4e"),
        (ToastPhase::Error, _) => Color::from_hex("#d32f2f"),
        (ToastPhase::Warning, _) => Color::from_hex("#b36b00"),
        (ToastPhase::Info, _) => Color::from_hex("#1a6fc4"),
        (_, StackTheme::Light) => Color::from_hex("#1c1c1c"),
        (_, StackTheme::Dark) => Color::from_hex("#f5f5f5"),
    }
}

pub fn action_color(phase: ToastPhase, theme: StackTheme) -> Color {
    match phase {
        ToastPhase::Error => Color::from_hex("#d32f2f"),
        _ => title_color(ToastPhase::Default, theme),
    }
}

pub fn fill_color(theme: StackTheme) -> Color {
    match theme {
        StackTheme::Light => Color::WHITE,
        StackTheme::Dark => Color::from_hex("#232323"),
    }
}

pub fn border_color(theme: StackTheme) -> Color {
    match theme {
        StackTheme::Light => Color::BLACK.with_alpha(26),
        StackTheme::Dark => Color::WHITE.with_alpha(31),
    }
}
