use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use goey_core::Color;
use web_time::Duration;

/// Semantic kind of a toast, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

/// Visual phase of a toast. Owned by the embedding caller, except that an
/// optimistic action success overrides it with `Success` while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastPhase {
    Loading,
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

impl From<ToastKind> for ToastPhase {
    fn from(kind: ToastKind) -> Self {
        match kind {
            ToastKind::Default => ToastPhase::Default,
            ToastKind::Success => ToastPhase::Success,
            ToastKind::Error => ToastPhase::Error,
            ToastKind::Warning => ToastPhase::Warning,
            ToastKind::Info => ToastPhase::Info,
        }
    }
}

/// Where the host stack anchors its toasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl ToastPosition {
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    pub fn is_center(self) -> bool {
        matches!(self, Self::TopCenter | Self::BottomCenter)
    }
}

/// Result of an action callback. Errors are contained by the engine: they
/// are logged in debug builds and never interrupt the morph-back sequence.
pub type ActionResult = Result<(), Box<dyn std::error::Error>>;

/// Action button rendered in the expanded body.
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub on_click: Rc<dyn Fn() -> ActionResult>,
    /// When set, clicking relabels the pill with this text and collapses the
    /// toast optimistically.
    pub success_label: Option<String>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() -> ActionResult + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Rc::new(on_click),
            success_label: None,
        }
    }

    pub fn with_success_label(mut self, label: impl Into<String>) -> Self {
        self.success_label = Some(label.into());
        self
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("success_label", &self.success_label)
            .finish_non_exhaustive()
    }
}

/// What a toast shows. Immutable per update from the caller's side; the
/// engine only overrides it internally while an optimistic success is
/// active.
#[derive(Clone, Debug, Default)]
pub struct ToastContent {
    pub title: String,
    pub description: Option<String>,
    pub action: Option<ToastAction>,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

impl ToastContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self.phase = kind.into();
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = Some(d.into());
        self
    }

    pub fn action(mut self, a: ToastAction) -> Self {
        self.action = Some(a);
        self
    }

    pub fn phase(mut self, phase: ToastPhase) -> Self {
        self.phase = phase;
        self
    }

    /// A toast can expand only when there is body content to reveal.
    pub fn is_expandable(&self) -> bool {
        self.description.is_some() || self.action.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Timings {
    /// Total visible lifetime target, reveal and collapse included.
    pub display_duration: Option<Duration>,
}

/// Style-hook overrides, forwarded verbatim to the host renderer.
#[derive(Clone, Debug, Default)]
pub struct ClassNames {
    pub wrapper: Option<String>,
    pub content: Option<String>,
    pub header: Option<String>,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub action_wrapper: Option<String>,
    pub action_button: Option<String>,
}

/// Per-toast options accepted by the [`crate::Toaster`] front end.
#[derive(Clone, Debug, Default)]
pub struct ToastOptions {
    pub description: Option<String>,
    pub action: Option<ToastAction>,
    pub icon: Option<IconOverride>,
    pub duration: Option<Duration>,
    pub id: Option<ToastId>,
    pub class_names: Option<ClassNames>,
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub timings: Option<Timings>,
    pub spring: Option<bool>,
    pub bounce: Option<f32>,
}

/// Caller-provided icon, replacing the phase icon while no optimistic
/// success is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconOverride(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StackTheme {
    #[default]
    Light,
    Dark,
}

/// Per-host options for a toast stack.
#[derive(Clone, Debug)]
pub struct StackOptions {
    pub position: ToastPosition,
    pub duration: Option<Duration>,
    pub gap: f32,
    pub offset: f32,
    pub theme: StackTheme,
    pub visible_toasts: Option<usize>,
    pub spring: bool,
    pub bounce: Option<f32>,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            position: ToastPosition::BottomRight,
            duration: None,
            gap: 14.0,
            offset: 24.0,
            theme: StackTheme::Light,
            visible_toasts: None,
            spring: true,
            bounce: None,
        }
    }
}

/// Identifier handed out by the host stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToastId(pub String);

impl ToastId {
    /// Fresh process-unique id for toasts the caller did not name.
    pub fn generate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(format!("goey-{}", NEXT.fetch_add(1, Ordering::Relaxed)))
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ToastId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
