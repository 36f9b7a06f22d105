//! Caller-facing front end: creates toasts through the host stack, applies
//! the duration policy, and exposes the pending-operation convenience.

use std::cell::Cell;
use std::rc::Rc;

use goey_core::Color;
use parking_lot::RwLock;
use web_time::Duration;

use crate::error::ToastError;
use crate::lifecycle::{COLLAPSE_DURATION, DEFAULT_BOUNCE, DEFAULT_DISPLAY_DURATION, ToastConfig};
use crate::types::{
    ClassNames, IconOverride, ToastContent, ToastId, ToastKind, ToastOptions, ToastPhase,
    ToastPosition, StackOptions,
};

/// Values every mounted toast reads from its stack: where the stack anchors
/// and the motion defaults. One stack per process owns these.
#[derive(Clone, Copy, Debug)]
pub struct StackContext {
    pub position: ToastPosition,
    pub spring: bool,
    pub bounce: f32,
}

impl StackContext {
    const DEFAULT: Self = Self {
        position: ToastPosition::BottomRight,
        spring: true,
        bounce: DEFAULT_BOUNCE,
    };
}

static CONTEXT: RwLock<StackContext> = RwLock::new(StackContext::DEFAULT);

pub fn stack_context() -> StackContext {
    *CONTEXT.read()
}

fn set_stack_context(ctx: StackContext) {
    *CONTEXT.write() = ctx;
}

/// Options the host stack needs per toast; the engine-owned pieces stay in
/// [`ToastConfig`].
#[derive(Clone, Debug, Default)]
pub struct HostOptions {
    /// Host-side auto-removal. `None` hands removal to the engine's own
    /// collapse/grace sequence.
    pub duration: Option<Duration>,
    pub class_names: ClassNames,
    pub icon: Option<IconOverride>,
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
}

/// The external stack seam. Insertion, stacking order, and actual removal
/// belong to the implementor.
pub trait ToastHost {
    /// Create, or update in place when `id` names an existing toast.
    fn create(&self, id: Option<ToastId>, content: ToastContent, options: HostOptions) -> ToastId;
    fn update(&self, id: &ToastId, content: ToastContent, options: HostOptions);
    fn dismiss(&self, id: &ToastId);
    /// Whether the goey stylesheet marker resolved in this document.
    fn styles_present(&self) -> bool;
}

#[derive(Clone)]
pub struct Toaster {
    host: Rc<dyn ToastHost>,
    options: StackOptions,
}

impl Toaster {
    /// Bind to a host stack. Publishes the stack context and, in diagnostic
    /// builds, probes for the stylesheet once; a missing import warns and
    /// nothing more.
    pub fn new(host: Rc<dyn ToastHost>, options: StackOptions) -> Self {
        set_stack_context(StackContext {
            position: options.position,
            spring: options.spring,
            bounce: options.bounce.unwrap_or(DEFAULT_BOUNCE),
        });
        if cfg!(debug_assertions) && !host.styles_present() {
            log::warn!("{}", ToastError::MissingStyles);
        }
        Self { host, options }
    }

    pub fn show(&self, title: impl Into<String>, opts: ToastOptions) -> ToastId {
        self.emit(ToastKind::Default, title.into(), opts)
    }

    pub fn success(&self, title: impl Into<String>, opts: ToastOptions) -> ToastId {
        self.emit(ToastKind::Success, title.into(), opts)
    }

    pub fn error(&self, title: impl Into<String>, opts: ToastOptions) -> ToastId {
        self.emit(ToastKind::Error, title.into(), opts)
    }

    pub fn warning(&self, title: impl Into<String>, opts: ToastOptions) -> ToastId {
        self.emit(ToastKind::Warning, title.into(), opts)
    }

    pub fn info(&self, title: impl Into<String>, opts: ToastOptions) -> ToastId {
        self.emit(ToastKind::Info, title.into(), opts)
    }

    pub fn dismiss(&self, id: &ToastId) {
        self.host.dismiss(id);
    }

    /// Replace a live toast's content in place.
    pub fn update(&self, id: &ToastId, title: impl Into<String>, opts: ToastOptions) {
        let content = self.build_content(ToastKind::Default, title.into(), &opts);
        let host_opts = self.host_options(&content, &opts);
        self.host.update(id, content, host_opts);
    }

    /// Show a loading toast for an operation in flight; settle it later via
    /// the returned handle.
    pub fn pending(&self, loading_title: impl Into<String>, opts: ToastOptions) -> PendingToast {
        let mut content = self.build_content(ToastKind::Default, loading_title.into(), &opts);
        content.phase = ToastPhase::Loading;
        // A loading toast never auto-removes; settling decides its fate.
        let mut host_opts = self.host_options(&content, &opts);
        host_opts.duration = None;
        let id = self.host.create(opts.id.clone(), content, host_opts);
        PendingToast {
            toaster: self.clone(),
            id,
            opts,
            settled: Cell::new(false),
        }
    }

    /// Engine configuration for one toast, stack defaults applied.
    pub fn toast_config(&self, opts: &ToastOptions) -> ToastConfig {
        ToastConfig {
            display_duration: Some(self.display_duration(opts)),
            spring: opts.spring.unwrap_or(self.options.spring),
            bounce: opts
                .bounce
                .or(self.options.bounce)
                .unwrap_or(DEFAULT_BOUNCE),
            position: self.options.position,
        }
    }

    fn emit(&self, kind: ToastKind, title: String, opts: ToastOptions) -> ToastId {
        let content = self.build_content(kind, title, &opts);
        let host_opts = self.host_options(&content, &opts);
        self.host.create(opts.id.clone(), content, host_opts)
    }

    fn build_content(&self, kind: ToastKind, title: String, opts: &ToastOptions) -> ToastContent {
        let mut content = ToastContent::new(title).kind(kind);
        content.description = opts.description.clone();
        content.action = opts.action.clone();
        content
    }

    /// Expandable content puts the engine in charge of dismissal (the host
    /// would otherwise yank the toast mid-collapse); bare pills use the
    /// host's own removal timer.
    fn host_options(&self, content: &ToastContent, opts: &ToastOptions) -> HostOptions {
        let duration = if content.is_expandable() {
            None
        } else {
            Some(self.display_duration(opts))
        };
        HostOptions {
            duration,
            class_names: opts.class_names.clone().unwrap_or_default(),
            icon: opts.icon.clone(),
            fill_color: opts.fill_color,
            border_color: opts.border_color,
            border_width: opts.border_width,
        }
    }

    fn display_duration(&self, opts: &ToastOptions) -> Duration {
        opts.duration
            .or(opts.timings.and_then(|t| t.display_duration))
            .or(self.options.duration)
            .unwrap_or(DEFAULT_DISPLAY_DURATION)
    }
}

/// Settled replacement content for a pending toast.
#[derive(Clone, Debug, Default)]
pub struct Settled {
    pub title: String,
    pub description: Option<String>,
    pub action: Option<crate::types::ToastAction>,
}

impl Settled {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = Some(d.into());
        self
    }
}

/// Handle for a loading toast awaiting its operation. Settling consumes the
/// handle, so a toast settles at most once.
pub struct PendingToast {
    toaster: Toaster,
    id: ToastId,
    opts: ToastOptions,
    settled: Cell<bool>,
}

impl PendingToast {
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    pub fn resolve(self, settled: Settled) {
        self.settle(ToastKind::Success, settled);
    }

    pub fn reject(self, settled: Settled) {
        self.settle(ToastKind::Error, settled);
    }

    fn settle(self, kind: ToastKind, settled: Settled) {
        if self.settled.replace(true) {
            return;
        }
        let mut content = ToastContent::new(settled.title).kind(kind);
        content.description = settled.description;
        content.action = settled.action;

        // Expandable settled content re-expands the toast; stretch the
        // lifetime by one trailing collapse so the body gets its full stay.
        let mut host_opts = self.toaster.host_options(&content, &self.opts);
        if content.is_expandable() {
            host_opts.duration = None;
        } else {
            let base = self.toaster.display_duration(&self.opts);
            host_opts.duration = Some(base + COLLAPSE_DURATION);
        }
        self.toaster.host.update(&self.id, content, host_opts);
    }
}

/// Isolation boundary around one toast's render callback: a failure unmounts
/// that toast's content only, and nothing escapes to the host.
pub fn render_isolated<R>(
    id: &ToastId,
    render: impl FnOnce() -> Result<R, ToastError>,
) -> Option<R> {
    match render() {
        Ok(r) => Some(r),
        Err(err) => {
            if cfg!(debug_assertions) {
                log::debug!("toast {id} failed to render: {err}");
            }
            None
        }
    }
}
