//! Per-toast controller: owns the lifecycle phase, every timer and animation
//! handle, and the animated values driving the outline.
//!
//! Transition decisions live in [`crate::transitions`]; this module executes
//! the planned effects against the runtime and pushes visual updates through
//! [`ToastVisual`]. All state is owned here and mutated only through the
//! dispatch entry points, so imperative callbacks (timers, animation frames)
//! and the host's render path read one consistent source.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use goey_core::{
    AnimationHandle, AnimationSpec, Deformation, MotionPreference, Path, Runtime, SubId,
    TimerHandle,
};
use web_time::{Duration, Instant};

use crate::dimensions::{DimensionTracker, Dimensions, MeasureSurface, StyleClamps};
use crate::morph::{self, Anchor, PILL_HEIGHT};
use crate::squish::{SquishAnimator, SquishDirection, SquishParams};
use crate::transitions::{plan, Effect, Event, Lifecycle, Snapshot};
use crate::types::{ToastContent, ToastPhase, ToastPosition};

pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(4000);
pub const DEFAULT_BOUNCE: f32 = 0.4;

/// Inner content fades in this long after the outline starts opening, so the
/// shape visibly leads.
pub(crate) const REVEAL_DELAY: Duration = Duration::from_millis(330);

pub(crate) const EXPAND_DURATION: Duration = Duration::from_millis(600);
pub(crate) const COLLAPSE_DURATION: Duration = Duration::from_millis(900);
const SPRING_EXPAND_DURATION: Duration = Duration::from_millis(900);

/// Grace between a dismissal collapse settling and host removal; a re-hover
/// inside it rescues the toast.
pub(crate) const REMOVAL_GRACE: Duration = Duration::from_millis(800);
const REDUCED_REMOVAL_FLUSH: Duration = Duration::from_millis(10);

/// What a snapped collapse costs under reduced motion: one flush, not the
/// full ease. Feeds the auto-dismiss arithmetic so the total on-screen time
/// still matches the configured duration.
const REDUCED_COLLAPSE_FLUSH: Duration = Duration::from_millis(10);

/// How long an optimistically-succeeded pill lingers before removal.
pub(crate) const SUCCESS_REMOVAL_DELAY: Duration = Duration::from_millis(1200);

const MOUNT_SQUISH_DELAY: Duration = Duration::from_millis(45);
const EXPAND_SQUISH_DELAY: Duration = Duration::from_millis(80);

const PILL_RESIZE_SPRING: Duration = Duration::from_millis(500);
const PILL_RESIZE_EASE: Duration = Duration::from_millis(400);

/// Collapses and pill resizes damp the configured bounce slightly so the
/// shrinking shape settles rather than wobbles.
const COLLAPSE_BOUNCE_SCALE: f32 = 0.875;

/// Visual output seam. The controller pushes; the host renders.
pub trait ToastVisual {
    fn set_outline(&self, path: &Path);
    /// Stable wrapper footprint (widest extent seen) plus current height.
    fn set_frame(&self, width: f32, height: f32);
    /// Horizontal clip insets hiding the part of the frame the outline has
    /// not grown into yet.
    fn set_clip(&self, left: f32, right: f32);
    fn set_body_visible(&self, visible: bool);
    fn set_wrapper_deformation(&self, d: Deformation);
    fn set_header_deformation(&self, d: Deformation);
    fn set_content(&self, content: &ToastContent);
    /// Ask the host stack to drop this toast.
    fn request_removal(&self);
    /// The rendered footprint settled after an animation; siblings reflow.
    fn footprint_settled(&self);
}

#[derive(Clone, Debug)]
pub struct ToastConfig {
    /// Total visible lifetime target. `None` disables auto-dismiss.
    pub display_duration: Option<Duration>,
    pub spring: bool,
    pub bounce: f32,
    pub position: ToastPosition,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            display_duration: Some(DEFAULT_DISPLAY_DURATION),
            spring: true,
            bounce: DEFAULT_BOUNCE,
            position: ToastPosition::default(),
        }
    }
}

#[derive(Default)]
struct Handles {
    morph: Option<AnimationHandle>,
    pill_resize: Option<AnimationHandle>,
    reveal: Option<TimerHandle>,
    dismiss: Option<TimerHandle>,
    removal: Option<TimerHandle>,
    success_removal: Option<TimerHandle>,
    mount_squish: Option<TimerHandle>,
    expand_squish: Option<TimerHandle>,
}

pub struct ToastController {
    runtime: Runtime,
    surface: Rc<dyn MeasureSurface>,
    visual: Rc<dyn ToastVisual>,
    tracker: Rc<DimensionTracker>,
    squish: SquishAnimator,
    motion: MotionPreference,
    motion_sub: Cell<Option<SubId>>,
    config: ToastConfig,

    phase: Cell<Lifecycle>,
    content: RefCell<ToastContent>,
    success_override: Cell<bool>,
    hovered: Cell<bool>,
    pre_dismiss: Cell<bool>,
    body_visible: Cell<bool>,

    progress: Cell<f32>,
    pill_w: Cell<f32>,
    /// Dimensions the current morph is driven against (target on expand, the
    /// captured snapshot on collapse).
    morph_dims: Cell<Dimensions>,
    expanded_dims: Cell<Option<Dimensions>>,
    animated: Cell<Dimensions>,

    remaining: Cell<Option<Duration>>,
    dismiss_armed: Cell<Option<(Instant, Duration)>>,

    torn_down: Cell<bool>,
    handles: RefCell<Handles>,
}

impl ToastController {
    pub fn new(
        runtime: Runtime,
        surface: Rc<dyn MeasureSurface>,
        visual: Rc<dyn ToastVisual>,
        content: ToastContent,
        config: ToastConfig,
        motion: MotionPreference,
    ) -> Rc<Self> {
        let tracker = DimensionTracker::new(runtime.clone(), surface.clone());
        let wrapper_visual = visual.clone();
        let header_visual = visual.clone();
        let squish = SquishAnimator::new(
            runtime.clone(),
            move |d| wrapper_visual.set_wrapper_deformation(d),
            move |d| header_visual.set_header_deformation(d),
        );

        let ctrl = Rc::new(Self {
            runtime,
            surface,
            visual,
            tracker,
            squish,
            motion,
            motion_sub: Cell::new(None),
            config,
            phase: Cell::new(Lifecycle::Collapsed),
            content: RefCell::new(content),
            success_override: Cell::new(false),
            hovered: Cell::new(false),
            pre_dismiss: Cell::new(false),
            body_visible: Cell::new(false),
            progress: Cell::new(0.0),
            pill_w: Cell::new(0.0),
            morph_dims: Cell::new(Dimensions::default()),
            expanded_dims: Cell::new(None),
            animated: Cell::new(Dimensions::default()),
            remaining: Cell::new(None),
            dismiss_armed: Cell::new(None),
            torn_down: Cell::new(false),
            handles: RefCell::new(Handles::default()),
        });

        let weak = Rc::downgrade(&ctrl);
        let sub = ctrl.motion.subscribe(move |reduced| {
            if !reduced {
                return;
            }
            if let Some(c) = weak.upgrade() {
                c.snap_in_flight();
            }
        });
        ctrl.motion_sub.set(Some(sub));
        ctrl
    }

    /// Attach to a freshly-inserted toast: first measurement, initial outline,
    /// mount impulse, and the opening transition when the content warrants it.
    pub fn mount(self: &Rc<Self>) {
        if let Some(dims) = self.tracker.measure() {
            self.pill_w.set(dims.pill_w);
            self.morph_dims.set(dims);
        }
        let content = self.content.borrow().clone();
        self.visual.set_content(&content);
        self.flush();

        if content.is_expandable() {
            self.dispatch(Event::ContentBecameExpandable);
        } else {
            let weak = Rc::downgrade(self);
            let handle = self.runtime.set_timeout(MOUNT_SQUISH_DELAY, move || {
                if let Some(c) = weak.upgrade() {
                    c.handles.borrow_mut().mount_squish = None;
                    c.squish.landing(
                        SquishDirection::Collapse,
                        COLLAPSE_DURATION.as_secs_f32(),
                        COLLAPSE_DURATION.as_secs_f32(),
                        c.squish_params(),
                    );
                }
            });
            self.handles.borrow_mut().mount_squish = Some(handle);
        }
    }

    // -- external inputs -----------------------------------------------------

    /// Replace the caller-owned content. Ignored while an optimistic success
    /// override is active (the override never reverts).
    pub fn set_content(self: &Rc<Self>, content: ToastContent) {
        if self.torn_down.get() || self.success_override.get() {
            return;
        }
        let (was_expandable, old_phase) = {
            let cur = self.content.borrow();
            (cur.is_expandable(), cur.phase)
        };
        *self.content.borrow_mut() = content;
        let cur = self.content.borrow().clone();
        self.visual.set_content(&cur);

        if let Some(dims) = self.tracker.measure() {
            self.apply_measured(dims);
        }
        let weak = Rc::downgrade(self);
        self.tracker.schedule_remeasure(move |dims| {
            if let Some(c) = weak.upgrade() {
                c.apply_measured(dims);
            }
        });

        if cur.phase == ToastPhase::Error && old_phase != ToastPhase::Error {
            self.dispatch(Event::PhaseFlippedToError);
        }
        if cur.is_expandable() && !was_expandable {
            self.dispatch(Event::ContentBecameExpandable);
        } else if !cur.is_expandable() && was_expandable {
            self.dispatch(Event::ContentBecameBare);
        }
    }

    /// Host resize notification; re-measures after the debounce window.
    pub fn resize_observed(self: &Rc<Self>) {
        if self.torn_down.get() {
            return;
        }
        let weak = Rc::downgrade(self);
        self.tracker.schedule_remeasure(move |dims| {
            if let Some(c) = weak.upgrade() {
                c.apply_measured(dims);
            }
        });
    }

    pub fn set_hovered(self: &Rc<Self>, hovered: bool) {
        if self.torn_down.get() || self.hovered.get() == hovered {
            return;
        }
        self.hovered.set(hovered);
        self.dispatch(if hovered {
            Event::HoverStart
        } else {
            Event::HoverEnd
        });
    }

    pub fn dismiss(self: &Rc<Self>) {
        self.dispatch(Event::DismissRequested);
    }

    /// Run the action callback and, when a success label is configured, kick
    /// off the optimistic collapse. A failing callback is contained: the
    /// morph proceeds regardless.
    pub fn action_clicked(self: &Rc<Self>) {
        if self.torn_down.get() {
            return;
        }
        let action = self.content.borrow().action.clone();
        let Some(action) = action else { return };
        if let Err(err) = (action.on_click)() {
            if cfg!(debug_assertions) {
                log::debug!("toast action callback failed: {err}");
            }
        }
        if action.success_label.is_some() {
            self.dispatch(Event::ActionSucceeded);
        }
    }

    /// Cancel every pending timer, animation, and subscription. Nothing
    /// scheduled before this call may touch the instance afterward.
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        self.cancel_all_handles();
        self.dismiss_armed.set(None);
        self.remaining.set(None);
        self.tracker.cancel();
        self.squish.cancel_all();
        if let Some(sub) = self.motion_sub.take() {
            self.motion.unsubscribe(sub);
        }
    }

    // -- introspection (render path and tests) -------------------------------

    pub fn phase(&self) -> Lifecycle {
        self.phase.get()
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn animated_dimensions(&self) -> Dimensions {
        self.animated.get()
    }

    pub fn body_visible(&self) -> bool {
        self.body_visible.get()
    }

    pub fn dismiss_timer_armed(&self) -> bool {
        self.handles
            .borrow()
            .dismiss
            .as_ref()
            .map(|h| h.is_armed())
            .unwrap_or(false)
    }

    pub fn remaining_display(&self) -> Option<Duration> {
        self.remaining.get()
    }

    pub fn content(&self) -> ToastContent {
        self.content.borrow().clone()
    }

    // -- dispatch ------------------------------------------------------------

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.get(),
            expandable: !self.success_override.get() && self.content.borrow().is_expandable(),
            hovered: self.hovered.get(),
            body_shown: self.body_visible.get(),
            pre_dismiss: self.pre_dismiss.get(),
            success_override: self.success_override.get(),
            removal_pending: self
                .handles
                .borrow()
                .removal
                .as_ref()
                .map(|h| h.is_armed())
                .unwrap_or(false),
        }
    }

    fn dispatch(self: &Rc<Self>, event: Event) {
        if self.torn_down.get() {
            return;
        }
        let planned = plan(event, &self.snapshot());
        self.phase.set(planned.next);
        for effect in planned.effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::StartExpand { .. } => self.start_expand(),
            Effect::GateReveal => self.gate_reveal(),
            Effect::ShowBody => self.show_body(),
            Effect::HideBody => self.hide_body(),
            Effect::SnapshotExpandedDims => {
                self.expanded_dims.set(Some(self.morph_dims.get()));
            }
            Effect::StartCollapse { pre_dismiss } => self.start_collapse(pre_dismiss),
            Effect::ArmDismissTimer => self.arm_dismiss_timer(),
            Effect::CaptureRemaining => self.capture_remaining(),
            Effect::ClearRemaining => {
                self.remaining.set(None);
                self.dismiss_armed.set(None);
                if let Some(t) = self.handles.borrow_mut().dismiss.take() {
                    t.cancel();
                }
            }
            Effect::ScheduleHostRemoval => self.schedule_removal(),
            Effect::CancelHostRemoval => {
                if let Some(t) = self.handles.borrow_mut().removal.take() {
                    t.cancel();
                }
            }
            Effect::ScheduleSuccessRemoval => self.schedule_success_removal(),
            Effect::ApplySuccessOverride => self.apply_success_override(),
            Effect::NoteCollapseEnd => self.squish.note_collapse_end(),
            Effect::LandingImpulse => self.squish.landing(
                SquishDirection::Collapse,
                COLLAPSE_DURATION.as_secs_f32(),
                COLLAPSE_DURATION.as_secs_f32(),
                self.squish_params(),
            ),
            Effect::Shake => self.squish.shake(self.squish_params()),
            Effect::NotifyHost => self.visual.footprint_settled(),
        }
    }

    // -- effect implementations ----------------------------------------------

    fn start_expand(self: &Rc<Self>) {
        self.pre_dismiss.set(false);
        self.morph_dims.set(self.tracker.target());
        if self.reduced() {
            self.stop_morph();
            self.progress.set(1.0);
            self.flush();
            self.dispatch(Event::ExpandFinished);
            return;
        }
        let spec = if self.config.spring {
            AnimationSpec::spring_with_bounce(SPRING_EXPAND_DURATION, self.config.bounce)
        } else {
            AnimationSpec::smooth(EXPAND_DURATION)
        };
        self.animate_progress(1.0, spec, Event::ExpandFinished);
    }

    fn start_collapse(self: &Rc<Self>, pre_dismiss: bool) {
        self.pre_dismiss.set(pre_dismiss);
        if let Some(dims) = self.expanded_dims.get() {
            self.morph_dims.set(dims);
        }
        if self.reduced() {
            self.stop_morph();
            self.progress.set(0.0);
            self.flush();
            self.dispatch(Event::CollapseFinished);
            return;
        }
        // A timed dismissal always eases over a fixed duration so the total
        // lifetime stays predictable; springs are for interactive collapses.
        let spec = if pre_dismiss || !self.config.spring {
            AnimationSpec::smooth(COLLAPSE_DURATION)
        } else {
            AnimationSpec::spring_with_bounce(
                COLLAPSE_DURATION,
                self.config.bounce * COLLAPSE_BOUNCE_SCALE,
            )
        };
        self.animate_progress(0.0, spec, Event::CollapseFinished);
    }

    fn animate_progress(self: &Rc<Self>, to: f32, spec: AnimationSpec, done: Event) {
        self.stop_morph();
        let weak_update = Rc::downgrade(self);
        let weak_done = Rc::downgrade(self);
        let handle = self.runtime.animate(
            self.progress.get(),
            to,
            spec,
            move |v| {
                if let Some(c) = weak_update.upgrade() {
                    c.progress.set(v.clamp(0.0, 1.0));
                    c.flush();
                }
            },
            move || {
                if let Some(c) = weak_done.upgrade() {
                    c.handles.borrow_mut().morph = None;
                    c.dispatch(done);
                }
            },
        );
        self.handles.borrow_mut().morph = Some(handle);
    }

    fn gate_reveal(self: &Rc<Self>) {
        let delay = self.reveal_delay();
        if delay.is_zero() {
            self.dispatch(Event::RevealDelayElapsed);
            return;
        }
        if let Some(t) = self.handles.borrow_mut().reveal.take() {
            t.cancel();
        }
        let weak = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(delay, move || {
            if let Some(c) = weak.upgrade() {
                c.handles.borrow_mut().reveal = None;
                c.dispatch(Event::RevealDelayElapsed);
            }
        });
        self.handles.borrow_mut().reveal = Some(handle);
    }

    fn show_body(self: &Rc<Self>) {
        self.body_visible.set(true);
        self.visual.set_body_visible(true);
        self.squish.press_header(self.squish_params());

        if self.hovered.get() || self.reduced() {
            return;
        }
        if let Some(t) = self.handles.borrow_mut().expand_squish.take() {
            t.cancel();
        }
        let weak = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(EXPAND_SQUISH_DELAY, move || {
            if let Some(c) = weak.upgrade() {
                c.handles.borrow_mut().expand_squish = None;
                c.squish.landing(
                    SquishDirection::Expand,
                    EXPAND_DURATION.as_secs_f32(),
                    EXPAND_DURATION.as_secs_f32(),
                    c.squish_params(),
                );
            }
        });
        self.handles.borrow_mut().expand_squish = Some(handle);
    }

    fn hide_body(&self) {
        self.body_visible.set(false);
        self.visual.set_body_visible(false);
        if let Some(t) = self.handles.borrow_mut().expand_squish.take() {
            t.cancel();
        }
        self.squish
            .release_header(self.pre_dismiss.get(), COLLAPSE_DURATION, self.squish_params());
    }

    /// Delay = configured lifetime minus the reveal gate and the anticipated
    /// collapse, so the total on-screen time matches the configuration. A
    /// captured remainder from a hover pause takes precedence. Non-positive
    /// delay means the toast persists until explicitly dismissed.
    fn arm_dismiss_timer(self: &Rc<Self>) {
        if let Some(t) = self.handles.borrow_mut().dismiss.take() {
            t.cancel();
        }
        let delay = match self.remaining.get() {
            Some(r) => r,
            None => {
                let Some(display) = self.config.display_duration else {
                    return;
                };
                match display.checked_sub(self.reveal_delay() + self.collapse_allowance()) {
                    Some(d) if !d.is_zero() => d,
                    _ => return,
                }
            }
        };
        self.dismiss_armed.set(Some((self.runtime.now(), delay)));
        let weak = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(delay, move || {
            if let Some(c) = weak.upgrade() {
                c.handles.borrow_mut().dismiss = None;
                c.dismiss_armed.set(None);
                c.dispatch(Event::DismissTimerFired);
            }
        });
        self.handles.borrow_mut().dismiss = Some(handle);
    }

    fn capture_remaining(&self) {
        let Some((armed_at, delay)) = self.dismiss_armed.take() else {
            return;
        };
        if let Some(t) = self.handles.borrow_mut().dismiss.take() {
            t.cancel();
        }
        let elapsed = self.runtime.now().saturating_duration_since(armed_at);
        self.remaining.set(Some(delay.saturating_sub(elapsed)));
    }

    fn schedule_removal(self: &Rc<Self>) {
        if let Some(t) = self.handles.borrow_mut().removal.take() {
            t.cancel();
        }
        let grace = if self.reduced() {
            REDUCED_REMOVAL_FLUSH
        } else {
            REMOVAL_GRACE
        };
        let weak = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(grace, move || {
            if let Some(c) = weak.upgrade() {
                c.handles.borrow_mut().removal = None;
                c.visual.request_removal();
            }
        });
        self.handles.borrow_mut().removal = Some(handle);
    }

    // Deliberately not hover-cancelable: once the success pill has landed the
    // toast is on its way out.
    fn schedule_success_removal(self: &Rc<Self>) {
        if let Some(t) = self.handles.borrow_mut().success_removal.take() {
            t.cancel();
        }
        let weak = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(SUCCESS_REMOVAL_DELAY, move || {
            if let Some(c) = weak.upgrade() {
                c.handles.borrow_mut().success_removal = None;
                c.visual.request_removal();
            }
        });
        self.handles.borrow_mut().success_removal = Some(handle);
    }

    fn apply_success_override(&self) {
        self.success_override.set(true);
        {
            let mut content = self.content.borrow_mut();
            if let Some(action) = content.action.take() {
                if let Some(label) = action.success_label {
                    content.title = label;
                }
            }
            content.description = None;
            content.phase = ToastPhase::Success;
        }
        let cur = self.content.borrow().clone();
        self.visual.set_content(&cur);
    }

    // -- measurement ---------------------------------------------------------

    fn apply_measured(self: &Rc<Self>, dims: Dimensions) {
        if self.torn_down.get() {
            return;
        }
        if self.phase.get() != Lifecycle::Collapsing {
            self.morph_dims.set(dims);
        }
        let current = self.pill_w.get();
        if (dims.pill_w - current).abs() < 0.5 {
            self.pill_w.set(dims.pill_w);
            self.flush();
            return;
        }
        if self.reduced() {
            self.pill_w.set(dims.pill_w);
            self.flush();
            return;
        }
        let spec = if self.config.spring {
            AnimationSpec::spring_with_bounce(
                PILL_RESIZE_SPRING,
                self.config.bounce * COLLAPSE_BOUNCE_SCALE,
            )
        } else {
            AnimationSpec::smooth(PILL_RESIZE_EASE)
        };
        if let Some(prev) = self.handles.borrow_mut().pill_resize.take() {
            prev.stop();
        }
        let weak = Rc::downgrade(self);
        let handle = self.runtime.animate(
            current,
            dims.pill_w,
            spec,
            move |v| {
                if let Some(c) = weak.upgrade() {
                    c.pill_w.set(v.max(0.0));
                    c.flush();
                }
            },
            || {},
        );
        self.handles.borrow_mut().pill_resize = Some(handle);

        // A resizing pill gets the same landing impulse as a settling
        // collapse. Only while collapsed: mid-morph the wrapper already has a
        // pulse in flight, and the animator's post-collapse window keeps a
        // fresh dismissal from doubling up.
        if self.phase.get() == Lifecycle::Collapsed {
            self.squish.landing(
                SquishDirection::Collapse,
                spec.duration.as_secs_f32(),
                COLLAPSE_DURATION.as_secs_f32(),
                self.squish_params(),
            );
        }
    }

    // -- per-frame output ----------------------------------------------------

    /// Recompute the animated dimensions and outline for the current progress
    /// and push the whole visual frame.
    fn flush(&self) {
        let t = self.progress.get();
        let dims = self.morph_dims.get();
        let target = self.tracker.target();

        let pw = self.pill_w.get();
        let bw = dims.body_w.max(pw);
        let bh = dims.body_h.max(PILL_HEIGHT);

        let animated = Dimensions {
            pill_w: pw,
            body_w: pw + (bw - pw) * t,
            body_h: PILL_HEIGHT + (bh - PILL_HEIGHT) * t,
        };
        self.animated.set(animated);

        // The wrapper keeps the widest footprint in play so host layout does
        // not jitter mid-morph; clip insets hide the un-grown part.
        let frame_w = bw
            .max(target.body_w)
            .max(self.expanded_dims.get().map(|d| d.body_w).unwrap_or(0.0))
            .max(pw);
        let inset = (frame_w - animated.body_w).max(0.0);
        let (left, right) = if self.config.position.is_center() {
            (inset / 2.0, inset / 2.0)
        } else if self.config.position.is_right() {
            (inset, 0.0)
        } else {
            (0.0, inset)
        };

        let anchor = if self.config.position.is_center() {
            Anchor::Center
        } else {
            Anchor::Edge
        };
        let path = morph::outline(pw, bw, bh, t, anchor);

        self.surface.set_clamps(StyleClamps {
            width: Some(frame_w),
            max_height: Some(animated.body_h),
            clip: inset > 0.0,
        });
        self.visual.set_frame(frame_w, animated.body_h);
        self.visual.set_clip(left, right);
        self.visual.set_outline(&path);
    }

    // -- helpers -------------------------------------------------------------

    fn reduced(&self) -> bool {
        self.motion.reduced()
    }

    fn reveal_delay(&self) -> Duration {
        if self.reduced() {
            Duration::ZERO
        } else {
            REVEAL_DELAY
        }
    }

    fn collapse_allowance(&self) -> Duration {
        if self.reduced() {
            REDUCED_COLLAPSE_FLUSH
        } else {
            COLLAPSE_DURATION
        }
    }

    fn squish_params(&self) -> SquishParams {
        SquishParams {
            spring: self.config.spring,
            bounce: self.config.bounce,
            reduced_motion: self.reduced(),
        }
    }

    fn stop_morph(&self) {
        if let Some(h) = self.handles.borrow_mut().morph.take() {
            h.stop();
        }
    }

    /// Reduced motion flipped on mid-flight: finish any running morph or pill
    /// resize as one synchronous snap.
    fn snap_in_flight(self: &Rc<Self>) {
        let resize = self.handles.borrow_mut().pill_resize.take();
        if let Some(h) = resize {
            h.stop();
            self.pill_w.set(self.tracker.target().pill_w);
            self.flush();
        }
        let running = self
            .handles
            .borrow()
            .morph
            .as_ref()
            .map(|h| h.is_running())
            .unwrap_or(false);
        if !running {
            return;
        }
        self.stop_morph();
        match self.phase.get() {
            Lifecycle::Expanding | Lifecycle::ReExpanding => {
                self.progress.set(1.0);
                self.flush();
                self.dispatch(Event::ExpandFinished);
            }
            Lifecycle::Collapsing => {
                self.progress.set(0.0);
                self.flush();
                self.dispatch(Event::CollapseFinished);
            }
            _ => {}
        }
    }

    fn cancel_all_handles(&self) {
        let mut h = self.handles.borrow_mut();
        if let Some(a) = h.morph.take() {
            a.stop();
        }
        if let Some(a) = h.pill_resize.take() {
            a.stop();
        }
        for timer in [
            h.reveal.take(),
            h.dismiss.take(),
            h.removal.take(),
            h.success_removal.take(),
            h.mount_squish.take(),
            h.expand_squish.take(),
        ] {
            if let Some(t) = timer {
                t.cancel();
            }
        }
    }
}

impl Drop for ToastController {
    fn drop(&mut self) {
        self.teardown();
    }
}
