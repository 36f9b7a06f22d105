//! Decorative deformation pulses layered on top of the primary morph.
//!
//! Three independent channels: landing pulses on the wrapper (spring-driven
//! compress/expand), a header press while the body is open, and an error
//! shake. Each runs as its own lightweight numeric animation; output is a
//! composed [`Deformation`] per channel, pushed through host callbacks.

use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::Rc;

use goey_core::{AnimationHandle, AnimationSpec, Deformation, Easing, Runtime};
use web_time::{Duration, Instant};

/// Minimum spacing between landing pulses.
const PULSE_THROTTLE: Duration = Duration::from_millis(300);

/// Window after a collapse ends during which further landing pulses are
/// redundant (the collapse itself just produced one).
const POST_COLLAPSE_SUPPRESS: Duration = Duration::from_millis(500);

/// Vertical compression and horizontal counter-stretch at full intensity,
/// calibrated for a bounce of 0.4 and scaled linearly from there.
const EXPAND_COMPRESS_Y: f32 = 0.12;
const COLLAPSE_COMPRESS_Y: f32 = 0.07;
const EXPAND_STRETCH_X: f32 = 0.06;
const COLLAPSE_STRETCH_X: f32 = 0.035;
const REFERENCE_BOUNCE: f32 = 0.4;

/// Header press at full value: 5% shrink plus a one-pixel push-down.
const HEADER_SCALE: f32 = 0.05;

const SHAKE_DURATION: Duration = Duration::from_millis(400);
const SHAKE_CYCLES: f32 = 6.0;
const SHAKE_AMPLITUDE: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquishDirection {
    Expand,
    Collapse,
}

/// Motion settings the controller resolves per pulse.
#[derive(Clone, Copy, Debug)]
pub struct SquishParams {
    pub spring: bool,
    pub bounce: f32,
    pub reduced_motion: bool,
}

impl SquishParams {
    fn enabled(&self) -> bool {
        self.spring && !self.reduced_motion
    }
}

pub struct SquishAnimator {
    runtime: Runtime,
    on_wrapper: Rc<dyn Fn(Deformation)>,
    on_header: Rc<dyn Fn(Deformation)>,

    landing: RefCell<Option<AnimationHandle>>,
    header: RefCell<Option<AnimationHandle>>,
    shake: RefCell<Option<AnimationHandle>>,

    // Channels compose into the wrapper deformation.
    landing_scale: Rc<Cell<(f32, f32)>>,
    shake_x: Rc<Cell<f32>>,
    header_value: Rc<Cell<f32>>,

    last_pulse: Cell<Option<Instant>>,
    collapse_ended: Cell<Option<Instant>>,
}

impl SquishAnimator {
    pub fn new(
        runtime: Runtime,
        on_wrapper: impl Fn(Deformation) + 'static,
        on_header: impl Fn(Deformation) + 'static,
    ) -> Self {
        Self {
            runtime,
            on_wrapper: Rc::new(on_wrapper),
            on_header: Rc::new(on_header),
            landing: RefCell::new(None),
            header: RefCell::new(None),
            shake: RefCell::new(None),
            landing_scale: Rc::new(Cell::new((1.0, 1.0))),
            shake_x: Rc::new(Cell::new(0.0)),
            header_value: Rc::new(Cell::new(0.0)),
            last_pulse: Cell::new(None),
            collapse_ended: Cell::new(None),
        }
    }

    /// Records that a collapse just settled; landing pulses stay quiet for
    /// the suppression window.
    pub fn note_collapse_end(&self) {
        self.collapse_ended.set(Some(self.runtime.now()));
    }

    fn suppressed(&self) -> bool {
        let now = self.runtime.now();
        if let Some(t) = self.last_pulse.get() {
            if now.saturating_duration_since(t) < PULSE_THROTTLE {
                return true;
            }
        }
        if let Some(t) = self.collapse_ended.get() {
            if now.saturating_duration_since(t) < POST_COLLAPSE_SUPPRESS {
                return true;
            }
        }
        false
    }

    fn push_wrapper(
        on_wrapper: &Rc<dyn Fn(Deformation)>,
        scale: &Rc<Cell<(f32, f32)>>,
        shake_x: &Rc<Cell<f32>>,
    ) {
        let (sx, sy) = scale.get();
        let d = Deformation {
            scale_x: sx,
            scale_y: sy,
            translate_x: shake_x.get(),
            translate_y: 0.0,
        };
        on_wrapper(d);
    }

    /// One spring-shaped landing pulse. Intensity follows a half-sine over
    /// the spring's progress so the deformation returns to identity even when
    /// the curve overshoots.
    pub fn landing(
        &self,
        direction: SquishDirection,
        duration_s: f32,
        default_duration_s: f32,
        params: SquishParams,
    ) {
        if !params.enabled() || self.suppressed() {
            return;
        }
        self.last_pulse.set(Some(self.runtime.now()));

        let strength = params.bounce / REFERENCE_BOUNCE;
        let (compress_y, stretch_x) = match direction {
            SquishDirection::Expand => (EXPAND_COMPRESS_Y, EXPAND_STRETCH_X),
            SquishDirection::Collapse => (COLLAPSE_COMPRESS_Y, COLLAPSE_STRETCH_X),
        };
        let compress_y = compress_y * strength;
        let stretch_x = stretch_x * strength;

        if let Some(prev) = self.landing.borrow_mut().take() {
            prev.stop();
        }

        let spec = AnimationSpec::squish_spring(duration_s, default_duration_s, params.bounce);
        let scale = self.landing_scale.clone();
        let shake_x = self.shake_x.clone();
        let on_wrapper = self.on_wrapper.clone();
        let scale_done = self.landing_scale.clone();
        let shake_done = self.shake_x.clone();
        let on_wrapper_done = self.on_wrapper.clone();
        let handle = self.runtime.animate(
            0.0,
            1.0,
            spec,
            move |v| {
                let intensity = (v.clamp(0.0, 1.0) * PI).sin();
                scale.set((1.0 + stretch_x * intensity, 1.0 - compress_y * intensity));
                Self::push_wrapper(&on_wrapper, &scale, &shake_x);
            },
            move || {
                scale_done.set((1.0, 1.0));
                Self::push_wrapper(&on_wrapper_done, &scale_done, &shake_done);
            },
        );
        *self.landing.borrow_mut() = Some(handle);
    }

    /// Press the header down while the body is open.
    pub fn press_header(&self, params: SquishParams) {
        if !params.enabled() {
            return;
        }
        self.animate_header(
            1.0,
            AnimationSpec::spring_with_bounce(Duration::from_millis(500), params.bounce),
        );
    }

    /// Release the header. A dismissal release uses a short fixed ease so the
    /// header is back before the collapse finishes; otherwise it springs.
    pub fn release_header(&self, pre_dismiss: bool, collapse_duration: Duration, params: SquishParams) {
        if self.header_value.get() == 0.0 {
            return;
        }
        let spec = if pre_dismiss || !params.spring {
            AnimationSpec::smooth(collapse_duration / 2)
        } else {
            AnimationSpec::spring_with_bounce(Duration::from_millis(500), params.bounce)
        };
        self.animate_header(0.0, spec);
    }

    fn animate_header(&self, to: f32, spec: AnimationSpec) {
        if let Some(prev) = self.header.borrow_mut().take() {
            prev.stop();
        }
        let value = self.header_value.clone();
        let on_header = self.on_header.clone();
        let handle = self.runtime.animate(
            value.get(),
            to,
            spec,
            move |v| {
                let v = v.clamp(0.0, 1.0);
                value.set(v);
                on_header(Deformation {
                    scale_x: 1.0 - HEADER_SCALE * v,
                    scale_y: 1.0 - HEADER_SCALE * v,
                    translate_x: 0.0,
                    translate_y: v,
                });
            },
            || {},
        );
        *self.header.borrow_mut() = Some(handle);
    }

    /// Damped horizontal shake for an external error-phase flip.
    pub fn shake(&self, params: SquishParams) {
        if params.reduced_motion {
            return;
        }
        if let Some(prev) = self.shake.borrow_mut().take() {
            prev.stop();
        }
        let scale = self.landing_scale.clone();
        let shake_x = self.shake_x.clone();
        let on_wrapper = self.on_wrapper.clone();
        let scale_done = self.landing_scale.clone();
        let shake_done = self.shake_x.clone();
        let on_wrapper_done = self.on_wrapper.clone();
        let handle = self.runtime.animate(
            0.0,
            1.0,
            AnimationSpec::tween(SHAKE_DURATION, Easing::EaseOut),
            move |v| {
                shake_x.set((v * PI * SHAKE_CYCLES).sin() * (1.0 - v) * SHAKE_AMPLITUDE);
                Self::push_wrapper(&on_wrapper, &scale, &shake_x);
            },
            move || {
                shake_done.set(0.0);
                Self::push_wrapper(&on_wrapper_done, &scale_done, &shake_done);
            },
        );
        *self.shake.borrow_mut() = Some(handle);
    }

    /// Stop every channel and return both deformations to identity.
    pub fn cancel_all(&self) {
        for slot in [&self.landing, &self.header, &self.shake] {
            if let Some(h) = slot.borrow_mut().take() {
                h.stop();
            }
        }
        self.landing_scale.set((1.0, 1.0));
        self.shake_x.set(0.0);
        self.header_value.set(0.0);
        (self.on_wrapper)(Deformation::IDENTITY);
        (self.on_header)(Deformation::IDENTITY);
    }
}
