use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::animation::{AnimationSpec, Interpolate};
use crate::clock::{Clock, SystemClock, TestClock};

new_key_type! {
    pub struct TimerKey;
    pub struct FrameKey;
    pub struct AnimKey;
}

struct Timer {
    deadline: Instant,
    cb: Option<Box<dyn FnOnce()>>,
}

struct ActiveAnimation {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    started: Instant,
    on_update: Box<dyn FnMut(f32)>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct Inner {
    timers: SlotMap<TimerKey, Timer>,
    frames: SlotMap<FrameKey, Box<dyn FnOnce()>>,
    frame_queue: Vec<FrameKey>,
    anims: SlotMap<AnimKey, Rc<RefCell<ActiveAnimation>>>,
}

/// Single-threaded cooperative scheduler.
///
/// One `Runtime` drives everything a toast does between user events: one-shot
/// macrotask timers, next-frame callbacks (the rAF analogue used to coalesce
/// host mutations and kick off morphs), and per-frame value animations. The
/// host calls [`Runtime::tick`] once per rendered frame; tests construct it
/// with a [`TestClock`] and use [`Runtime::advance`].
///
/// Handles hold weak references, so cancelling after the runtime is gone is
/// a no-op rather than a leak or a panic.
pub struct Runtime {
    clock: Rc<dyn Clock>,
    inner: Rc<RefCell<Inner>>,
    test: Option<TestClock>,
}

impl Clone for Runtime {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            inner: self.inner.clone(),
            test: self.test.clone(),
        }
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Rc::new(RefCell::new(Inner::default())),
            test: None,
        }
    }

    /// Runtime on virtual time. The returned clock handle is shared with the
    /// runtime; prefer [`Runtime::advance`] over advancing it directly so
    /// timers fire at their scheduled instants.
    pub fn new_test() -> (Self, TestClock) {
        let clock = TestClock::new();
        let mut rt = Self::with_clock(Rc::new(clock.clone()));
        rt.test = Some(clock.clone());
        (rt, clock)
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedule a one-shot callback after `delay`.
    pub fn set_timeout(&self, delay: Duration, cb: impl FnOnce() + 'static) -> TimerHandle {
        let deadline = self.now() + delay;
        let key = self.inner.borrow_mut().timers.insert(Timer {
            deadline,
            cb: Some(Box::new(cb)),
        });
        TimerHandle {
            key,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Run a callback on the next tick, after timers but before animation
    /// stepping. Callbacks queued while a tick is running land on the
    /// following tick.
    pub fn request_frame(&self, cb: impl FnOnce() + 'static) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let key = inner.frames.insert(Box::new(cb));
        inner.frame_queue.push(key);
        FrameHandle {
            key,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The animation primitive: interpolates `from..to` over `spec`, invoking
    /// `on_update` each tick and `on_complete` once when the duration
    /// elapses (the value snaps to `to` on the final update). `stop()` on the
    /// handle halts it without completion.
    pub fn animate(
        &self,
        from: f32,
        to: f32,
        spec: AnimationSpec,
        on_update: impl FnMut(f32) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> AnimationHandle {
        let anim = Rc::new(RefCell::new(ActiveAnimation {
            from,
            to,
            spec,
            started: self.now(),
            on_update: Box::new(on_update),
            on_complete: Some(Box::new(on_complete)),
        }));
        let key = self.inner.borrow_mut().anims.insert(anim);
        AnimationHandle {
            key,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Process one frame: due timers in deadline order, then the frame
    /// callbacks queued before this tick, then one animation step.
    pub fn tick(&self) {
        let now = self.now();

        loop {
            let due = self
                .inner
                .borrow()
                .timers
                .iter()
                .filter(|(_, t)| t.deadline <= now)
                .min_by_key(|(_, t)| t.deadline)
                .map(|(k, _)| k);
            let Some(key) = due else { break };
            let cb = self
                .inner
                .borrow_mut()
                .timers
                .remove(key)
                .and_then(|t| t.cb);
            if let Some(cb) = cb {
                cb();
            }
        }

        let queued: Vec<FrameKey> = std::mem::take(&mut self.inner.borrow_mut().frame_queue);
        for key in queued {
            let cb = self.inner.borrow_mut().frames.remove(key);
            if let Some(cb) = cb {
                cb();
            }
        }

        let running: Vec<(AnimKey, Rc<RefCell<ActiveAnimation>>)> = self
            .inner
            .borrow()
            .anims
            .iter()
            .map(|(k, a)| (k, a.clone()))
            .collect();
        for (key, anim) in running {
            if !self.inner.borrow().anims.contains_key(key) {
                continue; // stopped by an earlier callback this tick
            }
            let mut finished = false;
            {
                let mut a = anim.borrow_mut();
                let elapsed = now.saturating_duration_since(a.started);
                if elapsed < a.spec.delay {
                    continue;
                }
                let at = elapsed - a.spec.delay;
                if at >= a.spec.duration {
                    let end = a.to;
                    (a.on_update)(end);
                    finished = true;
                } else {
                    let t = at.as_secs_f32() / a.spec.duration.as_secs_f32();
                    let eased = a.spec.easing.interpolate(t);
                    let v = a.from.interpolate(&a.to, eased);
                    (a.on_update)(v);
                }
            }
            if finished && self.inner.borrow_mut().anims.remove(key).is_some() {
                let cb = anim.borrow_mut().on_complete.take();
                if let Some(cb) = cb {
                    cb();
                }
            }
        }
    }

    /// Advance virtual time by `d`, ticking at every timer deadline along the
    /// way and at a 16 ms cadence while animations or frame callbacks are
    /// pending. Requires a runtime built with [`Runtime::new_test`].
    pub fn advance(&self, d: Duration) {
        const FRAME: Duration = Duration::from_millis(16);
        let test = self
            .test
            .clone()
            .expect("Runtime::advance requires a test clock");
        let end = test.now() + d;
        loop {
            self.tick();
            let now = test.now();
            if now >= end {
                break;
            }
            let next_timer = self
                .inner
                .borrow()
                .timers
                .values()
                .map(|t| t.deadline)
                .filter(|t| *t > now)
                .min();
            let busy = {
                let i = self.inner.borrow();
                !i.anims.is_empty() || !i.frame_queue.is_empty()
            };
            let mut target = end;
            if busy {
                target = target.min(now + FRAME);
            }
            if let Some(t) = next_timer {
                target = target.min(t);
            }
            test.set(target.max(now + Duration::from_millis(1)).min(end));
        }
    }

    /// Pending timer count, for leak checks in tests.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn running_animations(&self) -> usize {
        self.inner.borrow().anims.len()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TimerHandle {
    key: TimerKey,
    inner: Weak<RefCell<Inner>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().timers.remove(self.key);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.inner
            .upgrade()
            .map(|i| i.borrow().timers.contains_key(self.key))
            .unwrap_or(false)
    }
}

pub struct FrameHandle {
    key: FrameKey,
    inner: Weak<RefCell<Inner>>,
}

impl FrameHandle {
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().frames.remove(self.key);
        }
    }
}

pub struct AnimationHandle {
    key: AnimKey,
    inner: Weak<RefCell<Inner>>,
}

impl AnimationHandle {
    /// Halt without running the completion callback.
    pub fn stop(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().anims.remove(self.key);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .upgrade()
            .map(|i| i.borrow().anims.contains_key(self.key))
            .unwrap_or(false)
    }
}
