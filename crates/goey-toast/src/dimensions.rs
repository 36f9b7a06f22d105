//! Natural-size measurement and the animated-dimension model.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use goey_core::{Interpolate, Runtime, Size, TimerHandle};
use web_time::Duration;

/// Late layout and font settling make a single measurement unreliable; a
/// second read lands after this debounce.
const REMEASURE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Target footprints of one toast: the collapsed pill and the expanded body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub pill_w: f32,
    pub body_w: f32,
    pub body_h: f32,
}

impl Interpolate for Dimensions {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            pill_w: self.pill_w.interpolate(&other.pill_w, t),
            body_w: self.body_w.interpolate(&other.body_w, t),
            body_h: self.body_h.interpolate(&other.body_h, t),
        }
    }
}

/// Width/height clamps the controller applies while animating. Measurement
/// lifts them, reads the natural size, and puts them back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleClamps {
    pub width: Option<f32>,
    pub max_height: Option<f32>,
    pub clip: bool,
}

impl StyleClamps {
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// The measurement seam to the host's layout tree.
///
/// `header_width` and `content_size` must report natural (unclipped) extents
/// given the clamps currently set; the tracker guarantees clamps are cleared
/// around those reads and restored afterward.
pub trait MeasureSurface {
    fn is_mounted(&self) -> bool;
    fn clamps(&self) -> StyleClamps;
    fn set_clamps(&self, clamps: StyleClamps);
    /// Width of the pill header row, padding excluded.
    fn header_width(&self) -> f32;
    /// Full expanded content footprint.
    fn content_size(&self) -> Size;
    /// Horizontal padding added around the header to form the pill.
    fn horizontal_padding(&self) -> f32;
}

/// Owns the target [`Dimensions`] and re-reads them on demand.
///
/// A measurement against an unmounted surface is a no-op returning `None`;
/// callers keep driving the last known target.
pub struct DimensionTracker {
    runtime: Runtime,
    surface: Rc<dyn MeasureSurface>,
    target: Cell<Dimensions>,
    debounce: RefCell<Option<TimerHandle>>,
}

impl DimensionTracker {
    pub fn new(runtime: Runtime, surface: Rc<dyn MeasureSurface>) -> Rc<Self> {
        Rc::new(Self {
            runtime,
            surface,
            target: Cell::new(Dimensions::default()),
            debounce: RefCell::new(None),
        })
    }

    pub fn target(&self) -> Dimensions {
        self.target.get()
    }

    /// Save clamps, clear them, read natural sizes, restore. Idempotent: two
    /// calls without a content change read the same values, and the surface
    /// styling round-trips exactly.
    pub fn measure(&self) -> Option<Dimensions> {
        if !self.surface.is_mounted() {
            return None;
        }
        let saved = self.surface.clamps();
        self.surface.set_clamps(StyleClamps::default());
        let header = self.surface.header_width();
        let content = self.surface.content_size();
        let padding = self.surface.horizontal_padding();
        self.surface.set_clamps(saved);

        let dims = Dimensions {
            pill_w: header + padding,
            body_w: content.width,
            body_h: content.height,
        };
        self.target.set(dims);
        Some(dims)
    }

    /// Debounced re-measurement. A second request within the window resets
    /// the timer; `on_measured` runs once with the fresh target.
    pub fn schedule_remeasure(self: &Rc<Self>, on_measured: impl Fn(Dimensions) + 'static) {
        if let Some(prev) = self.debounce.borrow_mut().take() {
            prev.cancel();
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.runtime.set_timeout(REMEASURE_DEBOUNCE, move || {
            let Some(tracker) = weak.upgrade() else { return };
            tracker.debounce.borrow_mut().take();
            if let Some(dims) = tracker.measure() {
                on_measured(dims);
            }
        });
        *self.debounce.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        if let Some(h) = self.debounce.borrow_mut().take() {
            h.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    pub(crate) struct FakeSurface {
        pub mounted: StdCell<bool>,
        pub clamps: StdCell<StyleClamps>,
        pub header: StdCell<f32>,
        pub content: StdCell<Size>,
        pub padding: f32,
        pub clamp_writes: StdCell<usize>,
    }

    impl FakeSurface {
        pub fn new() -> Rc<Self> {
            Rc::new(Self {
                mounted: StdCell::new(true),
                clamps: StdCell::new(StyleClamps::default()),
                header: StdCell::new(96.0),
                content: StdCell::new(Size {
                    width: 280.0,
                    height: 110.0,
                }),
                padding: 24.0,
                clamp_writes: StdCell::new(0),
            })
        }
    }

    impl MeasureSurface for FakeSurface {
        fn is_mounted(&self) -> bool {
            self.mounted.get()
        }
        fn clamps(&self) -> StyleClamps {
            self.clamps.get()
        }
        fn set_clamps(&self, clamps: StyleClamps) {
            self.clamp_writes.set(self.clamp_writes.get() + 1);
            self.clamps.set(clamps);
        }
        fn header_width(&self) -> f32 {
            self.header.get()
        }
        fn content_size(&self) -> Size {
            self.content.get()
        }
        fn horizontal_padding(&self) -> f32 {
            self.padding
        }
    }

    #[test]
    fn measure_reads_pill_and_body_footprints() {
        let (rt, _clock) = Runtime::new_test();
        let surface = FakeSurface::new();
        let tracker = DimensionTracker::new(rt, surface);

        let dims = tracker.measure().unwrap();
        assert_eq!(dims.pill_w, 120.0);
        assert_eq!(dims.body_w, 280.0);
        assert_eq!(dims.body_h, 110.0);
        assert_eq!(tracker.target(), dims);
    }

    #[test]
    fn measure_round_trips_clamps() {
        let (rt, _clock) = Runtime::new_test();
        let surface = FakeSurface::new();
        let applied = StyleClamps {
            width: Some(120.0),
            max_height: Some(34.0),
            clip: true,
        };
        surface.clamps.set(applied);
        let tracker = DimensionTracker::new(rt, surface.clone());

        let a = tracker.measure().unwrap();
        let b = tracker.measure().unwrap();
        assert_eq!(a, b);
        assert_eq!(surface.clamps.get(), applied);
        // Each measure writes exactly twice: clear + restore.
        assert_eq!(surface.clamp_writes.get(), 4);
    }

    #[test]
    fn unmounted_surface_is_a_noop() {
        let (rt, _clock) = Runtime::new_test();
        let surface = FakeSurface::new();
        surface.mounted.set(false);
        let tracker = DimensionTracker::new(rt, surface.clone());

        assert!(tracker.measure().is_none());
        assert_eq!(surface.clamp_writes.get(), 0);
        assert_eq!(tracker.target(), Dimensions::default());
    }

    #[test]
    fn remeasure_is_debounced_and_coalesced() {
        let (rt, _clock) = Runtime::new_test();
        let surface = FakeSurface::new();
        let tracker = DimensionTracker::new(rt.clone(), surface.clone());
        let runs = Rc::new(StdCell::new(0));

        let r = runs.clone();
        tracker.schedule_remeasure(move |_| r.set(r.get() + 1));
        rt.advance(Duration::from_millis(50));
        let r = runs.clone();
        tracker.schedule_remeasure(move |_| r.set(r.get() + 1));

        rt.advance(Duration::from_millis(99));
        assert_eq!(runs.get(), 0, "second request must reset the window");
        rt.advance(Duration::from_millis(1));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn interpolation_is_componentwise() {
        let a = Dimensions {
            pill_w: 100.0,
            body_w: 200.0,
            body_h: 34.0,
        };
        let b = Dimensions {
            pill_w: 120.0,
            body_w: 300.0,
            body_h: 134.0,
        };
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.pill_w, 110.0);
        assert_eq!(mid.body_w, 250.0);
        assert_eq!(mid.body_h, 84.0);
    }
}
