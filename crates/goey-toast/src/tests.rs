//! Lifecycle scenario tests on virtual time.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use goey_core::{AnimationSpec, Deformation, MotionPreference, Path, Runtime, Size, TestClock};
    use web_time::Duration;

    use crate::dimensions::{MeasureSurface, StyleClamps};
    use crate::lifecycle::{ToastConfig, ToastController, ToastVisual, COLLAPSE_DURATION};
    use crate::transitions::Lifecycle;
    use crate::types::{ToastAction, ToastContent, ToastPhase};

    struct FakeSurface {
        mounted: Cell<bool>,
        clamps: Cell<StyleClamps>,
        header: Cell<f32>,
        content: Cell<Size>,
    }

    impl FakeSurface {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                mounted: Cell::new(true),
                clamps: Cell::new(StyleClamps::default()),
                header: Cell::new(96.0),
                content: Cell::new(Size {
                    width: 280.0,
                    height: 110.0,
                }),
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
            self.clamps.set(clamps);
        }
        fn header_width(&self) -> f32 {
            self.header.get()
        }
        fn content_size(&self) -> Size {
            self.content.get()
        }
        fn horizontal_padding(&self) -> f32 {
            24.0
        }
    }

    #[derive(Default)]
    struct VisualLog {
        outlines: usize,
        frames: Vec<(f32, f32)>,
        body_changes: Vec<bool>,
        wrapper: Vec<Deformation>,
        contents: Vec<ToastContent>,
        removal_requests: usize,
        settles: usize,
        total_calls: usize,
    }

    #[derive(Default)]
    struct FakeVisual(RefCell<VisualLog>);

    impl FakeVisual {
        fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }
    }

    impl ToastVisual for FakeVisual {
        fn set_outline(&self, _path: &Path) {
            let mut log = self.0.borrow_mut();
            log.outlines += 1;
            log.total_calls += 1;
        }
        fn set_frame(&self, width: f32, height: f32) {
            let mut log = self.0.borrow_mut();
            log.frames.push((width, height));
            log.total_calls += 1;
        }
        fn set_clip(&self, _left: f32, _right: f32) {
            self.0.borrow_mut().total_calls += 1;
        }
        fn set_body_visible(&self, visible: bool) {
            let mut log = self.0.borrow_mut();
            log.body_changes.push(visible);
            log.total_calls += 1;
        }
        fn set_wrapper_deformation(&self, d: Deformation) {
            let mut log = self.0.borrow_mut();
            log.wrapper.push(d);
            log.total_calls += 1;
        }
        fn set_header_deformation(&self, _d: Deformation) {
            self.0.borrow_mut().total_calls += 1;
        }
        fn set_content(&self, content: &ToastContent) {
            let mut log = self.0.borrow_mut();
            log.contents.push(content.clone());
            log.total_calls += 1;
        }
        fn request_removal(&self) {
            let mut log = self.0.borrow_mut();
            log.removal_requests += 1;
            log.total_calls += 1;
        }
        fn footprint_settled(&self) {
            let mut log = self.0.borrow_mut();
            log.settles += 1;
            log.total_calls += 1;
        }
    }

    struct Harness {
        rt: Runtime,
        #[allow(dead_code)]
        clock: TestClock,
        surface: Rc<FakeSurface>,
        visual: Rc<FakeVisual>,
        motion: MotionPreference,
        ctrl: Rc<ToastController>,
    }

    impl Harness {
        fn mount(content: ToastContent, config: ToastConfig, reduced: bool) -> Self {
            let (rt, clock) = Runtime::new_test();
            let surface = FakeSurface::new();
            let visual = FakeVisual::new();
            let motion = MotionPreference::new(reduced);
            let ctrl = ToastController::new(
                rt.clone(),
                surface.clone(),
                visual.clone(),
                content,
                config,
                motion.clone(),
            );
            ctrl.mount();
            Self {
                rt,
                clock,
                surface,
                visual,
                motion,
                ctrl,
            }
        }

        fn advance(&self, ms: u64) {
            self.rt.advance(Duration::from_millis(ms));
        }

        fn removals(&self) -> usize {
            self.visual.0.borrow().removal_requests
        }

        fn body_visible(&self) -> bool {
            self.ctrl.body_visible()
        }
    }

    fn bare() -> ToastContent {
        ToastContent::new("saved")
    }

    fn with_body() -> ToastContent {
        ToastContent::new("saved").description("all changes synced to the server")
    }

    fn default_config() -> ToastConfig {
        ToastConfig::default()
    }

    #[test]
    fn bare_title_mounts_collapsed_with_no_timer() {
        let h = Harness::mount(bare(), default_config(), false);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert!(!h.ctrl.dismiss_timer_armed());

        h.advance(10_000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert_eq!(h.ctrl.progress(), 0.0);
        assert_eq!(h.removals(), 0, "host owns a bare pill's removal");
    }

    #[test]
    fn reveal_gate_shows_body_at_330ms() {
        let h = Harness::mount(with_body(), default_config(), false);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanding);
        assert!(!h.body_visible());

        h.advance(329);
        assert!(!h.body_visible(), "body revealed before the gate");
        h.advance(2);
        assert!(h.body_visible());
        assert!(h.ctrl.dismiss_timer_armed(), "timer arms with the reveal");
    }

    #[test]
    fn full_lifetime_envelope_is_ordered() {
        // 330 reveal + 2770 display + 900 collapse + 800 grace ≈ 4800 ms.
        let h = Harness::mount(with_body(), default_config(), false);

        h.advance(1000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert!((h.ctrl.progress() - 1.0).abs() < 1e-3);
        assert!(h.visual.0.borrow().settles >= 1);

        h.advance(2090); // t = 3090, just before the 3100 ms deadline
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        h.advance(20); // t = 3110
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
        assert!(!h.body_visible());

        h.advance(990); // t = 4100, collapse (900 ms ease) has settled
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert_eq!(h.ctrl.progress(), 0.0);
        assert_eq!(h.removals(), 0);

        h.advance(600); // t = 4700, inside the grace window
        assert_eq!(h.removals(), 0);
        h.advance(200); // t = 4900
        assert_eq!(h.removals(), 1);
    }

    #[test]
    fn short_display_duration_arms_no_timer() {
        // 1000 − 330 − 900 < 0: the toast persists until explicit dismissal.
        let mut config = default_config();
        config.display_duration = Some(Duration::from_millis(1000));
        let h = Harness::mount(with_body(), config, false);

        h.advance(5000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert!(!h.ctrl.dismiss_timer_armed());
        assert_eq!(h.removals(), 0);
    }

    #[test]
    fn no_display_duration_means_no_auto_dismiss() {
        let mut config = default_config();
        config.display_duration = None;
        let h = Harness::mount(with_body(), config, false);
        h.advance(10_000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert!(!h.ctrl.dismiss_timer_armed());
    }

    #[test]
    fn hover_pauses_and_resumes_with_remaining_time() {
        let h = Harness::mount(with_body(), default_config(), false);

        // Timer armed at the 330 ms reveal for 2770 ms; hover 1000 ms in.
        h.advance(1330);
        h.ctrl.set_hovered(true);
        assert!(!h.ctrl.dismiss_timer_armed());
        let remaining = h.ctrl.remaining_display().unwrap();
        assert_eq!(remaining, Duration::from_millis(1770));

        // Hover length is irrelevant to the remainder.
        h.advance(500);
        h.ctrl.set_hovered(false);
        assert!(h.ctrl.dismiss_timer_armed());

        h.advance(1769);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        h.advance(2);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
    }

    #[test]
    fn hover_while_expanded_blocks_dismissal_indefinitely() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1000);
        h.ctrl.set_hovered(true);
        h.advance(60_000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert_eq!(h.removals(), 0);
    }

    #[test]
    fn hover_rescues_an_in_flight_collapse() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(3300); // mid-collapse (started at 3100)
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
        let partial = h.ctrl.progress();
        assert!(partial > 0.0 && partial < 1.0);

        h.ctrl.set_hovered(true);
        assert_eq!(h.ctrl.phase(), Lifecycle::ReExpanding);
        assert!(h.body_visible(), "re-expand skips the reveal gate");

        h.advance(1500);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert!((h.ctrl.progress() - 1.0).abs() < 1e-3);
        assert_eq!(h.removals(), 0, "rescue cancels the pending removal");
    }

    #[test]
    fn hover_rescues_a_collapsed_toast_inside_the_grace_window() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(4300); // collapsed, removal grace running
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);

        h.ctrl.set_hovered(true);
        assert_eq!(h.ctrl.phase(), Lifecycle::ReExpanding);
        h.advance(10_000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert_eq!(h.removals(), 0);
    }

    #[test]
    fn explicit_dismiss_collapses_and_removes() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1000);
        h.ctrl.dismiss();
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);

        h.advance(2000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert_eq!(h.removals(), 1);
    }

    #[test]
    fn reduced_motion_expands_in_one_synchronous_update() {
        let h = Harness::mount(with_body(), default_config(), true);
        // No time has passed: already expanded, body up, timer armed.
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert_eq!(h.ctrl.progress(), 1.0);
        assert!(h.body_visible());
        assert!(h.ctrl.dismiss_timer_armed());
    }

    #[test]
    fn reduced_motion_collapse_snaps_and_flushes_quickly() {
        let h = Harness::mount(with_body(), default_config(), true);
        // The snapped collapse costs a 10 ms flush rather than the 900 ms
        // ease, so the dismiss delay is 4000 − 0 − 10 = 3990 ms and the toast
        // stays up nearly its whole configured lifetime.
        h.advance(3989);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        h.advance(2);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert_eq!(h.ctrl.progress(), 0.0);

        // Removal grace shrinks to a 10 ms flush.
        h.advance(20);
        assert_eq!(h.removals(), 1);

        // Snaps only: three flushes total (mount, expand, collapse) and no
        // decorative pulses.
        let log = h.visual.0.borrow();
        assert_eq!(log.outlines, 3);
        assert!(log.wrapper.is_empty());
    }

    #[test]
    fn reduced_motion_short_duration_still_auto_dismisses() {
        // 800 ms would never fit a 330 ms reveal plus a 900 ms ease, but with
        // snaps the arithmetic is 800 − 0 − 10 = 790 ms and the timer arms.
        let mut config = default_config();
        config.display_duration = Some(Duration::from_millis(800));
        let h = Harness::mount(with_body(), config, true);
        assert!(h.ctrl.dismiss_timer_armed());

        h.advance(789);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        h.advance(2);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        h.advance(20);
        assert_eq!(h.removals(), 1);
    }

    #[test]
    fn reduced_motion_flipping_on_snaps_the_running_morph() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(200);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanding);
        assert!(h.ctrl.progress() < 1.0);

        h.motion.set_reduced(true);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);
        assert_eq!(h.ctrl.progress(), 1.0);
        assert_eq!(h.rt.running_animations(), 0);
    }

    #[test]
    fn reduced_motion_flipping_on_snaps_a_running_pill_resize() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(2000);

        // Header growth kicks off a pill width animation.
        h.surface.header.set(140.0);
        h.ctrl.set_content(with_body());
        h.advance(100);
        assert_eq!(h.rt.running_animations(), 1);

        h.motion.set_reduced(true);
        assert_eq!(h.rt.running_animations(), 0);
        assert_eq!(h.ctrl.animated_dimensions().pill_w, 164.0);
    }

    #[test]
    fn teardown_cancels_everything_and_silences_callbacks() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(100);
        h.ctrl.teardown();
        assert_eq!(h.rt.pending_timers(), 0);
        assert_eq!(h.rt.running_animations(), 0);

        let calls_before = h.visual.0.borrow().total_calls;
        h.advance(20_000);
        assert_eq!(
            h.visual.0.borrow().total_calls,
            calls_before,
            "a callback fired after teardown"
        );
    }

    #[test]
    fn action_error_is_contained_and_success_swap_proceeds() {
        let content = ToastContent::new("3 files staged").action(
            ToastAction::new("undo", || Err("callback exploded".into()))
                .with_success_label("undone"),
        );
        let h = Harness::mount(content, default_config(), false);
        h.advance(1000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Expanded);

        h.ctrl.action_clicked();
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
        let current = h.ctrl.content();
        assert_eq!(current.title, "undone");
        assert_eq!(current.phase, ToastPhase::Success);
        assert!(current.description.is_none() && current.action.is_none());

        h.advance(1200); // collapse (900 ms spring) settles near t = 1900
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        // The 1200 ms success removal counts from the collapse end.
        h.advance(850); // t = 3050, still inside the removal window
        assert_eq!(h.removals(), 0);
        h.advance(300); // t = 3350
        assert_eq!(h.removals(), 1);
    }

    #[test]
    fn hover_cannot_rescue_an_optimistic_success() {
        let content = ToastContent::new("uploading").action(
            ToastAction::new("cancel", || Ok(())).with_success_label("cancelled"),
        );
        let h = Harness::mount(content, default_config(), false);
        h.advance(1000);
        h.ctrl.action_clicked();
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);

        h.ctrl.set_hovered(true);
        assert_eq!(
            h.ctrl.phase(),
            Lifecycle::Collapsing,
            "the override cleared the body, so there is nothing to re-open"
        );

        // The success removal is not hover-cancelable.
        h.advance(5000);
        assert_eq!(h.removals(), 1);
    }

    #[test]
    fn content_update_ignored_while_success_override_active() {
        let content = ToastContent::new("queued").action(
            ToastAction::new("run now", || Ok(())).with_success_label("running"),
        );
        let h = Harness::mount(content, default_config(), false);
        h.advance(1000);
        h.ctrl.action_clicked();

        h.ctrl.set_content(ToastContent::new("replaced").description("ignored"));
        assert_eq!(h.ctrl.content().title, "running");
    }

    #[test]
    fn animated_dimensions_are_a_convex_combination() {
        let h = Harness::mount(with_body(), default_config(), false);
        // Early in the expand, before the bouncy spring first crosses 1.
        h.advance(150);
        let p = h.ctrl.progress();
        assert!(p > 0.0 && p < 1.0);

        let dims = h.ctrl.animated_dimensions();
        assert!((dims.body_w - (120.0 + (280.0 - 120.0) * p)).abs() < 1e-3);
        assert!((dims.body_h - (34.0 + (110.0 - 34.0) * p)).abs() < 1e-3);
        assert_eq!(dims.pill_w, 120.0);
    }

    #[test]
    fn error_phase_flip_shakes_the_wrapper() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1500);
        let wrapper_before = h.visual.0.borrow().wrapper.len();

        h.ctrl
            .set_content(with_body().phase(ToastPhase::Error));
        h.advance(500);

        let log = h.visual.0.borrow();
        let shook = log.wrapper[wrapper_before..]
            .iter()
            .any(|d| d.translate_x.abs() > 0.5);
        assert!(shook, "no shake frames after the error flip");
    }

    #[test]
    fn content_growth_remeasures_after_the_debounce() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1000);

        h.surface.content.set(Size {
            width: 320.0,
            height: 150.0,
        });
        h.ctrl.set_content(
            ToastContent::new("saved").description("a much longer description that wraps"),
        );
        h.advance(200);

        let dims = h.ctrl.animated_dimensions();
        assert!((dims.body_w - 320.0).abs() < 1e-3);
        assert!((dims.body_h - 150.0).abs() < 1e-3);
    }

    #[test]
    fn content_becoming_bare_collapses() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1000);
        h.ctrl.set_content(ToastContent::new("saved"));
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
        h.advance(2000);
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsed);
        assert_eq!(h.removals(), 0, "a content collapse is not a dismissal");
    }

    #[test]
    fn interactive_collapse_damps_the_configured_bounce() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(1000);
        h.ctrl.set_content(ToastContent::new("saved"));
        assert_eq!(h.ctrl.phase(), Lifecycle::Collapsing);
        h.advance(160);

        let t = Duration::from_millis(160).as_secs_f32() / COLLAPSE_DURATION.as_secs_f32();
        let damped = 1.0
            - AnimationSpec::spring_with_bounce(COLLAPSE_DURATION, 0.4 * 0.875)
                .easing
                .interpolate(t);
        let raw = 1.0
            - AnimationSpec::spring_with_bounce(COLLAPSE_DURATION, 0.4)
                .easing
                .interpolate(t);
        let p = h.ctrl.progress();
        assert!((p - damped).abs() < 1e-4, "progress {p} is off the damped spring {damped}");
        assert!((p - raw).abs() > 1e-2, "collapse ran with the undamped bounce");
    }

    #[test]
    fn expand_pulse_squishes_the_wrapper() {
        let h = Harness::mount(with_body(), default_config(), false);
        h.advance(2000);
        let log = h.visual.0.borrow();
        let squished = log.wrapper.iter().any(|d| d.scale_y < 0.99);
        assert!(squished, "no landing pulse after the body revealed");
    }

    #[test]
    fn pill_resize_pulses_a_collapsed_toast() {
        let h = Harness::mount(bare(), default_config(), false);
        h.advance(500); // mount pulse settled
        let before = h.visual.0.borrow().wrapper.len();

        h.surface.header.set(140.0);
        h.ctrl.set_content(ToastContent::new("saved everywhere"));
        h.advance(600);

        let log = h.visual.0.borrow();
        let squished = log.wrapper[before..].iter().any(|d| d.scale_y < 0.99);
        assert!(squished, "no landing pulse alongside the pill resize");
    }
}
