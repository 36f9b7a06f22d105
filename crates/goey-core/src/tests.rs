#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use web_time::Duration;

    use crate::animation::*;
    use crate::runtime::Runtime;
    use crate::signal::*;

    #[test]
    fn signal_basics() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn signal_unsubscribe_detaches() {
        let sig = signal(0);
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = sig.subscribe(move |_| c.set(c.get() + 1));
        sig.set(1);
        assert_eq!(count.get(), 1);

        sig.unsubscribe(id);
        sig.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn timer_fires_at_deadline_not_before() {
        let (rt, _clock) = Runtime::new_test();
        let fired = Rc::new(Cell::new(false));

        let f = fired.clone();
        rt.set_timeout(Duration::from_millis(100), move || f.set(true));

        rt.advance(Duration::from_millis(99));
        assert!(!fired.get());
        rt.advance(Duration::from_millis(1));
        assert!(fired.get());
    }

    #[test]
    fn timers_run_in_deadline_order() {
        let (rt, _clock) = Runtime::new_test();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("b", 20u64), ("a", 10), ("c", 30)] {
            let order = order.clone();
            rt.set_timeout(Duration::from_millis(ms), move || {
                order.borrow_mut().push(label);
            });
        }
        rt.advance(Duration::from_millis(50));
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let (rt, _clock) = Runtime::new_test();
        let fired = Rc::new(Cell::new(false));

        let f = fired.clone();
        let handle = rt.set_timeout(Duration::from_millis(10), move || f.set(true));
        assert!(handle.is_armed());
        handle.cancel();
        assert!(!handle.is_armed());

        rt.advance(Duration::from_millis(50));
        assert!(!fired.get());
        assert_eq!(rt.pending_timers(), 0);
    }

    #[test]
    fn frame_callback_runs_next_tick_only() {
        let (rt, _clock) = Runtime::new_test();
        let runs = Rc::new(Cell::new(0));

        let r = runs.clone();
        rt.request_frame(move || r.set(r.get() + 1));
        rt.tick();
        assert_eq!(runs.get(), 1);
        rt.tick();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn frame_callback_queued_during_tick_defers() {
        let (rt, _clock) = Runtime::new_test();
        let runs = Rc::new(Cell::new(0));

        let rt2 = rt.clone();
        let r = runs.clone();
        rt.request_frame(move || {
            let r = r.clone();
            rt2.request_frame(move || r.set(r.get() + 1));
        });
        rt.tick();
        assert_eq!(runs.get(), 0);
        rt.tick();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn linear_tween_is_deterministic() {
        let (rt, clock) = Runtime::new_test();
        let value = Rc::new(Cell::new(0.0f32));
        let done = Rc::new(Cell::new(false));

        let v = value.clone();
        let d = done.clone();
        rt.animate(
            0.0,
            10.0,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
            move |x| v.set(x),
            move || d.set(true),
        );

        clock.advance(Duration::from_millis(250));
        rt.tick();
        assert!((value.get() - 2.5).abs() < 0.01);
        assert!(!done.get());

        clock.advance(Duration::from_millis(750));
        rt.tick();
        assert!((value.get() - 10.0).abs() < 0.001);
        assert!(done.get());
        assert_eq!(rt.running_animations(), 0);
    }

    #[test]
    fn stopped_animation_skips_completion() {
        let (rt, clock) = Runtime::new_test();
        let done = Rc::new(Cell::new(false));

        let d = done.clone();
        let handle = rt.animate(
            0.0,
            1.0,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
            |_| {},
            move || d.set(true),
        );
        handle.stop();

        clock.advance(Duration::from_millis(200));
        rt.tick();
        assert!(!done.get());
    }

    #[test]
    fn animation_delay_gates_updates() {
        let (rt, clock) = Runtime::new_test();
        let updates = Rc::new(Cell::new(0));

        let u = updates.clone();
        rt.animate(
            0.0,
            1.0,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
                .with_delay(Duration::from_millis(50)),
            move |_| u.set(u.get() + 1),
            || {},
        );

        clock.advance(Duration::from_millis(40));
        rt.tick();
        assert_eq!(updates.get(), 0);

        clock.advance(Duration::from_millis(20));
        rt.tick();
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
        ] {
            assert!((easing.interpolate(0.0)).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.interpolate(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn smooth_bezier_is_monotonic() {
        let e = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = e.interpolate(i as f32 / 100.0);
            assert!(v >= prev - 1e-4);
            prev = v;
        }
    }

    #[test]
    fn bouncy_spring_overshoots_then_settles() {
        let spec = AnimationSpec::spring_with_bounce(Duration::from_millis(900), 0.4);
        let Easing::Spring { .. } = spec.easing else {
            panic!("expected a spring curve");
        };
        let max = (0..=100)
            .map(|i| spec.easing.interpolate(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(max > 1.0, "bounce 0.4 should overshoot, peaked at {max}");
        assert!((spec.easing.interpolate(1.0) - 1.0).abs() < 0.05);
    }

    #[test]
    fn squish_spring_stays_underdamped_for_default_bounce() {
        let spec = AnimationSpec::squish_spring(0.6, 0.6, 0.4);
        match spec.easing {
            Easing::Spring { zeta, .. } => assert!(zeta < 1.0),
            other => panic!("expected spring, got {other:?}"),
        }
        assert!(spec.duration >= Duration::from_millis(200));
        assert!(spec.duration <= Duration::from_millis(1500));
    }

    #[test]
    fn interpolate_componentwise() {
        assert_eq!(0.0f32.interpolate(&10.0, 0.5), 5.0);
        let c = crate::Color(0, 0, 0, 255).interpolate(&crate::Color(200, 100, 50, 255), 0.5);
        assert_eq!(c, crate::Color(100, 50, 25, 255));
    }

    #[test]
    fn path_roundtrip_and_svg() {
        let mut p = crate::Path::new();
        p.move_to(0.0, 17.0)
            .arc_to(17.0, 17.0, 0.0)
            .horiz_to(103.0)
            .arc_to(17.0, 120.0, 17.0)
            .arc_to(17.0, 103.0, 34.0)
            .horiz_to(17.0)
            .arc_to(17.0, 0.0, 17.0)
            .close();

        assert!(p.is_closed());
        assert_eq!(p.start_point(), Some(crate::Vec2::new(0.0, 17.0)));
        assert_eq!(p.end_point(), Some(crate::Vec2::new(0.0, 17.0)));
        assert_eq!(
            p.to_svg(),
            "M 0,17 A 17,17 0 0 1 17,0 L 103,0 A 17,17 0 0 1 120,17 \
             A 17,17 0 0 1 103,34 L 17,34 A 17,17 0 0 1 0,17 Z"
        );
    }
}
