//! Runs one toast lifetime on a virtual clock and prints the outline at a
//! few sampled instants, so the pill-to-card morph can be eyeballed as SVG
//! path data without a host renderer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use goey_core::{Deformation, MotionPreference, Path, Runtime, Size};
use goey_toast::{
    MeasureSurface, StyleClamps, ToastConfig, ToastContent, ToastController, ToastVisual,
};
use web_time::Duration;

struct DemoSurface {
    clamps: Cell<StyleClamps>,
}

impl MeasureSurface for DemoSurface {
    fn is_mounted(&self) -> bool {
        true
    }
    fn clamps(&self) -> StyleClamps {
        self.clamps.get()
    }
    fn set_clamps(&self, clamps: StyleClamps) {
        self.clamps.set(clamps);
    }
    fn header_width(&self) -> f32 {
        96.0
    }
    fn content_size(&self) -> Size {
        Size {
            width: 280.0,
            height: 110.0,
        }
    }
    fn horizontal_padding(&self) -> f32 {
        24.0
    }
}

#[derive(Default)]
struct DemoVisual {
    outline: RefCell<String>,
    body_visible: Cell<bool>,
    removed: Cell<bool>,
}

impl ToastVisual for DemoVisual {
    fn set_outline(&self, path: &Path) {
        *self.outline.borrow_mut() = path.to_svg();
    }
    fn set_frame(&self, _width: f32, _height: f32) {}
    fn set_clip(&self, _left: f32, _right: f32) {}
    fn set_body_visible(&self, visible: bool) {
        self.body_visible.set(visible);
        log::info!("body {}", if visible { "revealed" } else { "hidden" });
    }
    fn set_wrapper_deformation(&self, _d: Deformation) {}
    fn set_header_deformation(&self, _d: Deformation) {}
    fn set_content(&self, content: &ToastContent) {
        log::info!("content: {:?} ({:?})", content.title, content.phase);
    }
    fn request_removal(&self) {
        self.removed.set(true);
        log::info!("host removal requested");
    }
    fn footprint_settled(&self) {
        log::debug!("footprint settled, siblings reflow");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (rt, _clock) = Runtime::new_test();
    let surface = Rc::new(DemoSurface {
        clamps: Cell::new(StyleClamps::default()),
    });
    let visual = Rc::new(DemoVisual::default());

    let content = ToastContent::new("deploy finished")
        .description("all 12 services rolled out cleanly");
    let ctrl = ToastController::new(
        rt.clone(),
        surface,
        visual.clone(),
        content,
        ToastConfig::default(),
        MotionPreference::new(false),
    );
    ctrl.mount();

    let samples: &[u64] = &[0, 150, 330, 600, 900, 2000, 3100, 3400, 4000, 4800];
    let mut prev = 0;
    for &t in samples {
        rt.advance(Duration::from_millis(t - prev));
        prev = t;
        println!(
            "t={:>4}ms  phase={:<11?} progress={:.2}  body={}  removed={}",
            t,
            ctrl.phase(),
            ctrl.progress(),
            visual.body_visible.get(),
            visual.removed.get(),
        );
        println!("         d=\"{}\"", visual.outline.borrow());
    }

    ctrl.teardown();
    Ok(())
}
