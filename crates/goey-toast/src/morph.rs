//! Pill-to-card outline generator.
//!
//! Produces a single closed curve that is a capsule at progress 0 and a
//! rounded rectangle at progress 1, with a quadratic "neck" joining the pill
//! cap to the growing body in between. Two anchoring modes: `Edge` grows the
//! body away from the pill's leading edge, `Center` keeps the pill centered
//! and grows both sides symmetrically.

use goey_core::Path;

/// Height of the collapsed pill, and the y where the body starts growing.
pub const PILL_HEIGHT: f32 = 34.0;

/// Maximum horizontal reach of the neck curve at full progress.
const NECK_CURVE: f32 = 14.0;

/// Below this much vertical growth the shape degenerates; render the plain
/// pill instead.
const MIN_GROWTH: f32 = 8.0;

/// Body corner radius cap. The 0.45 factor keeps corners from
/// self-intersecting on very short bodies.
const MAX_CORNER: f32 = 16.0;
const CORNER_GROWTH_RATIO: f32 = 0.45;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Edge,
    Center,
}

/// Build the outline for the given target dimensions at morph progress `t`.
///
/// `pill_w` is the collapsed header footprint, `body_w`/`body_h` the target
/// expanded footprint. Width and height are interpolated internally, so
/// callers pass the same dimensions every frame and vary only `t`.
pub fn outline(pill_w: f32, body_w: f32, body_h: f32, t: f32, anchor: Anchor) -> Path {
    let t = t.clamp(0.0, 1.0);
    match anchor {
        Anchor::Edge => outline_edge(pill_w, body_w, body_h, t),
        Anchor::Center => outline_center(pill_w, body_w, body_h, t),
    }
}

fn pill(path: &mut Path, offset: f32, pill_w: f32) {
    let pr = PILL_HEIGHT / 2.0;
    path.move_to(offset, pr)
        .arc_to(pr, offset + pr, 0.0)
        .horiz_to(offset + pill_w - pr)
        .arc_to(pr, offset + pill_w, pr)
        .arc_to(pr, offset + pill_w - pr, PILL_HEIGHT)
        .horiz_to(offset + pr)
        .arc_to(pr, offset, pr)
        .close();
}

fn outline_edge(pw: f32, bw: f32, th: f32, t: f32) -> Path {
    let pr = PILL_HEIGHT / 2.0;
    let pill_w = pw.min(bw);
    let body_h = PILL_HEIGHT + (th - PILL_HEIGHT) * t;

    let mut path = Path::new();
    if t <= 0.0 || body_h - PILL_HEIGHT < MIN_GROWTH {
        pill(&mut path, 0.0, pill_w);
        return path;
    }

    let curve = NECK_CURVE * t;
    let cr = MAX_CORNER.min((body_h - PILL_HEIGHT) * CORNER_GROWTH_RATIO);
    let body_w = pill_w + (bw - pill_w) * t;
    let body_top = PILL_HEIGHT - curve;
    let q_end_x = (pill_w + curve).min(body_w - cr);

    path.move_to(0.0, pr)
        .arc_to(pr, pr, 0.0)
        .horiz_to(pill_w - pr)
        .arc_to(pr, pill_w, pr)
        .line_to(pill_w, body_top)
        .quad_to(pill_w, body_top + curve, q_end_x, body_top + curve)
        .horiz_to(body_w - cr)
        .arc_to(cr, body_w, body_top + curve + cr)
        .line_to(body_w, body_h - cr)
        .arc_to(cr, body_w - cr, body_h)
        .horiz_to(cr)
        .arc_to(cr, 0.0, body_h - cr)
        .close();
    path
}

fn outline_center(pw: f32, bw: f32, th: f32, t: f32) -> Path {
    let pr = PILL_HEIGHT / 2.0;
    let pill_w = pw.min(bw);
    let pill_offset = (bw - pill_w) / 2.0;
    let body_h = PILL_HEIGHT + (th - PILL_HEIGHT) * t;

    let mut path = Path::new();
    if t <= 0.0 || body_h - PILL_HEIGHT < MIN_GROWTH {
        pill(&mut path, pill_offset, pill_w);
        return path;
    }

    let curve = NECK_CURVE * t;
    let cr = MAX_CORNER.min((body_h - PILL_HEIGHT) * CORNER_GROWTH_RATIO);
    let body_top = PILL_HEIGHT - curve;

    // Symmetric growth around the footprint's midline.
    let body_center = bw / 2.0;
    let half_body_w = pill_w / 2.0 + ((bw - pill_w) / 2.0) * t;
    let body_left = body_center - half_body_w;
    let body_right = body_center + half_body_w;

    let q_left_x = (body_left + cr).max(pill_offset - curve);
    let q_right_x = (body_right - cr).min(pill_offset + pill_w + curve);

    path.move_to(pill_offset, pr)
        .arc_to(pr, pill_offset + pr, 0.0)
        .horiz_to(pill_offset + pill_w - pr)
        .arc_to(pr, pill_offset + pill_w, pr)
        .line_to(pill_offset + pill_w, body_top)
        .quad_to(
            pill_offset + pill_w,
            body_top + curve,
            q_right_x,
            body_top + curve,
        )
        .horiz_to(body_right - cr)
        .arc_to(cr, body_right, body_top + curve + cr)
        .line_to(body_right, body_h - cr)
        .arc_to(cr, body_right - cr, body_h)
        .horiz_to(body_left + cr)
        .arc_to(cr, body_left, body_h - cr)
        .line_to(body_left, body_top + curve + cr)
        .arc_to(cr, body_left + cr, body_top + curve)
        .horiz_to(q_left_x)
        .quad_to(pill_offset, body_top + curve, pill_offset, body_top)
        .close();
    path
}
