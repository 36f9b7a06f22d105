use smallvec::SmallVec;

use crate::Vec2;

/// One command of a closed outline. Arcs are circular with the SVG
/// large-arc flag 0 and sweep flag 1, which is all the pill/card geometry
/// ever needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    Arc { radius: f32, to: Vec2 },
    Close,
}

/// A single outline, built command by command. The builder tracks the
/// current point so horizontal/vertical shorthands stay cheap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: SmallVec<[PathSegment; 16]>,
    cursor: Vec2,
    start: Vec2,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cursor = Vec2::new(x, y);
        self.start = self.cursor;
        self.segments.push(PathSegment::MoveTo(self.cursor));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cursor = Vec2::new(x, y);
        self.segments.push(PathSegment::LineTo(self.cursor));
        self
    }

    pub fn horiz_to(&mut self, x: f32) -> &mut Self {
        self.line_to(x, self.cursor.y)
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.cursor = Vec2::new(x, y);
        self.segments.push(PathSegment::QuadTo {
            ctrl: Vec2::new(cx, cy),
            to: self.cursor,
        });
        self
    }

    pub fn arc_to(&mut self, radius: f32, x: f32, y: f32) -> &mut Self {
        self.cursor = Vec2::new(x, y);
        self.segments.push(PathSegment::Arc {
            radius,
            to: self.cursor,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self.cursor = self.start;
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    pub fn start_point(&self) -> Option<Vec2> {
        self.segments.iter().find_map(|s| match s {
            PathSegment::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Last explicit point before `Close`.
    pub fn end_point(&self) -> Option<Vec2> {
        self.segments.iter().rev().find_map(|s| match s {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
            PathSegment::QuadTo { to, .. } | PathSegment::Arc { to, .. } => Some(*to),
            PathSegment::Close => None,
        })
    }

    /// Axis-aligned bounds over explicit points (control points included;
    /// good enough for outline extent checks).
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min: Option<Vec2> = None;
        let mut max: Option<Vec2> = None;
        let mut fold = |p: Vec2| {
            min = Some(match min {
                Some(m) => Vec2::new(m.x.min(p.x), m.y.min(p.y)),
                None => p,
            });
            max = Some(match max {
                Some(m) => Vec2::new(m.x.max(p.x), m.y.max(p.y)),
                None => p,
            });
        };
        for s in &self.segments {
            match s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => fold(*p),
                PathSegment::QuadTo { ctrl, to } => {
                    fold(*ctrl);
                    fold(*to);
                }
                PathSegment::Arc { to, .. } => fold(*to),
                PathSegment::Close => {}
            }
        }
        min.zip(max)
    }

    /// SVG `d` attribute rendition of the outline.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M {},{}", fmt(p.x), fmt(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L {},{}", fmt(p.x), fmt(p.y)));
                }
                PathSegment::QuadTo { ctrl, to } => {
                    d.push_str(&format!(
                        "Q {},{} {},{}",
                        fmt(ctrl.x),
                        fmt(ctrl.y),
                        fmt(to.x),
                        fmt(to.y)
                    ));
                }
                PathSegment::Arc { radius, to } => {
                    let r = fmt(*radius);
                    d.push_str(&format!("A {r},{r} 0 0 1 {},{}", fmt(to.x), fmt(to.y)));
                }
                PathSegment::Close => d.push('Z'),
            }
        }
        d
    }
}

fn fmt(v: f32) -> String {
    // Round away f32 noise so serialized paths are stable.
    let r = (v as f64 * 1000.0).round() / 1000.0;
    format!("{}", r)
}
