#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Decorative transform produced by the squish/impulse animator. Applied by
/// the host on top of whatever layout transform it already owns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deformation {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Deformation {
    pub const IDENTITY: Deformation = Deformation {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn scale(sx: f32, sy: f32) -> Self {
        Deformation {
            scale_x: sx,
            scale_y: sy,
            ..Self::IDENTITY
        }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Deformation {
            translate_x: tx,
            translate_y: ty,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Deformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
