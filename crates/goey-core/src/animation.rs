use web_time::Duration;

/// Timing curves for value animations.
///
/// `CubicBezier` matches CSS-style curves (the toast morph uses
/// `(0.4, 0, 0.2, 1)`); `Spring` is a closed-form damped oscillator
/// evaluated over the spec's duration, so even bouncy curves finish at a
/// predictable time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
    Spring {
        /// Undamped angular frequency, pre-scaled to normalized [0,1] time.
        omega: f32,
        /// Damping ratio; < 1.0 overshoots.
        zeta: f32,
    },
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Easing::Spring { omega, zeta } => spring_position(*omega, *zeta, t),
        }
    }
}

fn bezier_coord(a: f32, b: f32, t: f32) -> f32 {
    // One-dimensional cubic with endpoints 0 and 1.
    let inv = 1.0 - t;
    3.0 * inv * inv * t * a + 3.0 * inv * t * t * b + t * t * t
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Invert x(s) by bisection; 20 halvings is well under f32 noise.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut s = x;
    for _ in 0..20 {
        if bezier_coord(x1, x2, s) < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_coord(y1, y2, s)
}

fn spring_position(omega: f32, zeta: f32, t: f32) -> f32 {
    let theta = omega * t;
    if zeta < 1.0 {
        let wd = (1.0 - zeta * zeta).sqrt();
        1.0 - (-zeta * theta).exp() * ((wd * theta).cos() + (zeta / wd) * (wd * theta).sin())
    } else {
        // Critically damped (and the overdamped fallback).
        1.0 - (1.0 + theta) * (-theta).exp()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// The standard material-ish deceleration curve used for non-spring
    /// morphs and fades.
    pub fn smooth(duration: Duration) -> Self {
        Self::tween(duration, Easing::CubicBezier(0.4, 0.0, 0.2, 1.0))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Motion-style spring described by a duration and a bounce in [0,1].
    /// Higher bounce lowers the damping ratio; the curve still snaps to the
    /// target when `duration` elapses.
    pub fn spring_with_bounce(duration: Duration, bounce: f32) -> Self {
        let zeta = (1.0 - bounce).clamp(0.08, 1.0);
        let omega = 7.0 / zeta.max(0.25);
        Self {
            duration,
            easing: Easing::Spring { omega, zeta },
            delay: Duration::ZERO,
        }
    }

    /// Physical spring used by the squish pulses. Constants follow the
    /// original deformation feel: stiffness and damping scale with bounce,
    /// mass with how far the animation duration deviates from its default.
    pub fn squish_spring(duration_s: f32, default_duration_s: f32, bounce: f32) -> Self {
        let scale = duration_s / default_duration_s;
        let stiffness = 200.0 + bounce * 437.5;
        let damping = 24.0 - bounce * 20.0;
        let mass = 0.7 * scale;

        let omega0 = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());
        // Run until the envelope decays to ~2%.
        let settle_s = (4.0 / (zeta * omega0)).clamp(0.2, 1.5);
        Self {
            duration: Duration::from_secs_f32(settle_s),
            easing: Easing::Spring {
                omega: omega0 * settle_s,
                zeta,
            },
            delay: Duration::ZERO,
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for crate::Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        crate::Color(
            (self.0 as f32 + (other.0 as f32 - self.0 as f32) * t) as u8,
            (self.1 as f32 + (other.1 as f32 - self.1 as f32) * t) as u8,
            (self.2 as f32 + (other.2 as f32 - self.2 as f32) * t) as u8,
            (self.3 as f32 + (other.3 as f32 - self.3 as f32) * t) as u8,
        )
    }
}
