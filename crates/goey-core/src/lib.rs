//! # Runtime core for goey
//!
//! Everything here is single-threaded and cooperative: one [`Runtime`] per
//! UI thread owns the timers, next-frame callbacks, and value animations the
//! toast engine layers on top. There are four main pieces:
//!
//! - `Runtime` — timers + frame loop + the `animate` primitive.
//! - `Signal<T>` / `MotionPreference` — observable values with subscriptions.
//! - `AnimationSpec` / `Easing` — timing curves, including closed-form
//!   springs parameterized by a bounce value.
//! - `Path` — closed-outline builder with SVG serialization.
//!
//! ## Driving time
//!
//! The host calls `tick()` once per rendered frame. Tests use virtual time:
//!
//! ```rust
//! use goey_core::*;
//! use web_time::Duration;
//!
//! let (rt, _clock) = Runtime::new_test();
//! let fired = std::rc::Rc::new(std::cell::Cell::new(false));
//! let f = fired.clone();
//! rt.set_timeout(Duration::from_millis(250), move || f.set(true));
//! rt.advance(Duration::from_millis(300));
//! assert!(fired.get());
//! ```
//!
//! ## Animating a value
//!
//! `animate` is the tweening primitive the rest of the engine consumes:
//! per-frame `on_update`, one `on_complete`, and a handle whose `stop()`
//! halts the animation without completing it. Starting a replacement writer
//! for the same value must stop the old handle first; the engine's
//! controller owns every handle it starts for exactly that reason.

pub mod animation;
pub mod clock;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod path;
pub mod runtime;
pub mod signal;
pub mod tests;

pub use animation::*;
pub use clock::*;
pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use path::*;
pub use runtime::*;
pub use signal::*;
