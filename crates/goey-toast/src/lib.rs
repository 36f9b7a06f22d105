//! # goey-toast
//!
//! A shape-morphing toast engine. Each toast renders as a single closed
//! outline that is a capsule ("pill") while collapsed and a rounded card
//! while expanded; the engine morphs between the two while coordinating
//! layered timers: a reveal gate for the inner content, an auto-dismiss
//! deadline that pauses on hover, a fixed-ease dismissal collapse, and grace
//! windows before the host stack drops the toast.
//!
//! The crate splits along the seams:
//!
//! - [`morph`] — the pure outline generator (edge- and center-anchored).
//! - [`dimensions`] — natural-size measurement with style round-tripping.
//! - [`squish`] — decorative deformation pulses layered on the morph.
//! - [`transitions`] / [`lifecycle`] — a pure transition table plus the
//!   [`lifecycle::ToastController`] that executes its effects against a
//!   [`goey_core::Runtime`].
//! - [`host`] — height re-publication and the shared mutation watcher.
//! - [`presentation`] — phase-to-visual lookups.
//! - [`toaster`] — the caller-facing API and duration policy.
//!
//! The host embedding supplies three traits: a
//! [`dimensions::MeasureSurface`] for layout reads, a
//! [`lifecycle::ToastVisual`] for output, and a [`toaster::ToastHost`] for
//! stack insertion and removal. Everything runs on one cooperative
//! [`goey_core::Runtime`]; tests drive it on virtual time.

pub mod dimensions;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod morph;
pub mod presentation;
pub mod squish;
pub mod tests;
pub mod toaster;
pub mod transitions;
pub mod types;

pub use dimensions::{DimensionTracker, Dimensions, MeasureSurface, StyleClamps};
pub use error::ToastError;
pub use host::{ContainerKey, HostStack, MutationKind, ObserverRegistry, sync_stack_heights};
pub use lifecycle::{DEFAULT_BOUNCE, DEFAULT_DISPLAY_DURATION, ToastConfig, ToastController, ToastVisual};
pub use morph::{Anchor, PILL_HEIGHT, outline};
pub use squish::{SquishAnimator, SquishDirection, SquishParams};
pub use toaster::{
    HostOptions, PendingToast, Settled, StackContext, ToastHost, Toaster, render_isolated,
    stack_context,
};
pub use transitions::{Effect, Event, Lifecycle, Plan, Snapshot};
pub use types::*;
