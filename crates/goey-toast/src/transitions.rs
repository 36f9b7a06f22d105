//! Pure lifecycle transition planning.
//!
//! [`plan`] maps an event plus a snapshot of the controller's flags to the
//! next lifecycle phase and a list of effects, with no access to timers or
//! animations. The controller executes the effects; this table is what the
//! timing behavior is tested against.

use smallvec::SmallVec;

/// Where a toast is in its open/close cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
    ReExpanding,
}

/// Everything a transition decision depends on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapshot {
    pub phase: Lifecycle,
    pub expandable: bool,
    pub hovered: bool,
    /// Inner content is revealed (the reveal delay has elapsed).
    pub body_shown: bool,
    /// A timer-driven or requested dismissal is in flight.
    pub pre_dismiss: bool,
    /// The optimistic action-success override is active.
    pub success_override: bool,
    /// Host removal is scheduled (grace period running).
    pub removal_pending: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    ContentBecameExpandable,
    ContentBecameBare,
    RevealDelayElapsed,
    ExpandFinished,
    DismissTimerFired,
    DismissRequested,
    CollapseFinished,
    HoverStart,
    HoverEnd,
    ActionSucceeded,
    PhaseFlippedToError,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Begin the 0→1 morph; `from_partial` skips the reveal gate.
    StartExpand { from_partial: bool },
    /// Arm the reveal-delay timer.
    GateReveal,
    ShowBody,
    HideBody,
    /// Snapshot current expanded dimensions as the collapse start.
    SnapshotExpandedDims,
    /// Begin the 1→0 morph.
    StartCollapse { pre_dismiss: bool },
    /// Arm the auto-dismiss timer (remaining time if captured, else full).
    ArmDismissTimer,
    /// Cancel the dismiss timer, keeping its remaining time.
    CaptureRemaining,
    ClearRemaining,
    ScheduleHostRemoval,
    CancelHostRemoval,
    /// Arm the long one-shot that removes an optimistically-succeeded toast.
    ScheduleSuccessRemoval,
    /// Swap title to the success label and drop body content.
    ApplySuccessOverride,
    NoteCollapseEnd,
    LandingImpulse,
    Shake,
    NotifyHost,
}

pub type Effects = SmallVec<[Effect; 6]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub next: Lifecycle,
    pub effects: Effects,
}

impl Plan {
    fn stay(snap: &Snapshot) -> Self {
        Self {
            next: snap.phase,
            effects: Effects::new(),
        }
    }

    fn to(next: Lifecycle, effects: impl IntoIterator<Item = Effect>) -> Self {
        Self {
            next,
            effects: effects.into_iter().collect(),
        }
    }
}

pub fn plan(event: Event, snap: &Snapshot) -> Plan {
    use Effect::*;
    use Event::*;
    use Lifecycle::*;

    match event {
        ContentBecameExpandable => match snap.phase {
            Collapsed if !snap.pre_dismiss => Plan::to(
                Expanding,
                [StartExpand { from_partial: false }, GateReveal],
            ),
            _ => Plan::stay(snap),
        },

        ContentBecameBare => match snap.phase {
            Expanding | Expanded | ReExpanding => Plan::to(
                Collapsing,
                [
                    SnapshotExpandedDims,
                    ClearRemaining,
                    StartCollapse { pre_dismiss: false },
                    HideBody,
                ],
            ),
            _ => Plan::stay(snap),
        },

        // `Expanded` included: a snapped (reduced-motion) expand finishes
        // before the zero-delay reveal arrives.
        RevealDelayElapsed => match snap.phase {
            Expanding | ReExpanding | Expanded => {
                let mut effects: Effects = [ShowBody].into_iter().collect();
                if !snap.hovered {
                    effects.push(ArmDismissTimer);
                }
                Plan {
                    next: snap.phase,
                    effects,
                }
            }
            _ => Plan::stay(snap),
        },

        ExpandFinished => match snap.phase {
            Expanding | ReExpanding => Plan::to(Expanded, [NotifyHost]),
            _ => Plan::stay(snap),
        },

        DismissTimerFired => match snap.phase {
            // Short display durations can fire the timer while the morph is
            // still settling; the collapse still starts on time.
            Expanding | Expanded | ReExpanding if !snap.hovered => Plan::to(
                Collapsing,
                [
                    SnapshotExpandedDims,
                    ClearRemaining,
                    StartCollapse { pre_dismiss: true },
                    HideBody,
                ],
            ),
            _ => Plan::stay(snap),
        },

        DismissRequested => match snap.phase {
            Collapsed => Plan::to(Collapsed, [ScheduleHostRemoval]),
            Collapsing => Plan::stay(snap),
            _ => Plan::to(
                Collapsing,
                [
                    SnapshotExpandedDims,
                    ClearRemaining,
                    StartCollapse { pre_dismiss: true },
                    HideBody,
                ],
            ),
        },

        CollapseFinished => match snap.phase {
            Collapsing => {
                // The pulse first: recording the collapse end opens the
                // suppression window, which must not swallow this landing.
                let mut effects: Effects =
                    [LandingImpulse, NoteCollapseEnd, NotifyHost].into_iter().collect();
                if snap.pre_dismiss {
                    effects.push(ScheduleHostRemoval);
                }
                if snap.success_override {
                    effects.push(ScheduleSuccessRemoval);
                }
                Plan {
                    next: Collapsed,
                    effects,
                }
            }
            _ => Plan::stay(snap),
        },

        HoverStart => {
            // Hover interrupt: rescue an in-flight or just-finished collapse,
            // but never an optimistic success (its body content is gone).
            let rescuable = matches!(snap.phase, Collapsing)
                || (matches!(snap.phase, Collapsed) && snap.removal_pending);
            if rescuable && snap.expandable && !snap.success_override {
                Plan::to(
                    ReExpanding,
                    [
                        CancelHostRemoval,
                        ClearRemaining,
                        StartExpand { from_partial: true },
                        ShowBody,
                    ],
                )
            } else {
                let mut effects = Effects::new();
                effects.push(CaptureRemaining);
                if snap.removal_pending {
                    effects.push(CancelHostRemoval);
                }
                Plan {
                    next: snap.phase,
                    effects,
                }
            }
        }

        HoverEnd => match snap.phase {
            // Arm as soon as the body is up, even if the morph is still
            // settling; a hover through the reveal otherwise leaves the
            // toast timerless forever.
            Expanding | Expanded | ReExpanding if snap.body_shown => {
                Plan::to(snap.phase, [ArmDismissTimer])
            }
            _ => Plan::stay(snap),
        },

        ActionSucceeded => match snap.phase {
            Expanding | Expanded | ReExpanding => Plan::to(
                Collapsing,
                [
                    SnapshotExpandedDims,
                    ApplySuccessOverride,
                    ClearRemaining,
                    StartCollapse { pre_dismiss: false },
                    HideBody,
                ],
            ),
            _ => Plan::stay(snap),
        },

        PhaseFlippedToError => {
            if matches!(snap.phase, Collapsing) || snap.pre_dismiss {
                Plan::stay(snap)
            } else {
                Plan {
                    next: snap.phase,
                    effects: [Shake].into_iter().collect(),
                }
            }
        }
    }
}
