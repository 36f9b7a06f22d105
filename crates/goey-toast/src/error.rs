use thiserror::Error;

/// Failure taxonomy for the engine. None of these propagate to the host
/// stack; every variant is contained at the seam it occurs on.
#[derive(Debug, Error)]
pub enum ToastError {
    /// The caller's action callback returned an error. Swallowed after
    /// logging; the optimistic collapse proceeds regardless.
    #[error("action callback failed: {0}")]
    Action(String),

    /// The per-toast render callback failed; that toast renders nothing.
    #[error("toast content failed to render: {0}")]
    Render(String),

    /// The goey stylesheet marker did not resolve at stack mount.
    #[error("goey styles not found; did you import the stylesheet?")]
    MissingStyles,

    /// A measurement was requested against an unmounted surface.
    #[error("measurement target is not mounted")]
    Unmounted,
}
