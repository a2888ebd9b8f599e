//! Platform-free core of the blog image preview: session state machine,
//! transition geometry and easing, and the controller that drives a
//! rendering surface through them.

pub mod command;
pub mod controller;
pub mod easing;
pub mod entry;
pub mod geometry;
pub mod nav;
pub mod session;
pub mod surface;

pub use command::{click_command, is_trigger_activation_key, key_command, ClickTarget, PreviewCommand};
pub use controller::PreviewController;
pub use easing::{CubicBezier, TransitionTiming, PREVIEW_EASING, PREVIEW_TRANSITION_MS};
pub use entry::ImageEntry;
pub use geometry::{
    plan_close, plan_open, CornerRadius, Rect, Shape, TransitionDescriptor, TransitionFrame,
    Viewport,
};
pub use nav::NavState;
pub use session::{Direction, OpenPhase, PreviewSession, PreviewState, TransitionError};
pub use surface::{PreviewSurface, TransitionAnimator};
