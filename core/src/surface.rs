//! Capabilities the controller needs from the rendering side.
//!
//! The browser build implements these over web-sys; tests substitute
//! in-memory fakes that resolve instantly and record what they were asked.

use crate::easing::TransitionTiming;
use crate::entry::ImageEntry;
use crate::geometry::{Shape, TransitionDescriptor, Viewport};
use crate::nav::NavState;

/// Runs one shared-element transition.
#[allow(async_fn_in_trait)]
pub trait TransitionAnimator {
    /// Resolves once the transition is finished or could not run.
    async fn animate(&self, transition: &TransitionDescriptor, timing: &TransitionTiming);
}

#[allow(async_fn_in_trait)]
pub trait PreviewSurface {
    fn show_modal(&self);
    fn mark_closing(&self);
    fn hide_modal(&self);

    fn display(&self, entry: &ImageEntry);
    fn clear_display(&self);
    /// Source currently shown by the preview image, if any.
    fn displayed_src(&self) -> Option<String>;

    fn update_nav(&self, nav: NavState);
    fn set_expanded(&self, index: usize, expanded: bool);

    fn focus_close(&self);
    fn focus_trigger(&self, index: usize);

    fn prefers_reduced_motion(&self) -> bool;
    fn viewport(&self) -> Viewport;

    /// `None` when the trigger is gone from the page.
    fn trigger_shape(&self, index: usize) -> Option<Shape>;

    /// Waits for the preview image to settle (loaded or failed, then one
    /// frame) before measuring it.
    async fn preview_shape(&self) -> Option<Shape>;
}
