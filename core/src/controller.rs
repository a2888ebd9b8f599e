use std::cell::RefCell;

use futures_util::future::{abortable, AbortHandle};

use crate::command::PreviewCommand;
use crate::easing::TransitionTiming;
use crate::entry::ImageEntry;
use crate::geometry::{plan_close, plan_open};
use crate::nav::NavState;
use crate::session::{
    CloseStart, Direction, OpenSettled, PreviewSession, PreviewState, TransitionError,
};
use crate::surface::{PreviewSurface, TransitionAnimator};

/// Owns the preview session for one page and drives the surface and
/// animator through open, navigate and close.
pub struct PreviewController<S, A> {
    entries: Vec<ImageEntry>,
    surface: S,
    animator: A,
    timing: TransitionTiming,
    session: RefCell<PreviewSession>,
    /// Cancels the running open transition when a close is queued.
    open_transition: RefCell<Option<AbortHandle>>,
}

impl<S: PreviewSurface, A: TransitionAnimator> PreviewController<S, A> {
    pub fn new(entries: Vec<ImageEntry>, surface: S, animator: A) -> Self {
        Self::with_timing(entries, surface, animator, TransitionTiming::default())
    }

    pub fn with_timing(
        entries: Vec<ImageEntry>,
        surface: S,
        animator: A,
        timing: TransitionTiming,
    ) -> Self {
        let session = PreviewSession::new(entries.len());
        surface.update_nav(NavState::compute(entries.len(), None));
        Self {
            entries,
            surface,
            animator,
            timing,
            session: RefCell::new(session),
            open_transition: RefCell::new(None),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn state(&self) -> PreviewState {
        self.session.borrow().state()
    }

    pub fn active_index(&self) -> isize {
        self.session.borrow().active_index()
    }

    /// Keyboard commands apply while the modal is up, including during close.
    pub fn accepts_keyboard(&self) -> bool {
        self.state() != PreviewState::Closed
    }

    pub async fn dispatch(&self, command: PreviewCommand) -> Result<(), TransitionError> {
        match command {
            PreviewCommand::Close => self.close().await,
            PreviewCommand::Navigate(direction) => self.navigate(direction).map(|_| ()),
        }
    }

    pub async fn open(&self, index: usize) -> Result<(), TransitionError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(TransitionError::OutOfRange { index, len })?;
        let src = entry
            .src()
            .ok_or(TransitionError::MissingSource { index })?
            .to_string();

        let replaced = self.session.borrow_mut().begin_open(index)?;
        if let Some(previous) = replaced {
            self.surface.set_expanded(previous, false);
        }
        self.surface.show_modal();
        self.surface.display(entry);
        self.surface.update_nav(NavState::compute(len, Some(index)));
        self.surface.set_expanded(index, true);

        let (transition, handle) = abortable(self.run_open_transition(index, &src));
        *self.open_transition.borrow_mut() = Some(handle);
        // Aborted when a close is queued; the modal then dismisses without
        // a closing transition.
        let _ = transition.await;
        self.open_transition.borrow_mut().take();

        let settled = self.session.borrow_mut().finish_open();
        match settled {
            OpenSettled::Idle => self.surface.focus_close(),
            OpenSettled::Closing { .. } => {
                self.surface.mark_closing();
                self.finish_close();
            }
        }
        Ok(())
    }

    /// Entries without a source are skipped: the preview stays where it is.
    pub fn navigate(&self, direction: Direction) -> Result<usize, TransitionError> {
        let target = self.session.borrow().navigation_target(direction)?;
        if self.entries[target].src().is_none() {
            return Err(TransitionError::MissingSource { index: target });
        }
        let (from, to) = self.session.borrow_mut().navigate(direction)?;
        self.surface.display(&self.entries[to]);
        self.surface
            .update_nav(NavState::compute(self.entries.len(), Some(to)));
        self.surface.set_expanded(from, false);
        self.surface.set_expanded(to, true);
        Ok(to)
    }

    pub async fn close(&self) -> Result<(), TransitionError> {
        let index = match self.session.borrow_mut().request_close()? {
            CloseStart::Queued => {
                if let Some(handle) = self.open_transition.borrow_mut().take() {
                    handle.abort();
                }
                return Ok(());
            }
            CloseStart::Started { index } => index,
        };
        self.surface.mark_closing();
        self.run_close_transition(index).await;
        self.finish_close();
        Ok(())
    }

    fn finish_close(&self) {
        let trigger = self.session.borrow_mut().finish_close();
        self.surface.hide_modal();
        self.surface.clear_display();
        self.surface
            .update_nav(NavState::compute(self.entries.len(), None));
        if let Some(trigger) = trigger {
            self.surface.set_expanded(trigger, false);
            self.surface.focus_trigger(trigger);
        }
    }

    async fn run_open_transition(&self, index: usize, src: &str) {
        if self.surface.prefers_reduced_motion() {
            return;
        }
        let Some(source) = self.surface.trigger_shape(index) else {
            return;
        };
        if source.rect.is_degenerate() {
            return;
        }
        let Some(target) = self.surface.preview_shape().await else {
            return;
        };
        if let Some(transition) = plan_open(source, target, src) {
            self.animator.animate(&transition, &self.timing).await;
        }
    }

    async fn run_close_transition(&self, index: usize) {
        if self.surface.prefers_reduced_motion() {
            return;
        }
        let Some(src) = self.surface.displayed_src() else {
            return;
        };
        let Some(preview) = self.surface.preview_shape().await else {
            return;
        };
        let Some(trigger) = self.surface.trigger_shape(index) else {
            return;
        };
        let viewport = self.surface.viewport();
        if let Some(transition) = plan_close(preview, trigger, viewport, &src) {
            self.animator.animate(&transition, &self.timing).await;
        }
    }
}
