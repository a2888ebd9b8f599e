use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Previous => f.write_str("previous"),
            Direction::Next => f.write_str("next"),
        }
    }
}

/// Where an open preview is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenPhase {
    /// The open transition is still running.
    Opening { close_queued: bool },
    Settled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Closed,
    Open {
        index: usize,
        phase: OpenPhase,
    },
    Closing {
        index: usize,
    },
}

impl PreviewState {
    pub fn index(&self) -> Option<usize> {
        match self {
            PreviewState::Closed => None,
            PreviewState::Open { index, .. } | PreviewState::Closing { index } => Some(*index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("image {index} is out of range ({len} images)")]
    OutOfRange { index: usize, len: usize },
    #[error("image {index} has no source")]
    MissingSource { index: usize },
    #[error("preview is closing")]
    Closing,
    #[error("preview is not open")]
    NotOpen,
    #[error("a preview transition is still running")]
    Busy,
    #[error("no {0} image")]
    Boundary(Direction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenSettled {
    Idle,
    /// A close arrived while opening; the session is already `Closing`.
    Closing { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseStart {
    /// Close deferred until the running open transition settles.
    Queued,
    Started { index: usize },
}

/// Per-page preview lifecycle. Only the controller mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewSession {
    state: PreviewState,
    len: usize,
    trigger: Option<usize>,
}

impl PreviewSession {
    pub fn new(len: usize) -> Self {
        Self {
            state: PreviewState::Closed,
            len,
            trigger: None,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `-1` while closed.
    pub fn active_index(&self) -> isize {
        self.state.index().map_or(-1, |index| index as isize)
    }

    pub fn trigger(&self) -> Option<usize> {
        self.trigger
    }

    /// Closed -> Open, or Open -> Open for a different trigger.
    pub fn begin_open(&mut self, index: usize) -> Result<Option<usize>, TransitionError> {
        match self.state {
            PreviewState::Closing { .. } => return Err(TransitionError::Closing),
            PreviewState::Open {
                phase: OpenPhase::Opening { .. },
                ..
            } => return Err(TransitionError::Busy),
            _ => {}
        }
        if index >= self.len {
            return Err(TransitionError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let previous = self.trigger.replace(index);
        self.state = PreviewState::Open {
            index,
            phase: OpenPhase::Opening {
                close_queued: false,
            },
        };
        Ok(previous.filter(|prev| *prev != index))
    }

    /// Ends the open transition. A queued close moves straight to `Closing`.
    pub fn finish_open(&mut self) -> OpenSettled {
        let PreviewState::Open {
            index,
            phase: OpenPhase::Opening { close_queued },
        } = self.state
        else {
            return OpenSettled::Idle;
        };
        if close_queued {
            self.state = PreviewState::Closing { index };
            OpenSettled::Closing { index }
        } else {
            self.state = PreviewState::Open {
                index,
                phase: OpenPhase::Settled,
            };
            OpenSettled::Idle
        }
    }

    /// The index one step away, without moving there.
    pub fn navigation_target(&self, direction: Direction) -> Result<usize, TransitionError> {
        let index = match self.state {
            PreviewState::Open {
                index,
                phase: OpenPhase::Settled,
            } => index,
            PreviewState::Open { .. } => return Err(TransitionError::Busy),
            PreviewState::Closing { .. } => return Err(TransitionError::Closing),
            PreviewState::Closed => return Err(TransitionError::NotOpen),
        };
        match direction {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => Some(index + 1).filter(|next| *next < self.len),
        }
        .ok_or(TransitionError::Boundary(direction))
    }

    /// Moves one step without wrapping. Returns `(from, to)`.
    pub fn navigate(&mut self, direction: Direction) -> Result<(usize, usize), TransitionError> {
        let target = self.navigation_target(direction)?;
        let from = self.state.index().unwrap_or(target);
        self.state = PreviewState::Open {
            index: target,
            phase: OpenPhase::Settled,
        };
        self.trigger = Some(target);
        Ok((from, target))
    }

    pub fn request_close(&mut self) -> Result<CloseStart, TransitionError> {
        match self.state {
            PreviewState::Closed => Err(TransitionError::NotOpen),
            PreviewState::Closing { .. } => Err(TransitionError::Closing),
            PreviewState::Open {
                phase: OpenPhase::Opening { close_queued: true },
                ..
            } => Err(TransitionError::Busy),
            PreviewState::Open {
                index,
                phase: OpenPhase::Opening { close_queued: false },
            } => {
                self.state = PreviewState::Open {
                    index,
                    phase: OpenPhase::Opening { close_queued: true },
                };
                Ok(CloseStart::Queued)
            }
            PreviewState::Open {
                index,
                phase: OpenPhase::Settled,
            } => {
                self.state = PreviewState::Closing { index };
                Ok(CloseStart::Started { index })
            }
        }
    }

    /// Closing -> Closed. Returns the trigger that should get focus back.
    pub fn finish_close(&mut self) -> Option<usize> {
        self.state = PreviewState::Closed;
        self.trigger.take()
    }
}
