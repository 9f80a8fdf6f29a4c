#![forbid(unsafe_code)]

//! Errors surfaced to callers of the drag controller.
//!
//! Only misuse is an error. A drop that resolves nowhere, a malformed pointer
//! sample, or a missing zone are ordinary outcomes and surface as
//! [`DragEvent`](crate::event::DragEvent)s instead.

use std::fmt;

use crate::controller::SessionId;
use crate::model::EntryId;

/// Why a drag could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Another pointer drag is still in the `Dragging` state.
    AlreadyDragging { active: SessionId },
    /// The entry's previous session is still settling or cancelling.
    EntryBusy { entry: EntryId, session: SessionId },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging { active } => {
                write!(f, "a drag is already in progress (session {active})")
            }
            Self::EntryBusy { entry, session } => write!(
                f,
                "entry {entry} is still finishing a previous drag (session {session})"
            ),
        }
    }
}

impl std::error::Error for SessionError {}
