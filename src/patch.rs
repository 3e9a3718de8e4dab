//! Patches from the view tree to a backend.

use crate::rect::Rect;
use crate::view::{NativeView, ViewId};

/// A change to the native view hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Sets the root view.
    SetRoot(ViewId),
    /// Updates or creates a view.
    Update(ViewId, NativeView),
    /// Sets a view's frame, in its superview's coordinate system.
    Frame(ViewId, Rect),
    /// Sets a view's subviews, in order.
    Subviews(ViewId, Vec<ViewId>),
    /// Removes a view and all of its subviews.
    Remove(ViewId),
}

/// Errors that may occur when applying a patch.
#[derive(Debug, thiserror::Error)]
pub enum PatchError<E> {
    #[error("no such view: {0:?}")]
    NoSuchView(ViewId),

    #[error("backend error: {0}")]
    Backend(E),
}
