//! JSON-described views with relative layout.
//!
//! # Conceptual overview
//! A screen is described by a JSON document: a tree of view nodes, each with a name, a kind, some
//! style attributes, and a list of layout operations. Documents are decoded into immutable spec
//! trees, which are then materialized as views and laid out by running their operations.
//!
//! ## Specs
//! Decoding is lenient below the node level: a child that fails to decode is dropped, unknown
//! layout methods are dropped, and arguments that don't fit their method turn into neutral values.
//! Only a node without a name or a valid kind fails, and with it the whole document if it's the
//! root. Specs are shared by `Arc` and never change after decoding.
//!
//! ## Views
//! The factory turns each spec node into a native view description and builds a [`ViewTree`]
//! mirroring the spec tree. Every view keeps its spec and its *container*: the view whose safe-area
//! insets apply to it. The tree records every change as a patch, and a [`Controller`] sends those
//! patches to a [`Backend`](backend::Backend), which owns the views that are actually on screen.
//!
//! ## Layout
//! Layout is performed top-down: a view runs all of its layout operations before any of its
//! subviews do, so subviews always see settled superview geometry. A view's operations are folded
//! in order over its frame in progress; order matters, and later pins win over earlier ones.
//! Relative operations name another view, which is looked up anywhere in the tree containing the
//! view (ancestors, siblings and cousins alike). If no such view exists, the operation does
//! nothing.
//!
//! ## Coordinate System
//! The origin of the top-level coordinate system is at the top left corner of the root view. The
//! y-axis is oriented such that positive y points down. Frames are always in the superview's
//! coordinate system.
pub mod backend;
pub mod color;
pub mod decode;
pub mod factory;
mod host;
pub mod layout;
mod patch;
mod rect;
pub mod spec;
mod tree;
mod view;

pub use backend::{Backend, HeadlessBackend, Measure};
pub use color::Color;
pub use decode::DecodeError;
pub use host::{Controller, HostEvent};
pub use patch::{Patch, PatchError};
pub use rect::{Insets, Rect};
pub use spec::{ControllerSpec, ViewSpec};
pub use tree::ViewTree;
pub use view::{LayerProps, NativeView, ViewId};
