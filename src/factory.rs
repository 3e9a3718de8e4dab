//! Materializes spec trees as views.

use crate::spec::{LabelAttributes, ViewKind, ViewSpec};
use crate::tree::ViewTree;
use crate::view::{LayerProps, NativeView, ViewId};
use std::sync::Arc;

/// Builds a view and all of its subviews from a spec.
///
/// The new view is detached; the caller attaches it. Subviews use the new view as their layout
/// container.
pub fn build(tree: &mut ViewTree, spec: &Arc<ViewSpec>, container: Option<ViewId>) -> ViewId {
    let id = tree.insert(&spec.name, Some(Arc::clone(spec)), make_view(spec), container);

    let subviews = spec
        .children
        .iter()
        .map(|child| build(tree, child, Some(id)))
        .collect();
    tree.set_subviews(id, subviews);
    id
}

/// Creates the native view for a spec, without subviews.
pub fn make_view(spec: &ViewSpec) -> NativeView {
    match &spec.kind {
        ViewKind::Plain => make_plain(spec),
        ViewKind::Label(label) => make_label(spec, label),
    }
}

fn make_plain(spec: &ViewSpec) -> NativeView {
    NativeView::Layer(LayerProps::from_style(&spec.style))
}

fn make_label(spec: &ViewSpec, label: &LabelAttributes) -> NativeView {
    NativeView::text(&spec.style, label)
}
