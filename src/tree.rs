use crate::patch::Patch;
use crate::rect::{Insets, Rect};
use crate::spec::ViewSpec;
use crate::view::{NativeView, ViewId};
use cgmath::{EuclideanSpace, Vector2, Zero};
use log::trace;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// A node in the view tree.
#[derive(Debug)]
struct TreeNode {
    /// Identifier for name lookups.
    name: String,
    /// The spec this view was built from. The root view has none.
    spec: Option<Arc<ViewSpec>>,
    view: NativeView,
    /// Frame in the superview's coordinate system.
    frame: Rect,
    /// The immediate superview.
    superview: Option<ViewId>,
    /// An ordered list of all subviews.
    subviews: Vec<ViewId>,
    /// The view whose safe area is used for layout; not an ownership relationship.
    container: Option<ViewId>,
    needs_layout: bool,
}

/// A tree of materialized views.
///
/// There is always a root view, whose frame and safe-area insets are set by the host. Views that
/// are built but not (yet) attached to the root form separate trees in the same arena.
#[derive(Debug)]
pub struct ViewTree {
    nodes: HashMap<ViewId, TreeNode>,
    root: ViewId,
    /// Safe-area insets of the root view.
    safe_area: Insets,
    patches: VecDeque<Patch>,
    /// Name index of the root's tree; None if it needs rebuilding.
    names: Option<HashMap<String, ViewId>>,
}

impl ViewTree {
    /// Creates a tree with an empty, unnamed root view.
    pub fn new(size: Vector2<f64>, safe_area: Insets) -> ViewTree {
        let root = ViewId::new();
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            TreeNode {
                name: String::new(),
                spec: None,
                view: NativeView::Layer(Default::default()),
                frame: Rect::new((0., 0.).into(), size),
                superview: None,
                subviews: Vec::new(),
                container: None,
                needs_layout: true,
            },
        );

        let mut patches = VecDeque::new();
        patches.push_back(Patch::Update(root, NativeView::Layer(Default::default())));
        patches.push_back(Patch::Frame(root, Rect::new((0., 0.).into(), size)));
        patches.push_back(Patch::SetRoot(root));

        ViewTree {
            nodes,
            root,
            safe_area,
            patches,
            names: None,
        }
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Returns an iterator over pending patches.
    ///
    /// Does not drain the queue immediately.
    /// Calling `next` will always remove a patch from the queue.
    pub fn patches(&mut self) -> impl Iterator<Item = Patch> + '_ {
        struct PatchIterator<'a>(&'a mut ViewTree);
        impl<'a> Iterator for PatchIterator<'a> {
            type Item = Patch;
            fn next(&mut self) -> Option<Patch> {
                self.0.patches.pop_front()
            }
        }

        PatchIterator(self)
    }

    /// Adds a detached view.
    pub(crate) fn insert(
        &mut self,
        name: &str,
        spec: Option<Arc<ViewSpec>>,
        view: NativeView,
        container: Option<ViewId>,
    ) -> ViewId {
        let id = ViewId::new();
        self.patches.push_back(Patch::Update(id, view.clone()));
        self.nodes.insert(
            id,
            TreeNode {
                name: name.to_string(),
                spec,
                view,
                frame: Rect::zero(),
                superview: None,
                subviews: Vec::new(),
                container,
                needs_layout: true,
            },
        );
        id
    }

    /// Replaces a view's subviews. Subviews that are currently attached elsewhere are moved.
    ///
    /// Views that are no longer subviews stay in the tree, detached.
    pub fn set_subviews(&mut self, id: ViewId, subviews: Vec<ViewId>) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        let subviews: Vec<_> = subviews
            .into_iter()
            .filter(|subview| *subview != id && self.nodes.contains_key(subview))
            .filter(|subview| !self.is_ancestor(*subview, id))
            .collect();

        let previous = match self.nodes.get_mut(&id) {
            Some(node) => std::mem::replace(&mut node.subviews, Vec::new()),
            None => return,
        };
        for old in previous {
            if let Some(node) = self.nodes.get_mut(&old) {
                node.superview = None;
            }
        }

        for subview in &subviews {
            let old_superview = self.nodes.get(subview).and_then(|node| node.superview);
            if let Some(old_superview) = old_superview {
                if let Some(node) = self.nodes.get_mut(&old_superview) {
                    node.subviews.retain(|i| i != subview);
                }
                self.patches.push_back(Patch::Subviews(
                    old_superview,
                    self.nodes[&old_superview].subviews.clone(),
                ));
            }
            if let Some(node) = self.nodes.get_mut(subview) {
                node.superview = Some(id);
            }
        }

        self.patches
            .push_back(Patch::Subviews(id, subviews.clone()));
        if let Some(node) = self.nodes.get_mut(&id) {
            node.subviews = subviews;
            node.needs_layout = true;
        }
        self.names = None;
    }

    /// Removes a view and all of its subviews.
    ///
    /// The root view can't be removed.
    pub fn remove(&mut self, id: ViewId) {
        if id == self.root || !self.nodes.contains_key(&id) {
            return;
        }

        let superview = self.nodes[&id].superview;
        if let Some(superview) = superview {
            if let Some(node) = self.nodes.get_mut(&superview) {
                node.subviews.retain(|i| *i != id);
            }
        }
        self.remove_subtree(id);
        self.patches.push_back(Patch::Remove(id));
        self.names = None;
    }

    fn remove_subtree(&mut self, id: ViewId) {
        if let Some(node) = self.nodes.remove(&id) {
            for subview in node.subviews {
                self.remove_subtree(subview);
            }
        }
    }

    /// Removes all subviews of a view.
    pub fn clear_subviews(&mut self, id: ViewId) {
        let subviews = match self.nodes.get(&id) {
            Some(node) => node.subviews.clone(),
            None => return,
        };
        for subview in subviews {
            self.remove(subview);
        }
        self.patches.push_back(Patch::Subviews(id, Vec::new()));
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.name.as_str())
    }

    pub(crate) fn set_name(&mut self, id: ViewId, name: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.name = name.to_string();
            self.names = None;
        }
    }

    pub fn spec(&self, id: ViewId) -> Option<&Arc<ViewSpec>> {
        self.nodes.get(&id).and_then(|node| node.spec.as_ref())
    }

    pub fn view(&self, id: ViewId) -> Option<&NativeView> {
        self.nodes.get(&id).map(|node| &node.view)
    }

    pub(crate) fn set_view(&mut self, id: ViewId, view: NativeView) {
        if let Some(node) = self.nodes.get_mut(&id) {
            self.patches.push_back(Patch::Update(id, view.clone()));
            node.view = view;
        }
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|node| node.superview)
    }

    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        match self.nodes.get(&id) {
            Some(node) => &node.subviews,
            None => &[],
        }
    }

    pub fn container(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|node| node.container)
    }

    /// A view's frame in its superview's coordinate system.
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.frame)
    }

    /// Sets a view's frame.
    ///
    /// If the size changes, the view needs layout again.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.frame == frame {
                return;
            }
            trace!("{:?} ({}) frame {:?}", id, node.name, frame);
            if node.frame.size != frame.size {
                node.needs_layout = true;
            }
            node.frame = frame;
            self.patches.push_back(Patch::Frame(id, frame));
        }
    }

    /// A view's frame in the coordinate system of its outermost ancestor.
    pub fn absolute_frame(&self, id: ViewId) -> Option<Rect> {
        let mut frame = self.frame(id)?;
        let mut current = self.superview(id);
        while let Some(superview) = current {
            let node = &self.nodes[&superview];
            frame = frame + node.frame.origin.to_vec();
            current = node.superview;
        }
        Some(frame)
    }

    /// Resizes the root view and sets its safe-area insets.
    pub fn set_root_bounds(&mut self, size: Vector2<f64>, safe_area: Insets) {
        self.safe_area = safe_area;
        self.set_frame(self.root, Rect::new((0., 0.).into(), size));
        self.set_needs_layout(self.root);
    }

    /// The part of the root's safe-area insets that overlaps a view.
    ///
    /// Views outside the root's tree have no safe area.
    pub fn safe_area(&self, id: ViewId) -> Insets {
        if id == self.root {
            return self.safe_area;
        }
        if self.outermost_ancestor(id) != Some(self.root) {
            return Insets::zero();
        }
        let frame = match self.absolute_frame(id) {
            Some(frame) => frame,
            None => return Insets::zero(),
        };
        let bounds = self.nodes[&self.root].frame;
        let safe = self.safe_area;

        Insets {
            top: (safe.top - frame.min_y()).max(0.),
            left: (safe.left - frame.min_x()).max(0.),
            bottom: (frame.max_y() - (bounds.size.y - safe.bottom)).max(0.),
            right: (frame.max_x() - (bounds.size.x - safe.right)).max(0.),
        }
    }

    pub fn needs_layout(&self, id: ViewId) -> bool {
        self.nodes.get(&id).map_or(false, |node| node.needs_layout)
    }

    pub fn set_needs_layout(&mut self, id: ViewId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.needs_layout = true;
        }
    }

    pub(crate) fn clear_needs_layout(&mut self, id: ViewId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.needs_layout = false;
        }
    }

    /// Follows superview links to the top.
    fn outermost_ancestor(&self, id: ViewId) -> Option<ViewId> {
        let mut current = id;
        if !self.nodes.contains_key(&current) {
            return None;
        }
        while let Some(superview) = self.superview(current) {
            current = superview;
        }
        Some(current)
    }

    fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = self.superview(id);
        while let Some(view) = current {
            if view == ancestor {
                return true;
            }
            current = self.superview(view);
        }
        false
    }

    /// Finds a view by name anywhere in the tree containing `from`.
    ///
    /// Ascends to the outermost ancestor and searches its subtree depth first, so ancestors,
    /// siblings and cousins can all be found. With duplicate names the first view in depth-first
    /// preorder wins.
    pub fn resolve(&self, from: ViewId, name: &str) -> Option<ViewId> {
        let top = self.outermost_ancestor(from)?;
        match &self.names {
            Some(names) if top == self.root => names.get(name).copied(),
            _ => self.find(top, name),
        }
    }

    /// Depth-first preorder search of a subtree.
    fn find(&self, id: ViewId, name: &str) -> Option<ViewId> {
        let node = self.nodes.get(&id)?;
        if node.name == name {
            return Some(id);
        }
        node.subviews
            .iter()
            .filter_map(|subview| self.find(*subview, name))
            .next()
    }

    /// Rebuilds the name index of the root's tree if views were added, removed or renamed.
    pub fn index_names(&mut self) {
        if self.names.is_some() {
            return;
        }
        let mut names = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[&id];
            names.entry(node.name.clone()).or_insert(id);
            stack.extend(node.subviews.iter().rev());
        }
        self.names = Some(names);
    }

    /// Size of a view's bounds; zero for unknown views.
    pub fn bounds_size(&self, id: ViewId) -> Vector2<f64> {
        self.frame(id).map_or(Vector2::zero(), |frame| frame.size)
    }
}
