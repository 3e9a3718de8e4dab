use crate::backend::Backend;
use crate::factory;
use crate::layout;
use crate::patch::{Patch, PatchError};
use crate::rect::Insets;
use crate::spec::ControllerSpec;
use crate::tree::ViewTree;
use crate::view::ViewId;
use cgmath::Vector2;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use log::{debug, warn};
use std::collections::HashMap;

/// Events from the host's UI loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The root view was resized or its safe area changed.
    Resize {
        size: Vector2<f64>,
        safe_area: Insets,
    },
    /// Something outside the tree changed; lay everything out again.
    SetNeedsLayout,
}

/// A backend view and the views it was last given as subviews.
struct NativeNode<R> {
    view: R,
    subviews: Vec<ViewId>,
}

/// Shows a screen described by a [`ControllerSpec`] using a backend.
///
/// The view tree is only rendered when patches are flushed, which happens after
/// [`setup`](Controller::setup) and every layout pass.
pub struct Controller<B: Backend> {
    tree: ViewTree,
    backend: B,
    views: HashMap<ViewId, NativeNode<B::ViewRef>>,
    event_sender: Sender<HostEvent>,
    event_recv: Receiver<HostEvent>,
}

impl<B: Backend> Controller<B> {
    /// Creates a controller with an empty root view.
    pub fn new(backend: B, size: Vector2<f64>, safe_area: Insets) -> Controller<B> {
        let (event_sender, event_recv) = channel::unbounded();

        Controller {
            tree: ViewTree::new(size, safe_area),
            backend,
            views: HashMap::new(),
            event_sender,
            event_recv,
        }
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a sender for host events. Events are applied in [`poll`](Controller::poll).
    pub fn event_sender(&self) -> Sender<HostEvent> {
        self.event_sender.clone()
    }

    /// Replaces the screen's contents.
    ///
    /// The root view takes the container's name and style, and the container's subviews are built
    /// under it. Layout happens in the next layout pass.
    pub fn setup(&mut self, spec: &ControllerSpec) -> Result<(), PatchError<B::Error>> {
        debug!("setting up {:?}", spec.name);
        let root = self.tree.root();
        self.tree.clear_subviews(root);

        let container = &spec.container;
        self.tree.set_name(root, &container.name);
        self.tree.set_view(root, factory::make_view(container));

        let subviews = container
            .children
            .iter()
            .map(|child| factory::build(&mut self.tree, child, Some(root)))
            .collect();
        self.tree.set_subviews(root, subviews);
        self.tree.set_needs_layout(root);

        self.flush()
    }

    /// Runs a layout pass if any view needs it and flushes the result.
    pub fn layout_if_needed(&mut self) -> Result<(), PatchError<B::Error>> {
        layout::layout_if_needed(&mut self.tree, &self.backend);
        self.flush()
    }

    /// Applies all pending host events, then runs a layout pass.
    pub fn poll(&mut self) -> Result<(), PatchError<B::Error>> {
        loop {
            match self.event_recv.try_recv() {
                Ok(event) => self.handle_event(event),
                // the controller holds a sender, so this is only ever Empty
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.layout_if_needed()
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize { size, safe_area } => self.tree.set_root_bounds(size, safe_area),
            HostEvent::SetNeedsLayout => {
                let root = self.tree.root();
                self.tree.set_needs_layout(root);
            }
        }
    }

    /// Sends all pending patches to the backend.
    ///
    /// Stops at the first failing patch.
    pub fn flush(&mut self) -> Result<(), PatchError<B::Error>> {
        let patches: Vec<_> = self.tree.patches().collect();
        for patch in patches {
            if let Err(err) = self.apply(patch) {
                warn!("failed to apply patch: {:?}", err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn apply(&mut self, patch: Patch) -> Result<(), PatchError<B::Error>> {
        match patch {
            Patch::Update(id, props) => match self.views.get_mut(&id) {
                Some(node) => self
                    .backend
                    .update_view(&mut node.view, &props)
                    .map_err(PatchError::Backend)?,
                None => {
                    let view = self.backend.new_view(&props).map_err(PatchError::Backend)?;
                    self.views.insert(
                        id,
                        NativeNode {
                            view,
                            subviews: Vec::new(),
                        },
                    );
                }
            },
            Patch::Frame(id, frame) => {
                let node = self.views.get_mut(&id).ok_or(PatchError::NoSuchView(id))?;
                self.backend
                    .set_frame(&mut node.view, frame)
                    .map_err(PatchError::Backend)?;
            }
            Patch::Subviews(id, subviews) => {
                if let Some(missing) = subviews.iter().find(|i| !self.views.contains_key(*i)) {
                    return Err(PatchError::NoSuchView(*missing));
                }
                let mut node = self.views.remove(&id).ok_or(PatchError::NoSuchView(id))?;
                let views = &self.views;
                let refs = subviews
                    .iter()
                    .filter_map(|subview| views.get(subview))
                    .map(|subview| &subview.view)
                    .collect();
                let result = self.backend.set_subviews(&mut node.view, refs);
                node.subviews = subviews;
                self.views.insert(id, node);
                result.map_err(PatchError::Backend)?;
            }
            Patch::SetRoot(id) => {
                let node = self.views.get_mut(&id).ok_or(PatchError::NoSuchView(id))?;
                self.backend
                    .set_root_view(&mut node.view)
                    .map_err(PatchError::Backend)?;
            }
            Patch::Remove(id) => {
                let node = self.views.remove(&id).ok_or(PatchError::NoSuchView(id))?;
                self.forget_subviews(&node.subviews);
                self.backend
                    .remove_view(node.view)
                    .map_err(PatchError::Backend)?;
            }
        }
        Ok(())
    }

    /// Drops refs of subviews; the backend destroys them along with their superview.
    fn forget_subviews(&mut self, subviews: &[ViewId]) {
        for subview in subviews {
            if let Some(node) = self.views.remove(subview) {
                self.forget_subviews(&node.subviews);
            }
        }
    }
}
