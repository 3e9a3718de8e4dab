//! Traits for backends.

use crate::rect::Rect;
use crate::spec::Font;
use crate::view::NativeView;
use cgmath::Vector2;
use parking_lot::Mutex;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Intrinsic content sizes, used by the size-to-fit layout methods.
pub trait Measure {
    /// Returns the size the view would like to have within the proposed size.
    ///
    /// Proposed dimensions may be infinite to mean "unconstrained".
    fn size_that_fits(&self, view: &NativeView, current: Vector2<f64>, proposal: Vector2<f64>)
        -> Vector2<f64>;
}

/// A backend implementation.
///
/// Backends are platform UI frameworks that own the actual on-screen views.
pub trait Backend: Measure {
    /// A reference to a view in the backend.
    type ViewRef;

    /// Error type.
    type Error: fmt::Debug;

    /// Creates a new view.
    fn new_view(&mut self, view: &NativeView) -> Result<Self::ViewRef, Self::Error>;

    /// Updates the view's properties.
    fn update_view(&mut self, view: &mut Self::ViewRef, props: &NativeView)
        -> Result<(), Self::Error>;

    /// Sets the view's frame, in its superview's coordinate system.
    fn set_frame(&mut self, view: &mut Self::ViewRef, frame: Rect) -> Result<(), Self::Error>;

    /// Sets the view's subviews, in order.
    fn set_subviews(
        &mut self,
        view: &mut Self::ViewRef,
        subviews: Vec<&Self::ViewRef>,
    ) -> Result<(), Self::Error>;

    /// Makes the view the content of the window or screen.
    fn set_root_view(&mut self, view: &mut Self::ViewRef) -> Result<(), Self::Error>;

    /// Removes the view from its superview and destroys it.
    fn remove_view(&mut self, view: Self::ViewRef) -> Result<(), Self::Error>;
}

/// Approximate text metrics, as multiples of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average advance of one character.
    pub char_width: f64,
    /// Distance between two baselines.
    pub line_height: f64,
    /// Font size of labels without a font.
    pub default_font_size: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        TextMetrics {
            char_width: 0.5,
            line_height: 1.2,
            default_font_size: 17.,
        }
    }
}

impl Measure for TextMetrics {
    /// Lays text out in lines of equal-width characters, wrapping at the proposed width.
    /// Other views keep their current size.
    fn size_that_fits(
        &self,
        view: &NativeView,
        current: Vector2<f64>,
        proposal: Vector2<f64>,
    ) -> Vector2<f64> {
        let (text, font) = match view {
            NativeView::Text { text, font, .. } => (text, font),
            NativeView::Layer(_) => return current,
        };
        let size = font.as_ref().map_or(self.default_font_size, |f: &Font| f.size);
        let line_height = (size * self.line_height).ceil();
        if text.is_empty() {
            return Vector2::new(0., 0.);
        }

        let char_width = size * self.char_width;
        let line_width = text.chars().count() as f64 * char_width;
        let max_width = if proposal.x > 0. { proposal.x } else { f64::INFINITY };
        if line_width <= max_width {
            return Vector2::new(line_width.ceil(), line_height);
        }

        let chars_per_line = (max_width / char_width).floor().max(1.);
        let lines = (text.chars().count() as f64 / chars_per_line).ceil();
        Vector2::new(
            (chars_per_line * char_width).min(max_width).ceil(),
            lines * line_height,
        )
    }
}

/// A view in a [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessView {
    pub props: NativeView,
    pub frame: Rect,
    pub subviews: Vec<usize>,
    pub superview: Option<usize>,
}

/// Everything a [`HeadlessBackend`] currently displays.
#[derive(Debug, Default)]
pub struct HeadlessState {
    /// Views by ref; removed views leave a hole.
    pub views: Vec<Option<HeadlessView>>,
    pub root: Option<usize>,
}

impl HeadlessState {
    pub fn view(&self, view: usize) -> Option<&HeadlessView> {
        self.views.get(view).and_then(Option::as_ref)
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.views.iter().filter(|view| view.is_some()).count()
    }

    fn remove(&mut self, view: usize) {
        let removed = match self.views.get_mut(view).and_then(Option::take) {
            Some(removed) => removed,
            None => return,
        };
        if let Some(superview) = removed.superview {
            if let Some(Some(superview)) = self.views.get_mut(superview) {
                superview.subviews.retain(|i| *i != view);
            }
        }
        for subview in removed.subviews {
            self.remove(subview);
        }
    }
}

/// A backend without a screen; keeps views in memory.
///
/// Clones share the same state, so one clone can be given to a
/// [`Controller`](crate::Controller) while another is used to inspect the result.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
    metrics: TextMetrics,
}

impl HeadlessBackend {
    pub fn new() -> HeadlessBackend {
        HeadlessBackend::default()
    }

    pub fn with_metrics(metrics: TextMetrics) -> HeadlessBackend {
        HeadlessBackend {
            state: Default::default(),
            metrics,
        }
    }

    /// Runs a closure with the current state.
    pub fn inspect<T>(&self, f: impl FnOnce(&HeadlessState) -> T) -> T {
        f(&self.state.lock())
    }
}

impl Measure for HeadlessBackend {
    fn size_that_fits(
        &self,
        view: &NativeView,
        current: Vector2<f64>,
        proposal: Vector2<f64>,
    ) -> Vector2<f64> {
        self.metrics.size_that_fits(view, current, proposal)
    }
}

impl Backend for HeadlessBackend {
    type ViewRef = usize;
    type Error = Infallible;

    fn new_view(&mut self, view: &NativeView) -> Result<usize, Infallible> {
        let mut state = self.state.lock();
        state.views.push(Some(HeadlessView {
            props: view.clone(),
            frame: Rect::zero(),
            subviews: Vec::new(),
            superview: None,
        }));
        Ok(state.views.len() - 1)
    }

    fn update_view(&mut self, view: &mut usize, props: &NativeView) -> Result<(), Infallible> {
        if let Some(Some(view)) = self.state.lock().views.get_mut(*view) {
            view.props = props.clone();
        }
        Ok(())
    }

    fn set_frame(&mut self, view: &mut usize, frame: Rect) -> Result<(), Infallible> {
        if let Some(Some(view)) = self.state.lock().views.get_mut(*view) {
            view.frame = frame;
        }
        Ok(())
    }

    fn set_subviews(&mut self, view: &mut usize, subviews: Vec<&usize>) -> Result<(), Infallible> {
        let mut state = self.state.lock();
        let subviews: Vec<usize> = subviews.into_iter().copied().collect();

        let previous = match state.views.get_mut(*view) {
            Some(Some(node)) => std::mem::replace(&mut node.subviews, subviews.clone()),
            _ => return Ok(()),
        };
        for old in previous {
            if let Some(Some(node)) = state.views.get_mut(old) {
                node.superview = None;
            }
        }
        for subview in subviews {
            if let Some(Some(node)) = state.views.get_mut(subview) {
                node.superview = Some(*view);
            }
        }
        Ok(())
    }

    fn set_root_view(&mut self, view: &mut usize) -> Result<(), Infallible> {
        self.state.lock().root = Some(*view);
        Ok(())
    }

    fn remove_view(&mut self, view: usize) -> Result<(), Infallible> {
        self.state.lock().remove(view);
        Ok(())
    }
}
