//! The layout engine.
//!
//! A view's layout operations are folded, in order, over a [`Pin`]: the view's frame in progress.
//! Every operation reads the pin and returns a new one, so the same operations in a different
//! order may produce a different frame. Operations that can't be carried out (an argument that
//! doesn't fit the method, a target that doesn't exist) leave the pin as it is.
//!
//! All coordinates are in the superview's coordinate system, and edge insets are measured from
//! the superview's bounds.

use crate::backend::Measure;
use crate::rect::{Insets, Rect};
use crate::spec::{Argument, HorizontalAlign, LayoutMethod, LayoutOp, VerticalAlign};
use crate::tree::ViewTree;
use crate::view::ViewId;
use cgmath::{EuclideanSpace, Vector2, Zero};
use log::{debug, trace};

/// What layout operations can see of the world outside the view.
pub trait LayoutEnv {
    /// Safe-area insets of the layout container.
    fn safe_area(&self) -> Insets;

    /// Frame of the view with the given name, in the laid-out view's superview coordinates.
    fn target_frame(&self, name: &str) -> Option<Rect>;

    /// Size the view would like to have within the proposal. See [`Measure`].
    fn size_that_fits(&self, current: Vector2<f64>, proposal: Vector2<f64>) -> Vector2<f64>;
}

/// Pins along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct AxisPin {
    /// Leading edge (left or top).
    min: Option<f64>,
    /// Trailing edge (right or bottom).
    max: Option<f64>,
    length: Option<f64>,
}

impl AxisPin {
    // the latest pin wins: an axis never holds both edges and a length

    fn set_min(&mut self, min: f64) {
        self.min = Some(min);
        if self.max.is_some() {
            self.length = None;
        }
    }

    fn set_max(&mut self, max: f64) {
        self.max = Some(max);
        if self.min.is_some() {
            self.length = None;
        }
    }

    fn set_length(&mut self, length: f64) {
        self.length = Some(length.max(0.));
        if self.min.is_some() {
            self.max = None;
        }
    }

    /// Fixes origin and length, dropping all other pins.
    fn place(&mut self, origin: f64, length: f64) {
        *self = AxisPin {
            min: Some(origin),
            max: None,
            length: Some(length),
        };
    }

    /// Returns `(origin, length)`, falling back to the base frame for anything unpinned.
    fn resolve(&self, base_origin: f64, base_length: f64) -> (f64, f64) {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min, (max - min).max(0.)),
            (Some(min), None) => (min, self.length.unwrap_or(base_length)),
            (None, Some(max)) => {
                let length = self.length.unwrap_or(base_length);
                (max - length, length)
            }
            (None, None) => (base_origin, self.length.unwrap_or(base_length)),
        }
    }
}

/// A view's frame in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    /// Size of the superview's bounds.
    bounds: Vector2<f64>,
    /// The frame before any pins.
    base: Rect,
    /// Where `marginTop` measures from while the top edge is unpinned.
    top: f64,
    horizontal: AxisPin,
    vertical: AxisPin,
}

impl Pin {
    /// Starts from a frame, with nothing pinned.
    pub fn new(bounds: Vector2<f64>, base: Rect) -> Pin {
        Pin {
            bounds,
            base,
            top: 0.,
            horizontal: AxisPin::default(),
            vertical: AxisPin::default(),
        }
    }

    /// The frame described by the pin.
    pub fn frame(&self) -> Rect {
        let (x, width) = self
            .horizontal
            .resolve(self.base.origin.x, self.base.size.x);
        let (y, height) = self
            .vertical
            .resolve(self.base.origin.y, self.base.size.y);
        Rect::from_xywh(x, y, width, height)
    }

    /// Applies one operation.
    pub fn apply(self, op: &LayoutOp, env: &dyn LayoutEnv) -> Pin {
        match self.try_apply(op, env) {
            Some(pin) => pin,
            None => {
                debug!("skipping {:?} with {:?}", op.method, op.argument);
                self
            }
        }
    }

    /// Applies operations left to right.
    pub fn apply_all<'a>(self, ops: impl IntoIterator<Item = &'a LayoutOp>, env: &dyn LayoutEnv) -> Pin {
        ops.into_iter().fold(self, |pin, op| pin.apply(op, env))
    }

    fn try_apply(mut self, op: &LayoutOp, env: &dyn LayoutEnv) -> Option<Pin> {
        use LayoutMethod::*;

        let bounds = self.bounds;
        let frame = self.frame();

        match op.method {
            Size => {
                let size = length(&op.argument)?;
                self.horizontal.set_length(size);
                self.vertical.set_length(size);
            }
            Width => self.horizontal.set_length(length(&op.argument)?),
            Height => self.vertical.set_length(length(&op.argument)?),

            Top => self.vertical.set_min(insets(&op.argument, env)?.top),
            Bottom => self
                .vertical
                .set_max(bounds.y - insets(&op.argument, env)?.bottom),
            Vertically => {
                let insets = insets(&op.argument, env)?;
                self.vertical.set_min(insets.top);
                self.vertical.set_max(bounds.y - insets.bottom);
            }

            Start => self.horizontal.set_min(insets(&op.argument, env)?.left),
            End => self
                .horizontal
                .set_max(bounds.x - insets(&op.argument, env)?.right),
            Horizontally => {
                let insets = insets(&op.argument, env)?;
                self.horizontal.set_min(insets.left);
                self.horizontal.set_max(bounds.x - insets.right);
            }

            MarginTop => {
                let margin = insets(&op.argument, env)?.top;
                let top = self.vertical.min.unwrap_or(self.top);
                self.vertical.set_min(top + margin);
            }

            After | Before => {
                let (target, margin, align) = match &op.argument {
                    Argument::NamedAnchor {
                        target,
                        margin,
                        vertical,
                        ..
                    } => (target, *margin, *vertical),
                    _ => return None,
                };
                let target = env.target_frame(target)?;

                if op.method == After {
                    self.horizontal.set_min(target.max_x() + margin);
                } else {
                    self.horizontal.set_max(target.min_x() - margin);
                }
                match align {
                    Some(VerticalAlign::Top) => self.vertical.set_min(target.min_y()),
                    Some(VerticalAlign::Bottom) => self.vertical.set_max(target.max_y()),
                    Some(VerticalAlign::Center) => self.vertical.place(
                        target.center().y - frame.size.y / 2.,
                        frame.size.y,
                    ),
                    None => (),
                }
            }

            Above | Below => {
                let (target, margin, align) = match &op.argument {
                    Argument::NamedAnchor {
                        target,
                        margin,
                        horizontal,
                        ..
                    } => (target, *margin, *horizontal),
                    _ => return None,
                };
                let target = env.target_frame(target)?;

                if op.method == Above {
                    self.vertical.set_max(target.min_y() - margin);
                } else {
                    self.vertical.set_min(target.max_y() + margin);
                }
                match align {
                    Some(HorizontalAlign::Left) | Some(HorizontalAlign::Start) => {
                        self.horizontal.set_min(target.min_x())
                    }
                    Some(HorizontalAlign::Right) | Some(HorizontalAlign::End) => {
                        self.horizontal.set_max(target.max_x())
                    }
                    Some(HorizontalAlign::Center) => self.horizontal.place(
                        target.center().x - frame.size.x / 2.,
                        frame.size.x,
                    ),
                    None => (),
                }
            }

            SizeToFit => {
                let fit = env.size_that_fits(frame.size, Vector2::new(f64::INFINITY, f64::INFINITY));
                self.horizontal.set_length(fit.x);
                self.vertical.set_length(fit.y);
            }
            SizeToFitWidth => {
                let fit = env.size_that_fits(frame.size, Vector2::new(frame.size.x, f64::INFINITY));
                self.vertical.set_length(fit.y);
            }
            SizeToFitHeight => {
                let fit = env.size_that_fits(frame.size, Vector2::new(f64::INFINITY, frame.size.y));
                self.horizontal.set_length(fit.x);
            }

            VCenterTo | HCenterTo => {
                let (target, margin) = match &op.argument {
                    Argument::CenterAnchor { target, margin } => (target, *margin),
                    _ => return None,
                };
                let center = env.target_frame(target)?.center();

                if op.method == VCenterTo {
                    self.vertical
                        .place(center.y - frame.size.y / 2. + margin, frame.size.y);
                } else {
                    self.horizontal
                        .place(center.x - frame.size.x / 2. + margin, frame.size.x);
                }
            }

            VCenter => {
                let margin = constant(&op.argument)?;
                self.vertical
                    .place((bounds.y - frame.size.y) / 2. + margin, frame.size.y);
            }
            HCenter => {
                let margin = constant(&op.argument)?;
                self.horizontal
                    .place((bounds.x - frame.size.x) / 2. + margin, frame.size.x);
            }

            All => {
                let margin = constant(&op.argument)?;
                self.horizontal.set_min(margin);
                self.horizontal.set_max(bounds.x - margin);
                self.vertical.set_min(margin);
                self.vertical.set_max(bounds.y - margin);
            }
            Center => {
                let margin = constant(&op.argument)?;
                self.horizontal
                    .place((bounds.x - frame.size.x) / 2. + margin, frame.size.x);
                self.vertical
                    .place((bounds.y - frame.size.y) / 2. + margin, frame.size.y);
            }

            // the caller commits the frame; the pin restarts from it
            Update => {
                return Some(Pin {
                    top: frame.min_y(),
                    ..Pin::new(bounds, frame)
                })
            }
        }

        Some(self)
    }
}

fn constant(argument: &Argument) -> Option<f64> {
    match argument {
        Argument::Constant(value) => Some(*value),
        _ => None,
    }
}

/// Sizes have no safe-area counterpart; the sentinel counts as zero.
fn length(argument: &Argument) -> Option<f64> {
    match argument {
        Argument::Constant(value) => Some(*value),
        Argument::SafeArea => Some(0.),
        _ => None,
    }
}

fn insets(argument: &Argument, env: &dyn LayoutEnv) -> Option<Insets> {
    match argument {
        Argument::Constant(value) => Some(Insets::uniform(*value)),
        Argument::SafeArea => Some(env.safe_area()),
        _ => None,
    }
}

/// The layout environment of a view in a [`ViewTree`].
struct TreeEnv<'a> {
    tree: &'a ViewTree,
    view: ViewId,
    container: Option<ViewId>,
    measure: &'a dyn Measure,
}

impl<'a> LayoutEnv for TreeEnv<'a> {
    fn safe_area(&self) -> Insets {
        match self.container {
            Some(container) => self.tree.safe_area(container),
            None => Insets::zero(),
        }
    }

    fn target_frame(&self, name: &str) -> Option<Rect> {
        let target = match self.tree.resolve(self.view, name) {
            Some(target) => target,
            None => {
                debug!("no view named {:?}", name);
                return None;
            }
        };
        let frame = self.tree.absolute_frame(target)?;
        let offset = match self.tree.superview(self.view) {
            Some(superview) => self.tree.absolute_frame(superview)?.origin.to_vec(),
            None => Vector2::zero(),
        };
        Some(frame - offset)
    }

    fn size_that_fits(&self, current: Vector2<f64>, proposal: Vector2<f64>) -> Vector2<f64> {
        match self.tree.view(self.view) {
            Some(view) => self.measure.size_that_fits(view, current, proposal),
            None => current,
        }
    }
}

/// Runs layout operations for a view and returns its new frame.
///
/// The view's frame is only changed by `update` operations; assigning the returned frame is up to
/// the caller.
pub fn layout(
    tree: &mut ViewTree,
    view: ViewId,
    ops: &[LayoutOp],
    container: Option<ViewId>,
    measure: &dyn Measure,
) -> Rect {
    let base = match tree.frame(view) {
        Some(frame) => frame,
        None => return Rect::zero(),
    };
    let bounds = match tree.superview(view) {
        Some(superview) => tree.bounds_size(superview),
        None => Vector2::zero(),
    };

    let mut pin = Pin::new(bounds, base);
    for op in ops {
        pin = pin.apply(
            op,
            &TreeEnv {
                tree: &*tree,
                view,
                container,
                measure,
            },
        );
        if op.method == LayoutMethod::Update {
            tree.set_frame(view, pin.frame());
        }
    }
    pin.frame()
}

/// Lays out a single view with its own operations and assigns the frame.
pub fn layout_node(tree: &mut ViewTree, view: ViewId, measure: &dyn Measure) -> Rect {
    let spec = match tree.spec(view) {
        Some(spec) => spec.clone(),
        None => return tree.frame(view).unwrap_or_else(Rect::zero),
    };
    let container = tree.container(view);
    let frame = layout(tree, view, &spec.layout, container, measure);
    tree.set_frame(view, frame);
    frame
}

/// Performs a layout pass over the root's tree.
///
/// Views that need layout are laid out before their subviews, and laying out a view makes all of
/// its subviews need layout. A view's own frame changes during the pass don't cause it to be laid
/// out again.
pub fn layout_if_needed(tree: &mut ViewTree, measure: &dyn Measure) {
    tree.index_names();
    let root = tree.root();
    layout_subtree(tree, root, measure, false);
}

fn layout_subtree(tree: &mut ViewTree, view: ViewId, measure: &dyn Measure, forced: bool) {
    let needed = forced || tree.needs_layout(view);
    if needed {
        let frame = layout_node(tree, view, measure);
        trace!("laid out {:?} at {:?}", view, frame);
        tree.clear_needs_layout(view);
    }

    let subviews = tree.subviews(view).to_vec();
    for subview in subviews {
        layout_subtree(tree, subview, measure, needed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::LayoutMethod::*;
    use crate::backend::TextMetrics;
    use crate::factory;
    use crate::patch::Patch;
    use crate::spec::ViewSpec;
    use cgmath::Point2;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// A 320×480 superview with fixed targets.
    struct FixedEnv {
        safe_area: Insets,
        targets: HashMap<&'static str, Rect>,
        intrinsic: Vector2<f64>,
    }

    impl Default for FixedEnv {
        fn default() -> Self {
            let mut targets = HashMap::new();
            targets.insert("badge", Rect::from_xywh(8., 8., 20., 20.));
            FixedEnv {
                safe_area: Insets::zero(),
                targets,
                intrinsic: Vector2::new(60., 16.),
            }
        }
    }

    impl LayoutEnv for FixedEnv {
        fn safe_area(&self) -> Insets {
            self.safe_area
        }
        fn target_frame(&self, name: &str) -> Option<Rect> {
            self.targets.get(name).copied()
        }
        fn size_that_fits(&self, _current: Vector2<f64>, proposal: Vector2<f64>) -> Vector2<f64> {
            Vector2::new(self.intrinsic.x.min(proposal.x), self.intrinsic.y)
        }
    }

    fn run(ops: &[LayoutOp], env: &FixedEnv) -> Rect {
        Pin::new(Vector2::new(320., 480.), Rect::zero())
            .apply_all(ops, env)
            .frame()
    }

    fn op(method: LayoutMethod, value: f64) -> LayoutOp {
        LayoutOp::constant(method, value)
    }

    fn anchor(method: LayoutMethod, target: &str, margin: f64) -> LayoutOp {
        LayoutOp::new(
            method,
            Argument::NamedAnchor {
                target: target.to_string(),
                margin,
                vertical: None,
                horizontal: None,
            },
        )
    }

    #[test]
    fn card_edges() {
        let frame = run(
            &[op(Top, 16.), op(Height, 128.), op(Horizontally, 8.)],
            &FixedEnv::default(),
        );
        assert_eq!(frame, Rect::from_xywh(8., 16., 304., 128.));
    }

    #[test]
    fn operations_are_order_dependent() {
        let env = FixedEnv::default();
        let a = run(&[op(Top, 8.), op(MarginTop, 4.)], &env);
        let b = run(&[op(MarginTop, 4.), op(Top, 8.)], &env);
        assert_eq!(a.min_y(), 12.);
        assert_eq!(b.min_y(), 8.);

        // the latest pin wins
        let a = run(&[op(Horizontally, 10.), op(Width, 100.)], &env);
        let b = run(&[op(Width, 100.), op(Horizontally, 10.)], &env);
        assert_eq!(a, Rect::from_xywh(10., 0., 100., 0.));
        assert_eq!(b, Rect::from_xywh(10., 0., 300., 0.));
    }

    #[test]
    fn safe_area_sentinel() {
        let safe = FixedEnv {
            safe_area: Insets::new(20., 0., 34., 0.),
            ..FixedEnv::default()
        };
        let plain = FixedEnv::default();
        let sentinel = LayoutOp::new(Top, Argument::SafeArea);

        assert_eq!(run(&[sentinel.clone()], &safe), run(&[op(Top, 20.)], &plain));
        assert_eq!(run(&[sentinel], &plain).min_y(), 0., "no safe area without insets");

        let frame = run(&[LayoutOp::new(Vertically, Argument::SafeArea)], &safe);
        assert_eq!(frame, Rect::from_xywh(0., 20., 0., 426.));

        let frame = run(
            &[op(Top, 8.), LayoutOp::new(MarginTop, Argument::SafeArea)],
            &safe,
        );
        assert_eq!(frame.min_y(), 28.);

        let frame = run(&[op(Size, 10.), LayoutOp::new(Width, Argument::SafeArea)], &safe);
        assert_eq!(frame.size, Vector2::new(0., 10.), "sizes treat the sentinel as zero");
    }

    #[test]
    fn bottom_and_end_pin_trailing_edges() {
        let frame = run(&[op(Size, 50.), op(Bottom, 10.), op(End, 20.)], &FixedEnv::default());
        assert_eq!(frame, Rect::from_xywh(250., 420., 50., 50.));

        let frame = run(&[op(Start, 5.), op(All, 4.)], &FixedEnv::default());
        assert_eq!(frame, Rect::from_xywh(4., 4., 312., 472.));
    }

    #[test]
    fn relative_placement() {
        let env = FixedEnv::default();

        let frame = run(&[op(Size, 10.), anchor(After, "badge", 8.)], &env);
        assert_eq!(frame.origin, Point2::new(36., 0.));

        let frame = run(&[op(Size, 10.), anchor(Before, "badge", 2.)], &env);
        assert_eq!(frame.max_x(), 6.);

        let frame = run(&[op(Size, 10.), anchor(Below, "badge", 4.)], &env);
        assert_eq!(frame.min_y(), 32.);

        let frame = run(&[op(Size, 10.), anchor(Above, "badge", 0.)], &env);
        assert_eq!(frame.max_y(), 8.);
        assert_eq!(frame.size.y, 10.);

        let frame = run(&[op(Top, 2.), anchor(Above, "badge", 0.)], &env);
        assert_eq!(frame.min_y(), 2.);
        assert_eq!(frame.size.y, 6., "pinned between the top and the badge");
    }

    #[test]
    fn relative_alignment() {
        let env = FixedEnv::default();
        let aligned = |method, vertical, horizontal| {
            LayoutOp::new(
                method,
                Argument::NamedAnchor {
                    target: "badge".to_string(),
                    margin: 8.,
                    vertical,
                    horizontal,
                },
            )
        };

        let frame = run(&[op(Height, 10.), aligned(After, Some(VerticalAlign::Center), None)], &env);
        assert_eq!(frame.min_y(), 13.);
        let frame = run(&[op(Height, 10.), aligned(After, Some(VerticalAlign::Top), None)], &env);
        assert_eq!(frame.min_y(), 8.);
        let frame = run(&[op(Height, 10.), aligned(Before, Some(VerticalAlign::Bottom), None)], &env);
        assert_eq!(frame.max_y(), 28.);

        let frame = run(&[op(Width, 40.), aligned(Below, None, Some(HorizontalAlign::Center))], &env);
        assert_eq!(frame.min_x(), -2.);
        let frame = run(&[op(Width, 40.), aligned(Below, None, Some(HorizontalAlign::End))], &env);
        assert_eq!(frame.max_x(), 28.);
        let frame = run(&[op(Width, 40.), aligned(Above, None, Some(HorizontalAlign::Left))], &env);
        assert_eq!(frame.min_x(), 8.);
    }

    #[test]
    fn unresolved_targets_are_skipped() {
        let env = FixedEnv::default();
        let ops = [
            op(Top, 16.),
            LayoutOp::new(
                After,
                Argument::NamedAnchor {
                    target: "missing".to_string(),
                    margin: 8.,
                    vertical: Some(VerticalAlign::Center),
                    horizontal: None,
                },
            ),
            op(Height, 128.),
        ];
        let without = [op(Top, 16.), op(Height, 128.)];
        assert_eq!(run(&ops, &env), run(&without, &env));

        let centered = LayoutOp::new(
            VCenterTo,
            Argument::CenterAnchor {
                target: "missing".to_string(),
                margin: 0.,
            },
        );
        assert_eq!(run(&[op(Top, 16.), centered], &env), run(&[op(Top, 16.)], &env));
    }

    #[test]
    fn mismatched_arguments_are_skipped() {
        let env = FixedEnv::default();
        assert_eq!(
            run(&[op(Top, 16.), op(After, 8.), LayoutOp::new(VCenter, Argument::SafeArea)], &env),
            run(&[op(Top, 16.)], &env)
        );
        assert_eq!(
            run(&[op(Top, 16.), anchor(Top, "badge", 8.), anchor(All, "badge", 1.)], &env),
            run(&[op(Top, 16.)], &env)
        );
    }

    #[test]
    fn centering() {
        let env = FixedEnv::default();

        let frame = run(&[op(Size, 20.), op(Center, 0.)], &env);
        assert_eq!(frame, Rect::from_xywh(150., 230., 20., 20.));
        let frame = run(&[op(Size, 20.), op(HCenter, 5.)], &env);
        assert_eq!(frame.min_x(), 155.);
        let frame = run(&[op(Size, 20.), op(VCenter, -10.)], &env);
        assert_eq!(frame.min_y(), 220.);

        let center_to = |method, margin| {
            LayoutOp::new(
                method,
                Argument::CenterAnchor {
                    target: "badge".to_string(),
                    margin,
                },
            )
        };
        let frame = run(&[op(Size, 10.), center_to(VCenterTo, 0.), center_to(HCenterTo, 2.)], &env);
        assert_eq!(frame, Rect::from_xywh(15., 13., 10., 10.));
    }

    #[test]
    fn size_to_fit() {
        let env = FixedEnv::default();

        let frame = run(&[op(Top, 8.), LayoutOp::new(SizeToFit, Argument::neutral())], &env);
        assert_eq!(frame, Rect::from_xywh(0., 8., 60., 16.));

        let frame = run(
            &[op(Width, 40.), LayoutOp::new(SizeToFitWidth, Argument::neutral())],
            &env,
        );
        assert_eq!(frame.size, Vector2::new(40., 16.), "keeps the width");

        let frame = run(
            &[op(Height, 40.), LayoutOp::new(SizeToFitHeight, Argument::neutral())],
            &env,
        );
        assert_eq!(frame.size, Vector2::new(60., 40.), "keeps the height");
    }

    #[test]
    fn update_restarts_from_the_frame() {
        let env = FixedEnv::default();
        let update = LayoutOp::new(Update, Argument::neutral());

        // without update, the later height is combined with both vertical edges
        let frame = run(&[op(Vertically, 10.), op(Height, 50.)], &env);
        assert_eq!(frame, Rect::from_xywh(0., 10., 0., 50.));

        let frame = run(&[op(Vertically, 10.), update.clone(), op(Bottom, 0.)], &env);
        assert_eq!(frame, Rect::from_xywh(0., 20., 0., 460.), "bottom moves the committed frame");
        let frame = run(&[op(Vertically, 10.), op(Bottom, 0.)], &env);
        assert_eq!(frame, Rect::from_xywh(0., 10., 0., 470.), "bottom stretches the pinned frame");

        let frame = run(
            &[op(Top, 8.), op(Height, 20.), update, op(MarginTop, 4.)],
            &env,
        );
        assert_eq!(frame, Rect::from_xywh(0., 12., 0., 20.), "margins add to the committed top");
    }

    #[test]
    fn margin_top_does_not_accumulate() {
        let pin = Pin::new(Vector2::new(320., 480.), Rect::from_xywh(0., 4., 0., 20.));
        let frame = pin.apply(&op(MarginTop, 4.), &FixedEnv::default()).frame();
        assert_eq!(frame.min_y(), 4., "an unpinned top edge is the superview's top edge");
    }

    #[test]
    fn update_commits_to_the_tree() {
        let spec: ViewSpec = r#"{"name": "card", "type": 0, "layout": [
            {"method": 7, "arguments": ["10"]},
            {"method": 1, "arguments": ["100"]},
            {"method": 3, "arguments": ["8"]},
            {"method": 2, "arguments": ["20"]},
            {"method": 24},
            {"method": 13, "arguments": ["card", "4"]}
        ]}"#
        .parse()
        .unwrap();
        let mut tree = ViewTree::new(Vector2::new(320., 480.), Insets::zero());
        let root = tree.root();
        let card = factory::build(&mut tree, &Arc::new(spec), Some(root));
        tree.set_subviews(root, vec![card]);
        tree.patches().for_each(drop);

        let frame = layout_node(&mut tree, card, &TextMetrics::default());
        assert_eq!(
            frame,
            Rect::from_xywh(114., 8., 100., 20.),
            "placed after the frame committed by update"
        );
        assert_eq!(tree.frame(card), Some(frame));
        assert_eq!(
            tree.patches().collect::<Vec<_>>(),
            vec![
                Patch::Frame(card, Rect::from_xywh(10., 8., 100., 20.)),
                Patch::Frame(card, Rect::from_xywh(114., 8., 100., 20.)),
            ]
        );
    }
}
