//! The view spec model.
//!
//! A spec tree is an immutable description of a view hierarchy and its layout intent. It is
//! produced by the [decoder](crate::decode) and materialized by the [factory](crate::factory).

use crate::color::Color;
use std::sync::Arc;

/// The sentinel argument that stands for the layout container's safe-area insets.
pub const CONTAINER_SAFE_AREA: &str = "container.safeArea";

/// A view spec node.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSpec {
    /// Identifier used by relative layout operations.
    ///
    /// Should be unique within a screen; duplicates resolve to the first match.
    pub name: String,

    /// View kind and its kind-specific attributes.
    pub kind: ViewKind,

    /// Attributes shared by all kinds.
    pub style: BaseStyle,

    /// Child specs, in order.
    pub children: Vec<Arc<ViewSpec>>,

    /// Layout operations, applied in order on every layout pass.
    pub layout: Vec<LayoutOp>,
}

/// The spec of a whole screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSpec {
    pub name: String,

    /// The root view; its children become the screen's top-level views.
    pub container: Arc<ViewSpec>,
}

/// View kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    /// A plain rectangular view.
    Plain,
    /// A text label.
    Label(LabelAttributes),
}

pub const PLAIN_VIEW: i64 = 0;
pub const LABEL_VIEW: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseStyle {
    pub background_color: Option<Color>,
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelAttributes {
    pub text: Option<String>,
    pub text_color: Option<Color>,
    pub font: Option<Font>,
    pub alignment: TextAlignment,
}

/// A font description. Resolving it to an actual typeface is up to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font family name; `"system"` is the platform's UI font.
    pub name: String,
    pub size: f64,
    pub weight: FontWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl FontWeight {
    pub fn from_raw(raw: i64) -> Option<FontWeight> {
        Some(match raw {
            0 => FontWeight::UltraLight,
            1 => FontWeight::Thin,
            2 => FontWeight::Light,
            3 => FontWeight::Regular,
            4 => FontWeight::Medium,
            5 => FontWeight::Semibold,
            6 => FontWeight::Bold,
            7 => FontWeight::Heavy,
            8 => FontWeight::Black,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Leading,
    Center,
    Trailing,
}

impl Default for TextAlignment {
    fn default() -> Self {
        TextAlignment::Leading
    }
}

impl TextAlignment {
    /// Unknown values fall back to leading alignment.
    pub fn from_raw(raw: i64) -> TextAlignment {
        match raw {
            1 => TextAlignment::Center,
            2 => TextAlignment::Trailing,
            _ => TextAlignment::Leading,
        }
    }
}

/// A single layout operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOp {
    pub method: LayoutMethod,
    pub argument: Argument,
}

impl LayoutOp {
    pub fn new(method: LayoutMethod, argument: Argument) -> LayoutOp {
        LayoutOp { method, argument }
    }

    /// An operation with a constant argument.
    pub fn constant(method: LayoutMethod, value: f64) -> LayoutOp {
        LayoutOp::new(method, Argument::Constant(value))
    }
}

/// Layout methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMethod {
    Size,
    Width,
    Height,

    Top,
    Bottom,
    Vertically,

    End,
    Start,
    Horizontally,

    MarginTop,

    Above,
    Below,

    After,
    Before,

    SizeToFit,
    SizeToFitWidth,
    SizeToFitHeight,

    VCenterTo,
    HCenterTo,

    VCenter,
    HCenter,

    All,
    Center,

    Update,
}

/// The argument shape a layout method expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// A constant, or the safe-area sentinel.
    Edge,
    /// `[target, margin, alignment?]`, aligned on the vertical axis.
    VerticallyAligned,
    /// `[target, margin, alignment?]`, aligned on the horizontal axis.
    HorizontallyAligned,
    /// `[target, margin]`
    CenterAnchor,
    /// `[margin]`
    Margin,
    /// No arguments.
    None,
}

impl LayoutMethod {
    /// Maps a JSON method number to a method.
    pub fn from_raw(raw: i64) -> Option<LayoutMethod> {
        use LayoutMethod::*;

        Some(match raw {
            0 => Size,
            1 => Width,
            2 => Height,
            3 => Top,
            4 => Bottom,
            5 => Vertically,
            6 => End,
            7 => Start,
            8 => Horizontally,
            9 => MarginTop,
            10 => Above,
            11 => Below,
            13 => After,
            14 => Before,
            15 => SizeToFit,
            16 => SizeToFitWidth,
            17 => SizeToFitHeight,
            18 => VCenterTo,
            19 => HCenterTo,
            20 => VCenter,
            21 => HCenter,
            22 => All,
            23 => Center,
            24 => Update,
            _ => return None,
        })
    }

    /// The JSON method number.
    pub fn raw(self) -> i64 {
        use LayoutMethod::*;

        match self {
            Size => 0,
            Width => 1,
            Height => 2,
            Top => 3,
            Bottom => 4,
            Vertically => 5,
            End => 6,
            Start => 7,
            Horizontally => 8,
            MarginTop => 9,
            Above => 10,
            Below => 11,
            After => 13,
            Before => 14,
            SizeToFit => 15,
            SizeToFitWidth => 16,
            SizeToFitHeight => 17,
            VCenterTo => 18,
            HCenterTo => 19,
            VCenter => 20,
            HCenter => 21,
            All => 22,
            Center => 23,
            Update => 24,
        }
    }

    pub fn argument_shape(self) -> ArgumentShape {
        use LayoutMethod::*;

        match self {
            Size | Width | Height | Top | Bottom | Vertically | End | Start | Horizontally
            | MarginTop => ArgumentShape::Edge,
            Above | Below => ArgumentShape::HorizontallyAligned,
            After | Before => ArgumentShape::VerticallyAligned,
            VCenterTo | HCenterTo => ArgumentShape::CenterAnchor,
            VCenter | HCenter | All | Center => ArgumentShape::Margin,
            SizeToFit | SizeToFitWidth | SizeToFitHeight | Update => ArgumentShape::None,
        }
    }
}

/// A layout operation's argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Constant(f64),

    /// The layout container's safe-area inset on the edge the method pins.
    SafeArea,

    /// Placement relative to another view, for `after`, `before`, `above` and `below`.
    NamedAnchor {
        target: String,
        margin: f64,
        vertical: Option<VerticalAlign>,
        horizontal: Option<HorizontalAlign>,
    },

    /// Centering on another view, for `vCenterTo` and `hCenterTo`.
    CenterAnchor { target: String, margin: f64 },
}

impl Argument {
    /// The argument that does nothing: a zero constant.
    pub fn neutral() -> Argument {
        Argument::Constant(0.)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn from_raw(raw: i64) -> Option<VerticalAlign> {
        match raw {
            0 => Some(VerticalAlign::Top),
            1 => Some(VerticalAlign::Center),
            2 => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }
}

/// Horizontal alignment. Start and end are resolved left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    Start,
    End,
}

impl HorizontalAlign {
    pub fn from_raw(raw: i64) -> Option<HorizontalAlign> {
        match raw {
            0 => Some(HorizontalAlign::Left),
            1 => Some(HorizontalAlign::Center),
            2 => Some(HorizontalAlign::Right),
            3 => Some(HorizontalAlign::Start),
            4 => Some(HorizontalAlign::End),
            _ => None,
        }
    }
}

#[test]
fn test_method_raw_round_trip() {
    let mut known = 0;
    for raw in -1..=30 {
        if let Some(method) = LayoutMethod::from_raw(raw) {
            known += 1;
            assert_eq!(method.raw(), raw, "{:?} should map back to {}", method, raw);
        }
    }
    assert_eq!(known, 24, "methods 0..=24 except 12 should be known");
    assert_eq!(LayoutMethod::from_raw(12), None);
    assert_eq!(LayoutMethod::from_raw(99), None);
}
