//! Materialized views.

use crate::color::Color;
use crate::spec::{BaseStyle, Font, LabelAttributes, TextAlignment};
use uuid::Uuid;

/// A unique identifier for a materialized view.
///
/// (this is just a UUID)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32, u16, u16, [u8; 8]);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ViewId(a, b, c, *d)
    }
}

/// The properties of a native view, with defaults filled in.
///
/// Frames are not part of this; they are owned by the [`ViewTree`](crate::ViewTree) and change
/// on every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeView {
    /// A plain rectangular view.
    Layer(LayerProps),
    /// A text label.
    Text {
        layer: LayerProps,
        text: String,
        text_color: Color,
        font: Option<Font>,
        alignment: TextAlignment,
    },
}

/// Properties every native view has.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayerProps {
    /// Background color; transparent if unset.
    pub background: Color,
    pub corner_radius: f64,
}

impl LayerProps {
    pub fn from_style(style: &BaseStyle) -> LayerProps {
        LayerProps {
            background: style.background_color.unwrap_or_default(),
            corner_radius: style.corner_radius.unwrap_or(0.),
        }
    }
}

impl NativeView {
    pub fn layer(&self) -> &LayerProps {
        match self {
            NativeView::Layer(layer) => layer,
            NativeView::Text { layer, .. } => layer,
        }
    }

    pub(crate) fn text(style: &BaseStyle, label: &LabelAttributes) -> NativeView {
        NativeView::Text {
            layer: LayerProps::from_style(style),
            text: label.text.clone().unwrap_or_default(),
            // labels draw black text unless told otherwise
            text_color: label.text_color.unwrap_or(Color::new(0., 0., 0., 1.)),
            font: label.font.clone(),
            alignment: label.alignment,
        }
    }
}
