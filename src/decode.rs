//! Decoding spec trees from JSON.
//!
//! Decoding is strict for the node itself (it needs a `name` and a known `type`) and lenient for
//! everything below it: children that fail to decode are dropped, unknown layout methods are
//! dropped, malformed arguments become a zero constant and malformed style values are unset.

use crate::color::Color;
use crate::spec::*;
use log::debug;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

/// Errors that make a whole document undecodable.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),

    #[error("unknown view type {0}")]
    UnknownKind(i64),
}

/// Decodes a view spec node and, leniently, its subtree.
pub fn decode_view(json: &Value) -> Result<ViewSpec, DecodeError> {
    let json = json.as_object().ok_or(DecodeError::NotAnObject)?;

    let name = json
        .get("name")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("name"))?;
    let raw_kind = json
        .get("type")
        .and_then(Value::as_i64)
        .ok_or(DecodeError::MissingField("type"))?;

    let kind = match raw_kind {
        PLAIN_VIEW => ViewKind::Plain,
        LABEL_VIEW => ViewKind::Label(decode_label(json)),
        other => return Err(DecodeError::UnknownKind(other)),
    };

    Ok(ViewSpec {
        name: name.to_string(),
        kind,
        style: decode_style(json),
        children: decode_children(json),
        layout: decode_layout(json),
    })
}

/// Decodes a controller document: `{name, container}`.
pub fn decode_controller(json: &Value) -> Result<ControllerSpec, DecodeError> {
    let json = json.as_object().ok_or(DecodeError::NotAnObject)?;

    let name = json
        .get("name")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("name"))?;
    let container = json
        .get("container")
        .ok_or(DecodeError::MissingField("container"))?;

    Ok(ControllerSpec {
        name: name.to_string(),
        container: Arc::new(decode_view(container)?),
    })
}

impl ViewSpec {
    /// Decodes a view spec, discarding the reason on failure.
    pub fn decode(json: &Value) -> Option<ViewSpec> {
        match decode_view(json) {
            Ok(spec) => Some(spec),
            Err(err) => {
                debug!("failed to decode view spec: {}", err);
                None
            }
        }
    }

    pub fn from_slice(data: &[u8]) -> Result<ViewSpec, DecodeError> {
        decode_view(&serde_json::from_slice(data)?)
    }
}

impl FromStr for ViewSpec {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<ViewSpec, DecodeError> {
        decode_view(&serde_json::from_str(s)?)
    }
}

impl ControllerSpec {
    pub fn from_slice(data: &[u8]) -> Result<ControllerSpec, DecodeError> {
        decode_controller(&serde_json::from_slice(data)?)
    }
}

impl FromStr for ControllerSpec {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<ControllerSpec, DecodeError> {
        decode_controller(&serde_json::from_str(s)?)
    }
}

fn decode_children(json: &Map<String, Value>) -> Vec<Arc<ViewSpec>> {
    let subviews = match json.get("subviews").and_then(Value::as_array) {
        Some(subviews) => subviews,
        None => return Vec::new(),
    };

    subviews
        .iter()
        .filter_map(|child| match decode_view(child) {
            Ok(spec) => Some(Arc::new(spec)),
            Err(err) => {
                debug!("dropping subview: {}", err);
                None
            }
        })
        .collect()
}

fn decode_style(json: &Map<String, Value>) -> BaseStyle {
    BaseStyle {
        background_color: json.get("backgroundColor").and_then(color_value),
        corner_radius: json.get("corner").and_then(number_value),
    }
}

fn decode_label(json: &Map<String, Value>) -> LabelAttributes {
    LabelAttributes {
        text: json.get("text").and_then(Value::as_str).map(str::to_string),
        text_color: json.get("textColor").and_then(color_value),
        font: json.get("font").and_then(decode_font),
        alignment: json
            .get("textAlignment")
            .and_then(Value::as_i64)
            .map_or_else(TextAlignment::default, TextAlignment::from_raw),
    }
}

/// A font needs all of name, size and weight.
fn decode_font(json: &Value) -> Option<Font> {
    let name = json.get("name")?.as_str()?;
    let size = number_value(json.get("size")?)?;
    let weight = FontWeight::from_raw(json.get("weight")?.as_i64()?)?;

    Some(Font {
        name: name.to_string(),
        size,
        weight,
    })
}

fn decode_layout(json: &Map<String, Value>) -> Vec<LayoutOp> {
    let entries = match json.get("layout").and_then(Value::as_array) {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut ops = Vec::with_capacity(entries.len());
    for entry in entries {
        let raw = match entry.get("method").and_then(Value::as_i64) {
            Some(raw) => raw,
            None => {
                debug!("dropping layout entry without a method: {}", entry);
                continue;
            }
        };
        let method = match LayoutMethod::from_raw(raw) {
            Some(method) => method,
            None => {
                debug!("dropping unknown layout method {}", raw);
                continue;
            }
        };
        let arguments = entry
            .get("arguments")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        ops.push(LayoutOp {
            method,
            argument: decode_argument(method, arguments),
        });
    }
    ops
}

/// Decodes the arguments of a method, degrading to a zero constant if they don't fit its shape.
pub fn decode_argument(method: LayoutMethod, arguments: &[Value]) -> Argument {
    let argument = match method.argument_shape() {
        ArgumentShape::Edge => match arguments {
            [Value::String(s)] if s == CONTAINER_SAFE_AREA => Some(Argument::SafeArea),
            [value] => number_value(value).map(Argument::Constant),
            _ => None,
        },
        ArgumentShape::VerticallyAligned => {
            aligned_anchor(arguments).map(|(target, margin, align)| Argument::NamedAnchor {
                target,
                margin,
                vertical: align.and_then(VerticalAlign::from_raw),
                horizontal: None,
            })
        }
        ArgumentShape::HorizontallyAligned => {
            aligned_anchor(arguments).map(|(target, margin, align)| Argument::NamedAnchor {
                target,
                margin,
                vertical: None,
                horizontal: align.and_then(HorizontalAlign::from_raw),
            })
        }
        ArgumentShape::CenterAnchor => match arguments {
            [Value::String(target), margin] => {
                number_value(margin).map(|margin| Argument::CenterAnchor {
                    target: target.clone(),
                    margin,
                })
            }
            _ => None,
        },
        ArgumentShape::Margin => match arguments {
            [margin] => number_value(margin).map(Argument::Constant),
            _ => None,
        },
        ArgumentShape::None => Some(Argument::neutral()),
    };

    argument.unwrap_or_else(|| {
        debug!(
            "arguments {:?} do not fit layout method {:?}; using a zero constant",
            arguments, method
        );
        Argument::neutral()
    })
}

/// `[target, margin, alignment?]` as `(target, margin, raw alignment)`.
///
/// A present alignment must be a number, like the margin.
fn aligned_anchor(arguments: &[Value]) -> Option<(String, f64, Option<i64>)> {
    let (target, margin, align) = match arguments {
        [target, margin] => (target, margin, None),
        [target, margin, align] => (target, margin, Some(number_value(align)? as i64)),
        _ => return None,
    };
    Some((target.as_str()?.to_string(), number_value(margin)?, align))
}

/// A number, either as a JSON number or a numeric string.
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn color_value(value: &Value) -> Option<Color> {
    value.as_str().and_then(Color::from_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_card() {
        let spec: ViewSpec = r##"{"name":"card","type":0,"backgroundColor":"#343F4B","layout":[{"method":3,"arguments":["16"]},{"method":2,"arguments":["128"]},{"method":8,"arguments":["8"]}]}"##
            .parse()
            .unwrap();

        assert_eq!(spec.name, "card");
        assert_eq!(spec.kind, ViewKind::Plain);
        assert_eq!(
            spec.style.background_color.map(|c| c.to_hex(false)),
            Some("#343F4B".to_string())
        );
        assert_eq!(spec.style.corner_radius, None);
        assert!(spec.children.is_empty());
        assert_eq!(
            spec.layout,
            vec![
                LayoutOp::constant(LayoutMethod::Top, 16.),
                LayoutOp::constant(LayoutMethod::Height, 128.),
                LayoutOp::constant(LayoutMethod::Horizontally, 8.),
            ]
        );
    }

    #[test]
    fn node_failures_are_fatal() {
        assert!(matches!(
            decode_view(&json!([1, 2])),
            Err(DecodeError::NotAnObject)
        ));
        assert!(matches!(
            decode_view(&json!({"type": 0})),
            Err(DecodeError::MissingField("name"))
        ));
        assert!(matches!(
            decode_view(&json!({"name": "a", "type": "0"})),
            Err(DecodeError::MissingField("type"))
        ));
        assert!(matches!(
            decode_view(&json!({"name": "a", "type": 7})),
            Err(DecodeError::UnknownKind(7))
        ));
        assert!(matches!(
            "{\"name\":".parse::<ViewSpec>(),
            Err(DecodeError::Json(_))
        ));
        assert_eq!(ViewSpec::decode(&json!({"name": "a"})), None);
    }

    #[test]
    fn bad_children_are_dropped() {
        let spec = decode_view(&json!({
            "name": "parent",
            "type": 0,
            "subviews": [
                {"name": "first", "type": 0},
                {"name": "broken", "type": 42},
                "not an object",
                {"type": 0},
                {"name": "last", "type": 1, "subviews": [{"name": "nested"}]}
            ]
        }))
        .unwrap();

        let names: Vec<_> = spec.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "last"]);
        assert!(
            spec.children[1].children.is_empty(),
            "a parent whose children all fail has no children"
        );
    }

    #[test]
    fn numbers_may_be_strings() {
        let spec = decode_view(&json!({
            "name": "a",
            "type": 0,
            "corner": "8",
            "layout": [
                {"method": 0, "arguments": [20]},
                {"method": 1, "arguments": ["12.5"]},
                {"method": 13, "arguments": ["badge", 8, 1]}
            ]
        }))
        .unwrap();
        assert_eq!(spec.style.corner_radius, Some(8.));
        assert_eq!(spec.layout[0].argument, Argument::Constant(20.));
        assert_eq!(spec.layout[1].argument, Argument::Constant(12.5));
        assert_eq!(
            spec.layout[2].argument,
            Argument::NamedAnchor {
                target: "badge".to_string(),
                margin: 8.,
                vertical: Some(VerticalAlign::Center),
                horizontal: None,
            }
        );

        let spec = decode_view(&json!({"name": "a", "type": 0, "corner": "round"})).unwrap();
        assert_eq!(spec.style.corner_radius, None);
    }

    #[test]
    fn decodes_label() {
        let spec = decode_view(&json!({
            "name": "messageLabel",
            "type": 1,
            "text": "MESSAGES",
            "textColor": "#8392A7",
            "textAlignment": 1,
            "font": {"name": "system", "size": "14", "weight": 0}
        }))
        .unwrap();

        let label = match spec.kind {
            ViewKind::Label(label) => label,
            other => panic!("expected a label, got {:?}", other),
        };
        assert_eq!(label.text.as_deref(), Some("MESSAGES"));
        assert_eq!(label.text_color.map(|c| c.to_hex(false)).as_deref(), Some("#8392A7"));
        assert_eq!(label.alignment, TextAlignment::Center);
        assert_eq!(
            label.font,
            Some(Font {
                name: "system".to_string(),
                size: 14.,
                weight: FontWeight::UltraLight,
            })
        );

        let spec = decode_view(&json!({
            "name": "bare",
            "type": 1,
            "textColor": "blue",
            "font": {"name": "system", "size": "14"}
        }))
        .unwrap();
        assert_eq!(spec.kind, ViewKind::Label(LabelAttributes::default()));
    }

    #[test]
    fn unknown_methods_are_dropped_in_order() {
        let spec = decode_view(&json!({
            "name": "a",
            "type": 0,
            "layout": [
                {"method": 3, "arguments": ["1"]},
                {"method": 99, "arguments": ["2"]},
                {"method": 12},
                {"arguments": ["3"]},
                {"method": 1, "arguments": ["4"]},
                {"method": 24}
            ]
        }))
        .unwrap();

        let methods: Vec<_> = spec.layout.iter().map(|op| op.method).collect();
        assert_eq!(
            methods,
            [LayoutMethod::Top, LayoutMethod::Width, LayoutMethod::Update]
        );
        assert_eq!(spec.layout[1].argument, Argument::Constant(4.));
    }

    #[test]
    fn mismatched_arguments_degrade() {
        use LayoutMethod::*;

        let safe_area = json!(["container.safeArea"]);
        let cases = vec![
            (Top, json!([]), Argument::neutral()),
            (Top, json!(["1", "2"]), Argument::neutral()),
            (Top, json!(["wide"]), Argument::neutral()),
            (Top, safe_area.clone(), Argument::SafeArea),
            (Height, safe_area, Argument::SafeArea),
            (After, json!([8, "8", 0]), Argument::neutral()),
            (After, json!(["badge"]), Argument::neutral()),
            (After, json!(["badge", "8", "top"]), Argument::neutral()),
            (VCenterTo, json!(["badge"]), Argument::neutral()),
            (HCenter, json!([]), Argument::neutral()),
            (Center, json!(["4"]), Argument::Constant(4.)),
            (SizeToFit, json!(["ignored"]), Argument::neutral()),
        ];

        for (method, arguments, expected) in cases {
            let arguments = arguments.as_array().unwrap();
            assert_eq!(
                decode_argument(method, arguments),
                expected,
                "{:?} {:?}",
                method,
                arguments
            );
        }

        assert_eq!(
            decode_argument(Below, &[json!("badge"), json!("4"), json!(7)]),
            Argument::NamedAnchor {
                target: "badge".to_string(),
                margin: 4.,
                vertical: None,
                horizontal: None,
            },
            "an unknown alignment means no alignment"
        );
        assert_eq!(
            decode_argument(HCenterTo, &[json!("badge"), json!(-2)]),
            Argument::CenterAnchor {
                target: "badge".to_string(),
                margin: -2.,
            }
        );
    }

    #[test]
    fn alignments_may_be_strings() {
        assert_eq!(
            decode_argument(LayoutMethod::After, &[json!("badge"), json!("8"), json!("1")]),
            Argument::NamedAnchor {
                target: "badge".to_string(),
                margin: 8.,
                vertical: Some(VerticalAlign::Center),
                horizontal: None,
            }
        );
        assert_eq!(
            decode_argument(LayoutMethod::Above, &[json!("badge"), json!(0), json!("4")]),
            Argument::NamedAnchor {
                target: "badge".to_string(),
                margin: 0.,
                vertical: None,
                horizontal: Some(HorizontalAlign::End),
            }
        );
    }

    #[test]
    fn decodes_controller() {
        let spec: ControllerSpec = r#"{"name":"CardController","type":0,"container":{"name":"container","type":0,"subviews":[{"name":"notification","type":0}]}}"#
            .parse()
            .unwrap();
        assert_eq!(spec.name, "CardController");
        assert_eq!(spec.container.name, "container");
        assert_eq!(spec.container.children.len(), 1);

        assert!(matches!(
            decode_controller(&json!({"name": "c", "container": {"name": "x", "type": 9}})),
            Err(DecodeError::UnknownKind(9))
        ));
        assert!(matches!(
            decode_controller(&json!({"name": "c"})),
            Err(DecodeError::MissingField("container"))
        ));
    }
}
