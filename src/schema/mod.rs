//! Wire-facing DTOs for the project collaborator.
//!
//! The persisted layer record is a flat, camelCase document; the scene model
//! is a typed enum. Decoding is lenient: malformed records degrade to no-op
//! layer kinds instead of failing the whole load, so the editor stays usable
//! on imperfect data. Z-index conflicts are repaired by
//! [`crate::scene::store::LayerStore::replace_all`], not here.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::foundation::core::CanvasSize;
use crate::scene::model::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR, Layer, LayerKind};

/// Position in canvas coordinates as persisted on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionDef {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl From<Point> for PositionDef {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PositionDef> for Point {
    fn from(p: PositionDef) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Layer record as persisted by the project collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDef {
    /// Layer identifier.
    pub id: String,
    /// Kind tag: `image`, `text`, or any extension kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// File or URL reference, meaningful for image-like kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Canvas position.
    #[serde(default)]
    pub position: PositionDef,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Blend mode tag.
    #[serde(default = "default_blend_mode")]
    pub blend_mode: String,
    /// Paint-order rank.
    #[serde(default)]
    pub z_index: i64,
    /// Text content for text layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size for text layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Fill color for text layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_blend_mode() -> String {
    crate::scene::model::BLEND_NORMAL.to_owned()
}

fn default_version() -> u64 {
    1
}

/// Project document as returned by the project collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDef {
    /// Project identifier.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Canvas dimensions.
    pub canvas_size: CanvasSize,
    /// Persisted layers; order on the wire carries no meaning.
    #[serde(default)]
    pub layers: Vec<LayerDef>,
    /// Document version, bumped by the collaborator on each save.
    #[serde(default = "default_version")]
    pub version: u64,
}

/// Decode one persisted layer record into the scene model.
///
/// An `image` record without a file reference cannot render; it degrades to
/// [`LayerKind::Other`] (a no-op) rather than failing the load.
pub fn layer_from_def(def: &LayerDef) -> Layer {
    let kind = match def.kind.as_str() {
        "image" => match &def.file {
            Some(file) => LayerKind::Image {
                source: file.clone(),
            },
            None => {
                tracing::warn!(layer = %def.id, "image layer without file; treating as no-op");
                LayerKind::Other {
                    kind: def.kind.clone(),
                    file: None,
                }
            }
        },
        "text" => LayerKind::Text {
            text: def.text.clone().unwrap_or_default(),
            font_size: def.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            color: def
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_owned()),
        },
        other => LayerKind::Other {
            kind: other.to_owned(),
            file: def.file.clone(),
        },
    };

    Layer {
        id: def.id.clone(),
        kind,
        position: def.position.into(),
        opacity: def.opacity,
        blend_mode: def.blend_mode.clone(),
        z_index: def.z_index,
    }
}

/// Encode one scene layer into its persisted record.
pub fn layer_to_def(layer: &Layer) -> LayerDef {
    let (kind, file, text, font_size, color) = match &layer.kind {
        LayerKind::Image { source } => {
            ("image".to_owned(), Some(source.clone()), None, None, None)
        }
        LayerKind::Text {
            text,
            font_size,
            color,
        } => (
            "text".to_owned(),
            None,
            Some(text.clone()),
            Some(*font_size),
            Some(color.clone()),
        ),
        LayerKind::Other { kind, file } => (kind.clone(), file.clone(), None, None, None),
    };

    LayerDef {
        id: layer.id.clone(),
        kind,
        file,
        position: layer.position.into(),
        opacity: layer.opacity,
        blend_mode: layer.blend_mode.clone(),
        z_index: layer.z_index,
        text,
        font_size,
        color,
    }
}

/// Decode a persisted layer sequence into scene layers.
pub fn decode_layers(defs: &[LayerDef]) -> Vec<Layer> {
    defs.iter().map(layer_from_def).collect()
}

/// Encode scene layers into persisted records, preserving iteration order.
pub fn encode_layers<'a>(layers: impl Iterator<Item = &'a Layer>) -> Vec<LayerDef> {
    layers.map(layer_to_def).collect()
}
