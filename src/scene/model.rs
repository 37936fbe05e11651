use kurbo::Point;

/// Blend mode tag every renderer understands.
pub const BLEND_NORMAL: &str = "normal";

/// Font size a text layer gets when none is specified.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Fill color a text layer gets when none is specified.
pub const DEFAULT_TEXT_COLOR: &str = "black";

/// One visual element on the canvas.
///
/// Layers are owned exclusively by a [`crate::scene::store::LayerStore`]; the
/// store is the only place they are created or mutated. `id` is assigned at
/// creation, stable for the layer's lifetime and never reused. `z_index`
/// defines paint order ascending (lowest paints first) and is unique within a
/// store at all times.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Opaque unique identifier.
    pub id: String,
    /// Visual content.
    pub kind: LayerKind,
    /// Top-left position in canvas coordinates, mutable by drag.
    pub position: Point,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blend mode tag, opaque to the core and passed through to rendering.
    pub blend_mode: String,
    /// Paint-order rank, unique within the owning store.
    pub z_index: i64,
}

/// Visual content of a layer.
///
/// Kinds the core does not interpret are preserved as [`LayerKind::Other`]:
/// they render as no-ops and survive a load/save round trip untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    /// Bitmap sourced from an asset or generation-result URL.
    Image {
        /// URL of the bitmap.
        source: String,
    },
    /// Plain text with basic styling.
    Text {
        /// Text content.
        text: String,
        /// Font size in canvas units.
        font_size: f64,
        /// Fill color tag, passed through to rendering.
        color: String,
    },
    /// A kind this core does not interpret (for example `shape` or
    /// `component`).
    Other {
        /// The original kind tag.
        kind: String,
        /// Optional file reference carried by the record.
        file: Option<String>,
    },
}

impl LayerKind {
    /// Image layer content from a source URL.
    pub fn image(source: impl Into<String>) -> Self {
        Self::Image {
            source: source.into(),
        }
    }

    /// Text layer content with the default size and color.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_TEXT_COLOR.to_owned(),
        }
    }
}
