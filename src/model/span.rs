//! Styled text spans.

use serde::{Deserialize, Serialize};

/// Style flag bit marking a bold span in the extraction payload.
pub const BOLD_FLAG: u32 = 1 << 4;

/// Font size assumed when the extraction payload omits one.
const DEFAULT_FONT_SIZE: f32 = 12.0;

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

/// Axis-aligned bounding box in page units.
///
/// The origin is the top-left corner of the page and `y` grows downwards,
/// so `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// One styled run of text with its page location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Raw style flags from the extractor
    #[serde(default)]
    pub flags: u32,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_name: String,

    /// Position on the page
    #[serde(default)]
    pub bbox: BBox,

    /// Page the span belongs to (0-indexed)
    #[serde(default)]
    pub page_index: u32,
}

impl Span {
    /// Create a new span with no style flags.
    pub fn new(text: impl Into<String>, font_size: f32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            font_size,
            flags: 0,
            font_name: String::new(),
            bbox,
            page_index: 0,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the span bold via the style flag.
    pub fn bold(mut self) -> Self {
        self.flags |= BOLD_FLAG;
        self
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the page index.
    pub fn on_page(mut self, page_index: u32) -> Self {
        self.page_index = page_index;
        self
    }

    /// Whether the bold style flag is set.
    pub fn has_bold_flag(&self) -> bool {
        self.flags & BOLD_FLAG != 0
    }

    /// Whether the font name indicates a bold face.
    pub fn has_bold_font_name(&self) -> bool {
        self.font_name.to_lowercase().contains("bold")
    }

    /// Whether the span is bold by flag or font name.
    pub fn is_bold(&self) -> bool {
        self.has_bold_flag() || self.has_bold_font_name()
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.bbox.y0
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bbox.y1
    }
}
