//! Document model types for layout-level document content.
//!
//! This module defines the representation that bridges the external text
//! extraction step and the structure inference engine. Pages carry styled,
//! positioned text spans; the derived outline and section types describe
//! what the engine infers from them.

mod document;
mod outline;
mod page;
mod section;
mod span;

pub use document::Document;
pub use outline::{Heading, HeadingLevel, Outline};
pub use page::Page;
pub use section::{RankedSection, Section, SubsectionSnippet};
pub use span::{BBox, Span, BOLD_FLAG};
