//! Section segmentation: slicing a document into heading-bounded sections.

mod builder;
mod index;

pub use builder::{HeadingOrder, SectionBuilder, SectionOptions};
pub use index::SpanIndex;
