//! Template model types.
//!
//! A template is an ordered list of [`Section`]s plus a display name. The
//! model keeps each section's payload typed; the query-string and CSS length
//! encodings used on the wire only appear at the serde and HTML boundaries.

mod document;
mod id;
mod section;

pub use document::Document;
pub use id::SectionId;
pub use section::{Alignment, ImageContent, Section, SectionContent, SpacerHeight};
