// src/extractors/mod.rs
pub mod anchors;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use section::{Confidence, ExtractionResult, SectionExtractor, SourceClassification};
