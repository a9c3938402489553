// src/extractors/mod.rs
pub mod list;
pub mod patterns;
pub mod response;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use self::{
    list::extract_list_items,
    patterns::{Field, PatternSet},
    response::{validate_record, ParsedRecord, ResponseParser, ValidationReport},
    section::SectionExtractor,
};
