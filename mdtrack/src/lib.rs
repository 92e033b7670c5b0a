//! mdtrack core - trackable items from markdown
//!
//! Extracts a hierarchical model of trackable items (headers, list items,
//! checkboxes) from markdown text, assigns each a stable identity, and can
//! later recover the exact source substring any item spans from recorded
//! line/column coordinates alone.
//!
//! The core is a pure function-call surface: parse text into a
//! [`document_model::ParsedDocument`] snapshot, walk its flat items or its
//! header-nested tree, and slice the original text through recorded
//! positions. All operations are synchronous, side-effect free, and safe to
//! run from independent callers without coordination.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod document_model;
pub mod item_model;
pub mod markdown_ast;
pub mod pipeline;
pub mod tracker_config;

pub use document_model::{parse_document, DocumentError, ParsedDocument};
pub use item_model::{
    build_tree, extract_items, extract_markdown_slice, flatten_tree, generate_id, ItemKind,
    Position, SliceError, TrackableItem,
};
pub use tracker_config::TrackerConfig;
