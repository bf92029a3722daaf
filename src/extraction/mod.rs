//! Heuristic page-data extraction.
//!
//! Converts raw HTML into a fixed-shape [`ProductRecord`] using ordered
//! pattern matching with graceful degradation to defaults. This is
//! intentionally a best-effort regex scanner, not a DOM parser: sales pages
//! are scanned for recognizable marketing markup and anything the rules miss
//! falls back to a hardcoded default, so the record is always fully
//! populated.
//!
//! Rule precedence is part of the contract: structural markup (explicit tags
//! and classes) is tried before generic heuristic patterns, so well-marked
//! pages prefer their own semantic structure over generic quote-scraping.
//!
//! [`ProductRecord`]: crate::product::ProductRecord

pub mod fields;
pub mod page;
pub mod rules;

pub use page::{Extraction, PageDataExtractor};
