//! The canonical product description extracted from a sales page.
//!
//! A [`ProductRecord`] is value data: built once per URL, read many times,
//! never mutated. Every field is guaranteed non-empty by construction —
//! extraction either found something or the hardcoded default was
//! substituted, so downstream code never sees a "missing field" state.

use serde::{Deserialize, Serialize};

/// Default title when no `<title>`, `<h1>`, or `og:title` matches.
pub const DEFAULT_TITLE: &str = "Produto Incrível";

/// Default description when no description meta or paragraph matches.
pub const DEFAULT_DESCRIPTION: &str =
    "Um produto que vai transformar sua vida e seus resultados.";

/// Default price placeholder pointing the visitor back to the page.
pub const DEFAULT_PRICE: &str = "Consulte o preço na página";

/// Default benefit list, substituted wholesale when no benefit matches.
pub const DEFAULT_BENEFITS: [&str; 3] = [
    "Resultados comprovados",
    "Suporte especializado",
    "Garantia de satisfação",
];

/// Default testimonial list, substituted wholesale when none matches.
pub const DEFAULT_TESTIMONIALS: [&str; 1] =
    ["Produto excelente, recomendo! - Cliente Satisfeito"];

/// Default call-to-action.
pub const DEFAULT_CTA: &str = "Compre Agora";

/// Structured marketing copy for one sales page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product title, at most 100 characters.
    pub title: String,
    /// Short marketing description, at most 300 characters.
    pub description: String,
    /// Human-readable price as found on the page, currency symbol included.
    pub price: String,
    /// Up to 5 benefit bullet points (at least 3 after defaulting).
    pub benefits: Vec<String>,
    /// Up to 3 customer testimonials (at least 1 after defaulting).
    pub testimonials: Vec<String>,
    /// Call-to-action label.
    pub cta: String,
    /// Source URL, echoed verbatim.
    pub url: String,
}

impl ProductRecord {
    /// Build the fully-defaulted record for a URL.
    ///
    /// Used when the page could not be fetched at all: a broken or
    /// unreachable page degrades to a generic persona instead of failing
    /// the chat request.
    pub fn defaulted(url: &str) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            price: DEFAULT_PRICE.to_string(),
            benefits: DEFAULT_BENEFITS.iter().map(|s| s.to_string()).collect(),
            testimonials: DEFAULT_TESTIMONIALS.iter().map(|s| s.to_string()).collect(),
            cta: DEFAULT_CTA.to_string(),
            url: url.to_string(),
        }
    }
}
