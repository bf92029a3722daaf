//! Page-Data Extractor orchestration.
//!
//! `extract` is total from the caller's perspective: a fetch failure never
//! surfaces as an error, it degrades to the fully-defaulted record carrying
//! the original URL. The [`Extraction`] tag keeps the degrade path visible
//! to logging and tests even though both variants collapse to the same
//! success shape downstream.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::extraction::fields;
use crate::fetch::PageFetcher;
use crate::product::ProductRecord;

/// Outcome of one extraction. Both variants carry a fully-populated record.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// The page was fetched and the field extractors ran over its HTML.
    /// Individual fields may still be defaults when no rule matched.
    Extracted(ProductRecord),
    /// The page could not be fetched; every field is at its default.
    Defaulted(ProductRecord),
}

impl Extraction {
    pub fn record(&self) -> &ProductRecord {
        match self {
            Extraction::Extracted(r) | Extraction::Defaulted(r) => r,
        }
    }

    pub fn into_record(self) -> ProductRecord {
        match self {
            Extraction::Extracted(r) | Extraction::Defaulted(r) => r,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Extraction::Defaulted(_))
    }
}

/// Runs the field extractors against one fetched page.
#[derive(Clone)]
pub struct PageDataExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl PageDataExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch the page once and assemble the product record.
    ///
    /// Never fails: fetch errors and non-2xx statuses are logged and
    /// swallowed into [`Extraction::Defaulted`]. No retries — retry policy,
    /// if any, belongs to the fetcher or the caller.
    pub async fn extract(&self, url: &str) -> Extraction {
        match self.fetcher.fetch(url).await {
            Ok(page) => {
                let record = Self::from_html(&page.body, url);
                debug!(url, title = %record.title, "page data extracted");
                Extraction::Extracted(record)
            }
            Err(e) => {
                warn!(url, error = %e, "page fetch failed, using defaulted record");
                Extraction::Defaulted(ProductRecord::defaulted(url))
            }
        }
    }

    /// Run all field extractors over already-fetched HTML. Pure.
    pub fn from_html(html: &str, url: &str) -> ProductRecord {
        ProductRecord {
            title: fields::extract_title(html),
            description: fields::extract_description(html),
            price: fields::extract_price(html),
            benefits: fields::extract_benefits(html),
            testimonials: fields::extract_testimonials(html),
            cta: fields::extract_cta(html),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchedPage};
    use async_trait::async_trait;

    /// Canned fetcher: returns the configured body, or a transport-shaped
    /// error when `body` is `None`.
    struct StubFetcher {
        body: Option<String>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
            match &self.body {
                Some(body) => Ok(FetchedPage {
                    status: 200,
                    body: body.clone(),
                }),
                None => Err(FetchError::Status(503)),
            }
        }
    }

    #[tokio::test]
    async fn test_extract_assembles_record_with_url() {
        let html = concat!(
            "<title>SuperCurso</title>",
            r#"<meta name="description" content="Aprenda rápido">"#,
        );
        let extractor = PageDataExtractor::new(Arc::new(StubFetcher {
            body: Some(html.to_string()),
        }));

        let extraction = extractor.extract("https://curso.example/venda").await;
        assert!(!extraction.is_defaulted());
        let record = extraction.into_record();
        assert_eq!(record.title, "SuperCurso");
        assert_eq!(record.description, "Aprenda rápido");
        assert_eq!(record.url, "https://curso.example/venda");
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_defaulted_record() {
        let extractor = PageDataExtractor::new(Arc::new(StubFetcher { body: None }));

        let extraction = extractor.extract("https://bad.example").await;
        assert!(extraction.is_defaulted());
        let record = extraction.into_record();
        assert_eq!(record, ProductRecord::defaulted("https://bad.example"));
        assert_eq!(record.url, "https://bad.example");
    }

    #[test]
    fn test_from_html_is_idempotent() {
        let html = "<title>Mesma Página</title><li>Benefício número um garantido</li>";
        let a = PageDataExtractor::from_html(html, "https://x.example");
        let b = PageDataExtractor::from_html(html, "https://x.example");
        assert_eq!(a, b);
    }
}
