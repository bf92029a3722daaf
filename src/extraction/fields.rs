//! Per-field extraction rule tables.
//!
//! One entry point per product field, each a pure function `&str -> value`
//! over the raw HTML — no network, no state. The rule tables are built once
//! and reused across calls.

use std::sync::OnceLock;

use crate::extraction::rules::{FieldRule, FieldSpec, ListRule, ListSpec};
use crate::product;

/// Maximum title length in characters.
const TITLE_MAX_LEN: usize = 100;

/// Maximum description length in characters.
const DESCRIPTION_MAX_LEN: usize = 300;

/// Benefit list cap and per-item length bounds.
const BENEFITS_CAP: usize = 5;
const BENEFIT_MIN_LEN: usize = 10;
const BENEFIT_MAX_LEN: usize = 100;

/// Testimonial list cap and minimum item length.
const TESTIMONIALS_CAP: usize = 3;
const TESTIMONIAL_MIN_LEN: usize = 20;

fn title_spec() -> &'static FieldSpec {
    static SPEC: OnceLock<FieldSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        FieldSpec::new(
            vec![
                FieldRule::group(r"(?i)<title[^>]*>([^<]+)</title>"),
                FieldRule::group(r"(?i)<h1[^>]*>([^<]+)</h1>"),
                FieldRule::group(r#"(?i)<meta[^>]*property="og:title"[^>]*content="([^"]+)""#),
            ],
            product::DEFAULT_TITLE,
        )
        .with_max_len(TITLE_MAX_LEN)
    })
}

fn description_spec() -> &'static FieldSpec {
    static SPEC: OnceLock<FieldSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        FieldSpec::new(
            vec![
                // name="description" before og:description: a page's own meta
                // description outranks what it advertises to social embeds.
                FieldRule::group(r#"(?i)<meta[^>]*name="description"[^>]*content="([^"]+)""#),
                FieldRule::group(
                    r#"(?i)<meta[^>]*property="og:description"[^>]*content="([^"]+)""#,
                ),
                FieldRule::group(r#"(?i)<p[^>]*class="[^"]*description[^"]*"[^>]*>([^<]+)</p>"#),
            ],
            product::DEFAULT_DESCRIPTION,
        )
        .with_max_len(DESCRIPTION_MAX_LEN)
    })
}

fn price_spec() -> &'static FieldSpec {
    static SPEC: OnceLock<FieldSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        // Price rules return the whole matched token, keeping the currency
        // symbol and phrasing exactly as found on the page.
        FieldSpec::new(
            vec![
                FieldRule::whole(r"R\$\s*\d+(?:,\d{2})?"),
                FieldRule::whole(r"\$\s*\d+(?:\.\d{2})?"),
                FieldRule::whole(r"(?i)\d+(?:,\d{2})?\s*reais?"),
                FieldRule::whole(r"(?i)por\s+apenas\s+R?\$?\s*\d+(?:,\d{2})?"),
            ],
            product::DEFAULT_PRICE,
        )
    })
}

fn cta_spec() -> &'static FieldSpec {
    static SPEC: OnceLock<FieldSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        FieldSpec::new(
            vec![
                FieldRule::group(r"(?i)<button[^>]*>([^<]+)</button>"),
                FieldRule::group(r#"(?i)<a[^>]*class="[^"]*btn[^"]*"[^>]*>([^<]+)</a>"#),
                FieldRule::whole(r"(?i)comprar?\s+agora"),
                FieldRule::whole(r"(?i)adquirir?\s+já"),
            ],
            product::DEFAULT_CTA,
        )
    })
}

fn benefits_spec() -> &'static ListSpec {
    static SPEC: OnceLock<ListSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        ListSpec::new(
            vec![
                ListRule::new(r"(?i)<li[^>]*>([^<]+)</li>"),
                ListRule::new(r#"(?i)<div[^>]*class="[^"]*benefit[^"]*"[^>]*>([^<]+)</div>"#),
                ListRule::new(
                    r#"(?i)<span[^>]*class="[^"]*check[^"]*"[^>]*>[^<]*</span>\s*([^<]+)"#,
                ),
            ],
            &product::DEFAULT_BENEFITS,
            BENEFITS_CAP,
            BENEFIT_MIN_LEN,
            Some(BENEFIT_MAX_LEN),
        )
    })
}

fn testimonials_spec() -> &'static ListSpec {
    static SPEC: OnceLock<ListSpec> = OnceLock::new();
    SPEC.get_or_init(|| {
        ListSpec::new(
            vec![
                ListRule::new(
                    r#"(?i)<div[^>]*class="[^"]*testimonial[^"]*"[^>]*>([^<]+)</div>"#,
                ),
                ListRule::new(r"(?i)<blockquote[^>]*>([^<]+)</blockquote>"),
                // Generic quote followed by an attribution dash, tried last.
                ListRule::new(r#""([^"]{50,200})"\s*-\s*([^<\n]+)"#),
            ],
            &product::DEFAULT_TESTIMONIALS,
            TESTIMONIALS_CAP,
            TESTIMONIAL_MIN_LEN,
            None,
        )
    })
}

/// Extract the product title (≤100 chars, defaulted when absent).
pub fn extract_title(html: &str) -> String {
    title_spec().extract(html)
}

/// Extract the marketing description (≤300 chars, defaulted when absent).
pub fn extract_description(html: &str) -> String {
    description_spec().extract(html)
}

/// Extract the price as found on the page, currency symbol included.
pub fn extract_price(html: &str) -> String {
    price_spec().extract(html)
}

/// Extract up to 5 benefit bullet points, 10–100 chars each.
pub fn extract_benefits(html: &str) -> Vec<String> {
    benefits_spec().extract(html)
}

/// Extract up to 3 testimonials of at least 20 chars each.
pub fn extract_testimonials(html: &str) -> Vec<String> {
    testimonials_spec().extract(html)
}

/// Extract the call-to-action label.
pub fn extract_cta(html: &str) -> String {
    cta_spec().extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product;

    #[test]
    fn test_title_prefers_title_tag_over_h1() {
        let html = "<h1>Do H1</h1><title>Do Title</title>";
        assert_eq!(extract_title(html), "Do Title");
    }

    #[test]
    fn test_title_falls_through_to_og_title() {
        let html = r#"<meta property="og:title" content="Curso Completo">"#;
        assert_eq!(extract_title(html), "Curso Completo");
    }

    #[test]
    fn test_title_truncated_to_100_chars() {
        let long = "a".repeat(150);
        let html = format!("<title>{long}</title>");
        assert_eq!(extract_title(&html).chars().count(), 100);
    }

    #[test]
    fn test_title_default() {
        assert_eq!(extract_title("<p>sem título</p>"), product::DEFAULT_TITLE);
    }

    #[test]
    fn test_description_name_meta_beats_og() {
        let html = concat!(
            r#"<meta name="description" content="A">"#,
            r#"<meta property="og:description" content="B">"#,
        );
        assert_eq!(extract_description(html), "A");
    }

    #[test]
    fn test_description_from_classed_paragraph() {
        let html = r#"<p class="product-description hero">Emagreça com saúde</p>"#;
        assert_eq!(extract_description(html), "Emagreça com saúde");
    }

    #[test]
    fn test_price_keeps_currency_symbol() {
        assert_eq!(extract_price("Leve por R$ 197,00 hoje"), "R$ 197,00");
        assert_eq!(extract_price("Only $ 49.90 today"), "$ 49.90");
    }

    #[test]
    fn test_price_reais_suffix() {
        assert_eq!(extract_price("tudo isso por 97 reais"), "97 reais");
    }

    #[test]
    fn test_price_default() {
        assert_eq!(extract_price("<p>grátis?</p>"), product::DEFAULT_PRICE);
    }

    #[test]
    fn test_benefits_length_filter_and_cap() {
        let html = "<li>curto</li>\
                    <li>Acesso vitalício ao conteúdo</li>\
                    <li>Certificado de conclusão incluso</li>\
                    <li>Suporte direto com o autor</li>\
                    <li>Comunidade exclusiva de alunos</li>\
                    <li>Atualizações gratuitas para sempre</li>\
                    <li>Bônus de planilhas prontas</li>";
        let benefits = extract_benefits(html);
        assert_eq!(benefits.len(), 5);
        assert!(!benefits.contains(&"curto".to_string()));
    }

    #[test]
    fn test_benefits_wholesale_default() {
        let benefits = extract_benefits("<p>sem lista alguma</p>");
        assert_eq!(
            benefits,
            product::DEFAULT_BENEFITS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_testimonial_div_before_quote_heuristic() {
        let html = concat!(
            r#"<div class="testimonial">Mudou completamente a minha rotina de estudos</div>"#,
            r#" "Esse produto realmente entrega tudo aquilo que promete na página" - João"#,
        );
        let testimonials = extract_testimonials(html);
        assert_eq!(
            testimonials[0],
            "Mudou completamente a minha rotina de estudos"
        );
        assert_eq!(testimonials.len(), 2);
    }

    #[test]
    fn test_testimonial_minimum_length() {
        let html = r#"<blockquote>muito bom</blockquote>"#;
        let testimonials = extract_testimonials(html);
        assert_eq!(
            testimonials,
            product::DEFAULT_TESTIMONIALS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_cta_button_text() {
        assert_eq!(
            extract_cta(r#"<button class="buy">Quero Garantir</button>"#),
            "Quero Garantir"
        );
    }

    #[test]
    fn test_cta_phrase_fallback() {
        assert_eq!(extract_cta("<p>clique e compra agora mesmo</p>"), "compra agora");
    }

    #[test]
    fn test_cta_default() {
        assert_eq!(extract_cta("<p>nada</p>"), product::DEFAULT_CTA);
    }
}
