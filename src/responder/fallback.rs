//! Deterministic keyword-routed reply templates.
//!
//! Pure function of the user message and the product record — no model, no
//! randomness, no external dependency. The message is lower-cased and tested
//! against four mutually-exclusive topic buckets in priority order; the
//! first bucket whose keywords appear wins, so a message asking about price
//! *and* benefits gets the price answer.

use crate::product::ProductRecord;

const PRICE_KEYWORDS: [&str; 3] = ["preço", "valor", "custa"];
const BENEFIT_KEYWORDS: [&str; 3] = ["benefício", "vantagem", "o que"];
const MECHANISM_KEYWORDS: [&str; 2] = ["funciona", "como"];
const GUARANTEE_KEYWORDS: [&str; 2] = ["garantia", "seguro"];

/// Compose a reply from the record alone.
pub fn compose(message: &str, record: &ProductRecord) -> String {
    let lower = message.to_lowercase();

    if contains_any(&lower, &PRICE_KEYWORDS) {
        return format!(
            "O investimento para adquirir \"{}\" é {}. É um valor muito justo \
             considerando todos os benefícios que você vai receber: {}. {}!",
            record.title,
            record.price,
            join_first(&record.benefits, 2, " e "),
            record.cta,
        );
    }

    if contains_any(&lower, &BENEFIT_KEYWORDS) {
        return format!(
            "Os principais benefícios de \"{}\" são: {}. {} Não perca essa oportunidade!",
            record.title,
            record.benefits.join(", "),
            record.description,
        );
    }

    if contains_any(&lower, &MECHANISM_KEYWORDS) {
        return format!(
            "\"{}\" funciona de forma simples e eficaz. {} Você terá acesso a: {}. \
             {} e comece a ver resultados!",
            record.title,
            record.description,
            join_first(&record.benefits, 3, ", "),
            record.cta,
        );
    }

    if contains_any(&lower, &GUARANTEE_KEYWORDS) {
        return format!(
            "Sim! \"{}\" oferece total garantia de satisfação. {} Você pode adquirir \
             com total segurança. {}!",
            record.title,
            first_testimonial(record),
            record.cta,
        );
    }

    // No bucket matched: generic composite reply.
    format!(
        "\"{}\" é realmente incrível! {} Os principais benefícios incluem: {}. {} \
         {} e transforme seus resultados!",
        record.title,
        record.description,
        join_first(&record.benefits, 2, " e "),
        first_testimonial(record),
        record.cta,
    )
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

fn join_first(items: &[String], n: usize, sep: &str) -> String {
    items[..items.len().min(n)].join(sep)
}

/// The record invariant guarantees at least one testimonial, but the
/// composer stays total even on a hand-built record.
fn first_testimonial(record: &ProductRecord) -> &str {
    record
        .testimonials
        .first()
        .map(String::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductRecord;

    fn sample_record() -> ProductRecord {
        ProductRecord {
            title: "SuperCurso".into(),
            description: "Aprenda rápido.".into(),
            price: "R$ 97,00".into(),
            benefits: vec![
                "Aulas práticas".into(),
                "Suporte dedicado".into(),
                "Acesso vitalício".into(),
                "Certificado".into(),
            ],
            testimonials: vec!["Melhor curso que já fiz - Ana".into()],
            cta: "Garanta sua vaga".into(),
            url: "https://curso.example".into(),
        }
    }

    #[test]
    fn test_price_bucket_uses_price_and_two_benefits() {
        let reply = compose("Quanto custa isso?", &sample_record());
        assert!(reply.contains("R$ 97,00"));
        assert!(reply.contains("Aulas práticas e Suporte dedicado"));
        assert!(!reply.contains("Acesso vitalício"));
    }

    #[test]
    fn test_price_beats_benefits_on_mixed_message() {
        let reply = compose("qual o preço e quais os benefícios", &sample_record());
        assert!(reply.starts_with("O investimento"));
    }

    #[test]
    fn test_benefit_bucket_lists_everything() {
        let reply = compose("Quais os benefícios?", &sample_record());
        assert!(reply.contains("Aulas práticas, Suporte dedicado, Acesso vitalício, Certificado"));
        assert!(reply.contains("Aprenda rápido."));
    }

    #[test]
    fn test_mechanism_bucket_takes_three_benefits() {
        let reply = compose("como isso funciona na prática?", &sample_record());
        assert!(reply.contains("Aulas práticas, Suporte dedicado, Acesso vitalício"));
        assert!(!reply.contains("Certificado"));
    }

    #[test]
    fn test_guarantee_bucket_quotes_first_testimonial() {
        let reply = compose("Tem garantia?", &sample_record());
        assert!(reply.contains("Melhor curso que já fiz - Ana"));
        assert!(reply.contains("Garanta sua vaga"));
    }

    #[test]
    fn test_routing_is_case_insensitive() {
        let upper = compose("QUANTO CUSTA?", &sample_record());
        let lower = compose("quanto custa?", &sample_record());
        assert_eq!(upper, lower);
        assert!(upper.starts_with("O investimento"));
    }

    #[test]
    fn test_default_composite_reply() {
        let reply = compose("olá!", &sample_record());
        assert!(reply.contains("é realmente incrível"));
        assert!(reply.contains("Aulas práticas e Suporte dedicado"));
        assert!(reply.contains("Melhor curso que já fiz - Ana"));
    }

    #[test]
    fn test_deterministic() {
        let record = sample_record();
        assert_eq!(compose("tem garantia?", &record), compose("tem garantia?", &record));
    }
}
