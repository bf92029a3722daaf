//! Typed extraction rules with explicit, ordered precedence.
//!
//! Each product field owns an ordered list of rule objects. Evaluation walks
//! the list and stops at the first rule that matches anything — no scoring,
//! no combination of partial matches. Keeping precedence as a data structure
//! (rather than implicit code order) makes it directly testable.

use regex::Regex;

/// What a single-value rule yields on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The first capture group.
    Group,
    /// The entire matched substring, e.g. a price with its currency symbol.
    WholeMatch,
}

/// One ordered rule for a single-value field.
#[derive(Debug)]
pub struct FieldRule {
    pattern: Regex,
    capture: Capture,
}

impl FieldRule {
    /// Rule returning its first capture group.
    pub fn group(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("field rule pattern is valid"),
            capture: Capture::Group,
        }
    }

    /// Rule returning the whole matched token unmodified.
    pub fn whole(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("field rule pattern is valid"),
            capture: Capture::WholeMatch,
        }
    }

    /// Apply the rule. Returns the trimmed value, or `None` when the pattern
    /// does not match or the match trims to nothing.
    pub fn try_match(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let raw = match self.capture {
            Capture::Group => caps.get(1)?.as_str(),
            Capture::WholeMatch => caps.get(0)?.as_str(),
        };
        let value = raw.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// Ordered rule list for a single-value field, plus its default.
#[derive(Debug)]
pub struct FieldSpec {
    rules: Vec<FieldRule>,
    default: &'static str,
    /// Maximum value length in characters; longer matches are truncated.
    max_len: Option<usize>,
}

impl FieldSpec {
    pub fn new(rules: Vec<FieldRule>, default: &'static str) -> Self {
        Self {
            rules,
            default,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// First rule that matches anything wins; otherwise the default.
    pub fn extract(&self, html: &str) -> String {
        for rule in &self.rules {
            if let Some(value) = rule.try_match(html) {
                return match self.max_len {
                    Some(max) => truncate_chars(&value, max),
                    None => value,
                };
            }
        }
        self.default.to_string()
    }
}

/// One rule for a list field. All occurrences are collected, not just the
/// first.
#[derive(Debug)]
pub struct ListRule {
    pattern: Regex,
}

impl ListRule {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("list rule pattern is valid"),
        }
    }

    /// Iterate every capture of the rule over the text, trimmed.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// Ordered rule list for a list field: rules are applied in sequence and
/// their matches accumulated into one list until the cap is reached.
#[derive(Debug)]
pub struct ListSpec {
    rules: Vec<ListRule>,
    defaults: &'static [&'static str],
    /// Maximum number of accepted items.
    cap: usize,
    /// Minimum accepted item length in characters.
    min_item_len: usize,
    /// Maximum accepted item length in characters, if bounded.
    max_item_len: Option<usize>,
}

impl ListSpec {
    pub fn new(
        rules: Vec<ListRule>,
        defaults: &'static [&'static str],
        cap: usize,
        min_item_len: usize,
        max_item_len: Option<usize>,
    ) -> Self {
        Self {
            rules,
            defaults,
            cap,
            min_item_len,
            max_item_len,
        }
    }

    /// Accumulate matches across all rules. Candidates outside the length
    /// bounds are skipped; duplicates are accepted as found. An empty result
    /// after exhausting every rule substitutes the complete default list.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let mut items = Vec::new();
        'rules: for rule in &self.rules {
            for candidate in rule.matches(html) {
                if items.len() >= self.cap {
                    break 'rules;
                }
                let len = candidate.chars().count();
                if len < self.min_item_len {
                    continue;
                }
                if let Some(max) = self.max_item_len {
                    if len > max {
                        continue;
                    }
                }
                items.push(candidate);
            }
        }

        if items.is_empty() {
            self.defaults.iter().map(|s| s.to_string()).collect()
        } else {
            items
        }
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_rule_wins() {
        let spec = FieldSpec::new(
            vec![
                FieldRule::group(r"(?i)<em>([^<]+)</em>"),
                FieldRule::group(r"(?i)<b>([^<]+)</b>"),
            ],
            "padrão",
        );
        assert_eq!(spec.extract("<b>segundo</b> <em>primeiro</em>"), "primeiro");
    }

    #[test]
    fn test_default_when_no_rule_matches() {
        let spec = FieldSpec::new(vec![FieldRule::group(r"(?i)<em>([^<]+)</em>")], "padrão");
        assert_eq!(spec.extract("nada aqui"), "padrão");
    }

    #[test]
    fn test_whole_match_keeps_surrounding_token() {
        let rule = FieldRule::whole(r"R\$\s*\d+(?:,\d{2})?");
        assert_eq!(rule.try_match("por R$ 97,00 hoje"), Some("R$ 97,00".into()));
    }

    #[test]
    fn test_empty_match_is_a_miss() {
        let rule = FieldRule::group(r"<i>([^<]*)</i>");
        assert_eq!(rule.try_match("<i>   </i>"), None);
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let spec =
            FieldSpec::new(vec![FieldRule::group(r"<t>([^<]+)</t>")], "x").with_max_len(4);
        assert_eq!(spec.extract("<t>açaí e mais</t>"), "açaí");
    }

    #[test]
    fn test_list_cap_and_length_filter() {
        let spec = ListSpec::new(
            vec![ListRule::new(r"(?i)<li[^>]*>([^<]+)</li>")],
            &["padrão"],
            2,
            5,
            Some(20),
        );
        let html = "<li>ok item um</li><li>no</li><li>ok item dois</li><li>ok item três</li>";
        assert_eq!(spec.extract(html), vec!["ok item um", "ok item dois"]);
    }

    #[test]
    fn test_list_wholesale_default() {
        let spec = ListSpec::new(
            vec![ListRule::new(r"(?i)<li[^>]*>([^<]+)</li>")],
            &["um", "dois"],
            5,
            3,
            None,
        );
        assert_eq!(spec.extract("<p>sem listas</p>"), vec!["um", "dois"]);
    }

    #[test]
    fn test_list_duplicates_accepted_as_found() {
        let spec = ListSpec::new(
            vec![ListRule::new(r"(?i)<li[^>]*>([^<]+)</li>")],
            &["padrão"],
            5,
            3,
            None,
        );
        let html = "<li>repetido</li><li>repetido</li>";
        assert_eq!(spec.extract(html), vec!["repetido", "repetido"]);
    }
}
