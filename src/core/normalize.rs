use once_cell::sync::Lazy;
use regex::Regex;

// `#` run with trailing whitespace and emphasis, or a bare emphasis run.
static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+\s*\**|\*+").unwrap());
static RULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{3,}").unwrap());

/// Canonical form used for every heading comparison.
///
/// Strips Markdown heading and emphasis markers, removes horizontal rules,
/// collapses all whitespace (line breaks included) to single spaces and
/// lowercases. `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let stripped = MARKUP_RE.replace_all(text, "");
    let stripped = RULE_RE.replace_all(&stripped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
