//! String similarity scorers.
//!
//! [`sequence_ratio`] compares normalized headings on a 0..=1 scale.
//! [`fuzzy_ratio`] scores free-form questions against document lines on a
//! 0..=100 scale and tolerates case, punctuation, word order and a line that
//! carries extra trailing text. Both are symmetric and score identical
//! non-empty inputs as a perfect match.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, over chars.
///
/// Two empty strings are identical and score 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Weighted fuzzy score in 0..=100.
///
/// Both inputs are lowercased and stripped of punctuation first. Similar
/// lengths are scored by the best of the plain, token-sorted and token-set
/// ratios. When one side is at least 1.5x longer the best word-aligned window
/// of the longer side also counts, scaled down by 0.9 (0.6 past 8x).
pub fn fuzzy_ratio(a: &str, b: &str) -> u8 {
    if a == b && !a.is_empty() {
        return 100;
    }
    let a = process(a);
    let b = process(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    const UNBASE_SCALE: f64 = 0.95;
    let base = ratio_pct(&a, &b);
    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if len_ratio < 1.5 {
        let sorted = token_sort_ratio(&a, &b, false) * UNBASE_SCALE;
        let set = token_set_ratio(&a, &b, false) * UNBASE_SCALE;
        base.max(sorted).max(set)
    } else {
        let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
        let partial = partial_ratio(&a, &b) * partial_scale;
        let sorted = token_sort_ratio(&a, &b, true) * UNBASE_SCALE * partial_scale;
        let set = token_set_ratio(&a, &b, true) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(sorted).max(set)
    };
    best.round().clamp(0.0, 100.0) as u8
}

fn process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.trim().to_lowercase()
}

fn ratio_pct(a: &str, b: &str) -> f64 {
    (sequence_ratio(a, b) * 100.0).round()
}

/// Best ratio of the shorter string against equally long windows of the
/// longer one. Windows start at word starts; one that would run past the end
/// is pulled back to end at the last char.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let width = shorter.chars().count();
    if width == 0 {
        return 0.0;
    }

    let chars: Vec<char> = longer.chars().collect();
    let offsets: Vec<usize> = longer
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(longer.len()))
        .collect();
    let last = chars.len() - width;

    let mut starts: BTreeSet<usize> = (0..chars.len())
        .filter(|&i| !chars[i].is_whitespace() && (i == 0 || chars[i - 1].is_whitespace()))
        .map(|i| i.min(last))
        .collect();
    if starts.is_empty() {
        starts.insert(0);
    }

    let mut best = 0.0f64;
    for start in starts {
        let window = &longer[offsets[start]..offsets[start + width]];
        let score = normalized_levenshtein(shorter, window);
        if score >= 1.0 {
            return 100.0;
        }
        best = best.max(score);
    }
    (best * 100.0).round()
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn score(a: &str, b: &str, partial: bool) -> f64 {
    if partial {
        partial_ratio(a, b)
    } else {
        ratio_pct(a, b)
    }
}

fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let a = sorted_tokens(a).join(" ");
    let b = sorted_tokens(b).join(" ");
    score(&a, &b, partial)
}

fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    let join = |tokens: Vec<&str>| tokens.join(" ");

    let common = join(set_a.intersection(&set_b).copied().collect());
    let only_a = join(set_a.difference(&set_b).copied().collect());
    let only_b = join(set_b.difference(&set_a).copied().collect());

    let combined_a = format!("{} {}", common, only_a).trim().to_string();
    let combined_b = format!("{} {}", common, only_b).trim().to_string();

    let mut best = score(&combined_a, &combined_b, partial);
    if !common.is_empty() {
        best = best
            .max(score(&common, &combined_a, partial))
            .max(score(&common, &combined_b, partial));
    }
    best
}
