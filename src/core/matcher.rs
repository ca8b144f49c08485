use log::{debug, info};

use crate::core::sections::TargetHeadingSet;
use crate::core::similarity::fuzzy_ratio;

/// Keep a question up to and including its first `?`.
pub fn preprocess_question(question: &str) -> &str {
    match question.find('?') {
        Some(pos) => &question[..=pos],
        None => question,
    }
}

/// Best-scoring line for `question`; the first line wins a tie.
pub fn best_line<'a, S: AsRef<str>>(question: &str, lines: &'a [S]) -> Option<(&'a str, u8)> {
    let mut best: Option<(&str, u8)> = None;
    for line in lines {
        let line = line.as_ref();
        let score = fuzzy_ratio(question, line);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((line, score));
        }
    }
    best
}

/// Map each question onto the document line that represents it.
///
/// A question contributes its best line when that line scores at least
/// `threshold` (0-100); otherwise it is dropped silently.
pub fn match_questions<Q: AsRef<str>, L: AsRef<str>>(
    questions: &[Q],
    lines: &[L],
    threshold: u8,
) -> TargetHeadingSet {
    let mut matched = TargetHeadingSet::new();
    for question in questions {
        let processed = preprocess_question(question.as_ref());
        match best_line(processed, lines) {
            Some((line, score)) if score >= threshold => {
                debug!("question '{}' -> '{}' ({})", processed, line, score);
                matched.insert(line);
            }
            Some((line, score)) => {
                debug!("question '{}' best '{}' ({}) below {}", processed, line, score, threshold);
            }
            None => debug!("question '{}' matched no line", processed),
        }
    }
    info!("matched {} of {} questions", matched.len(), questions.len());
    matched
}
