use log::{debug, trace};

use crate::config::DEFAULT_HEADING_THRESHOLD;
use crate::core::normalize::normalize;
use crate::core::sections::TargetHeadingSet;
use crate::core::similarity::sequence_ratio;

/// Similarity at which a rejected comparison is still worth a debug line.
const NEAR_MISS: f64 = 0.90;

/// Decides whether a text fragment is one of the target headings.
///
/// Target headings are normalized once up front; each candidate is normalized
/// and compared against all of them.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    targets: Vec<String>,
    threshold: f64,
}

impl HeadingClassifier {
    pub fn new(targets: &TargetHeadingSet, threshold: f64) -> Self {
        Self {
            targets: targets.iter().map(normalize).collect(),
            threshold,
        }
    }

    pub fn is_heading(&self, text: &str) -> bool {
        let candidate = normalize(text);
        for target in &self.targets {
            if candidate == *target {
                trace!("exact heading match: '{}'", candidate);
                return true;
            }
            let similarity = sequence_ratio(&candidate, target);
            if similarity >= self.threshold {
                debug!("heading match: '{}' ~ '{}' ({:.2})", candidate, target, similarity);
                return true;
            }
            if similarity >= NEAR_MISS {
                debug!("near miss: '{}' ~ '{}' ({:.2})", candidate, target, similarity);
            }
        }
        false
    }
}

/// One-shot check with the default 0.95 threshold.
pub fn is_heading(text: &str, targets: &TargetHeadingSet) -> bool {
    HeadingClassifier::new(targets, DEFAULT_HEADING_THRESHOLD).is_heading(text)
}
