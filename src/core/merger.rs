use log::{debug, info, warn};
use serde::Serialize;

use crate::core::sections::SectionMap;
use crate::core::similarity::sequence_ratio;
use crate::error::MergeError;

/// A base section whose body was taken from the updated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replacement {
    pub base_heading: String,
    pub updated_heading: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub sections: SectionMap,
    pub replacements: Vec<Replacement>,
}

/// Most similar candidate at or above `threshold`, compared on the raw strings.
///
/// Only a strictly higher score displaces the current best, so the first of
/// equally good candidates wins.
pub fn find_best_match<'a, I>(heading: &str, candidates: I, threshold: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;
    let mut highest = 0.0;
    for candidate in candidates {
        let similarity = sequence_ratio(heading, candidate);
        if similarity > highest && similarity >= threshold {
            highest = similarity;
            best = Some((candidate, similarity));
        }
    }
    best
}

/// Replace each base body with the body of its best-matching updated heading.
///
/// The merged map has exactly the base headings, in base order. Both inputs
/// must hold at least one section.
pub fn merge_sections(
    base: &SectionMap,
    updated: &SectionMap,
    threshold: f64,
) -> Result<MergeOutcome, MergeError> {
    if base.is_empty() || updated.is_empty() {
        return Err(MergeError::NoSectionsExtracted {
            base: base.len(),
            updated: updated.len(),
        });
    }

    let mut merged = base.clone();
    let mut replacements = Vec::new();
    for heading in base.headings() {
        match find_best_match(heading, updated.headings(), threshold) {
            Some((candidate, similarity)) => {
                let body = updated.get(candidate).unwrap_or_default();
                merged.replace_body(heading, body);
                debug!("replacing section '{}' with '{}' ({:.2})", heading, candidate, similarity);
                replacements.push(Replacement {
                    base_heading: heading.to_string(),
                    updated_heading: candidate.to_string(),
                    similarity,
                });
            }
            None => warn!("no updated section for '{}', keeping base text", heading),
        }
    }

    info!("replaced {} of {} sections", replacements.len(), base.len());
    Ok(MergeOutcome {
        sections: merged,
        replacements,
    })
}
