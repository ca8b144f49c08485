use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Raw document lines that stand for the caller's questions.
///
/// Membership tests go through the heading classifier, never through `contains`
/// on the raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHeadingSet(BTreeSet<String>);

impl TargetHeadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, heading: impl Into<String>) -> bool {
        self.0.insert(heading.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetHeadingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// Heading → body text, in order of first appearance.
///
/// Starting a heading that already exists clears its body but keeps its
/// original position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionMap {
    sections: Vec<Section>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reopen) a section with an empty body.
    pub fn start_section(&mut self, heading: &str) {
        match self.index.get(heading) {
            Some(&pos) => self.sections[pos].body.clear(),
            None => {
                self.index.insert(heading.to_string(), self.sections.len());
                self.sections.push(Section {
                    heading: heading.to_string(),
                    body: String::new(),
                });
            }
        }
    }

    /// Append to an existing section. Returns false when `heading` is unknown.
    pub fn append(&mut self, heading: &str, text: &str) -> bool {
        match self.index.get(heading) {
            Some(&pos) => {
                self.sections[pos].body.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Overwrite the body of an existing section. Returns false when `heading` is unknown.
    pub fn replace_body(&mut self, heading: &str, body: &str) -> bool {
        match self.index.get(heading) {
            Some(&pos) => {
                self.sections[pos].body = body.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, heading: &str) -> Option<&str> {
        self.index.get(heading).map(|&pos| self.sections[pos].body.as_str())
    }

    pub fn contains(&self, heading: &str) -> bool {
        self.index.contains_key(heading)
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.heading.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|s| (s.heading.as_str(), s.body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl PartialEq for SectionMap {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl Eq for SectionMap {}

impl<H: AsRef<str>, B: AsRef<str>> FromIterator<(H, B)> for SectionMap {
    /// Later pairs with a repeated heading overwrite the earlier body in place.
    fn from_iter<I: IntoIterator<Item = (H, B)>>(iter: I) -> Self {
        let mut map = SectionMap::new();
        for (heading, body) in iter {
            map.start_section(heading.as_ref());
            map.append(heading.as_ref(), body.as_ref());
        }
        map
    }
}
