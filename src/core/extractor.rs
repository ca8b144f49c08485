use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::classifier::HeadingClassifier;
use crate::core::layout::Document;
use crate::core::sections::SectionMap;

// A `#### ` heading line that is followed by a line break inside the paragraph.
static EMBEDDED_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(#### .*?)\n").unwrap());

/// Split paragraph text around embedded `#### ` heading lines.
///
/// Heading lines are returned as their own segments (without the line break),
/// interleaved with the text between them, in document order. Segments are
/// not trimmed and may be empty.
pub fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in EMBEDDED_HEADING_RE.captures_iter(text) {
        let (Some(whole), Some(heading)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(&text[last..whole.start()]);
        segments.push(heading.as_str());
        last = whole.end();
    }
    segments.push(&text[last..]);
    segments
}

/// Partitions a document into heading → body sections.
pub struct SectionExtractor<'a> {
    classifier: &'a HeadingClassifier,
    scan_tables: bool,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(classifier: &'a HeadingClassifier) -> Self {
        Self {
            classifier,
            scan_tables: true,
        }
    }

    pub fn scan_tables(mut self, scan_tables: bool) -> Self {
        self.scan_tables = scan_tables;
        self
    }

    pub fn extract(&self, document: &Document) -> SectionMap {
        let mut sections = SectionMap::new();
        let mut current: Option<String> = None;

        for para in &document.paragraphs {
            let text = para.raw_text.trim();
            for segment in split_segments(text) {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                if para.style.is_heading() || self.classifier.is_heading(segment) {
                    debug!("found heading '{}' (style: {:?})", segment, para.style_name);
                    sections.start_section(segment);
                    current = Some(segment.to_string());
                } else if let Some(heading) = current.as_deref() {
                    sections.append(heading, segment);
                    sections.append(heading, "\n");
                }
            }
        }

        // Headings found in table cells open empty sections; cell text is never
        // accumulated as body.
        if self.scan_tables {
            for table in &document.tables {
                for cell in table.cells() {
                    let cell = cell.trim();
                    if self.classifier.is_heading(cell) {
                        debug!("found heading in table {}: '{}'", table.id, cell);
                        sections.start_section(cell);
                    }
                }
            }
        }

        info!(
            "extracted {} sections from {}",
            sections.len(),
            if document.metadata.file_path.is_empty() { "<memory>" } else { &document.metadata.file_path }
        );
        sections
    }
}
