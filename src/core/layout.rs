use crate::{Paragraph, Table};

/// In-memory document as handed over by the document store.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
    pub metadata: DocumentMetadata,
}

/// Additional metadata about the parsed document
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub style_count: usize,
}

impl Document {
    /// Build a document straight from paragraphs (no tables, no metadata).
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            ..Self::default()
        }
    }

    /// Paragraph texts joined by newlines and split back into lines.
    ///
    /// Blank lines are kept so line positions follow the document.
    pub fn lines(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(|p| p.raw_text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// Paragraphs whose style marks them as headings.
    pub fn heading_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.style.is_heading()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_split_embedded_breaks() {
        let doc = Document::from_paragraphs(vec![
            Paragraph::new(1, "Title", Some("Heading 1".into())),
            Paragraph::new(2, "first\nsecond", Some("Normal".into())),
            Paragraph::new(3, "", None),
        ]);
        assert_eq!(doc.lines(), vec!["Title", "first", "second", ""]);
        assert_eq!(doc.heading_count(), 1);
    }
}
