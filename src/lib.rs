pub mod core {
    pub mod normalize;
    pub mod similarity;
    pub mod sections;
    pub mod classifier;
    pub mod extractor;
    pub mod matcher;
    pub mod merger;
    pub mod question_list;
    pub mod layout;
    pub mod parser;
    pub mod writer;
}

pub mod utils {
    pub mod document_processor;
}

pub mod config;
pub mod error;

pub use config::MergeConfig;
pub use error::MergeError;

use serde::{Deserialize, Serialize};

/// One body-level paragraph as read from the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    pub id: i32,
    pub raw_text: String,
    pub style: StyleCategory,
    /// Style name as reported by the store, kept for diagnostics only.
    pub style_name: Option<String>,
}

impl Paragraph {
    pub fn new(id: i32, raw_text: impl Into<String>, style_name: Option<String>) -> Self {
        let style = StyleCategory::from_style_name(style_name.as_deref());
        Self {
            id,
            raw_text: raw_text.into(),
            style,
            style_name,
        }
    }
}

/// Structural style hint, resolved once when the paragraph is read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StyleCategory {
    Heading,
    Body,
    Unknown,
}

impl StyleCategory {
    pub fn from_style_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if name.contains("Heading") => StyleCategory::Heading,
            Some(_) => StyleCategory::Body,
            None => StyleCategory::Unknown,
        }
    }

    pub fn is_heading(self) -> bool {
        self == StyleCategory::Heading
    }
}

/// A body-level table: rows of cell texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: i32,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flat_map(|row| row.iter().map(String::as_str))
    }
}
