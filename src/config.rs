use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;

pub const DEFAULT_QUESTION_THRESHOLD: u8 = 90;
pub const DEFAULT_HEADING_THRESHOLD: f64 = 0.95;
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.95;
pub const DEFAULT_HEADING_STYLE: &str = "Heading1";

/// Tunables for one merge run. Every field may be omitted from the JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    /// Minimum fuzzy score (0-100) for a question to claim a document line.
    pub question_threshold: u8,
    /// Minimum sequence similarity for a paragraph to count as a target heading.
    pub heading_threshold: f64,
    /// Minimum sequence similarity between base and updated headings.
    pub merge_threshold: f64,
    /// Also scan table cells for headings.
    pub scan_tables: bool,
    /// Style id the writer gives to heading paragraphs.
    pub heading_style: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            question_threshold: DEFAULT_QUESTION_THRESHOLD,
            heading_threshold: DEFAULT_HEADING_THRESHOLD,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            scan_tables: true,
            heading_style: DEFAULT_HEADING_STYLE.to_string(),
        }
    }
}

impl MergeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MergeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| MergeError::input(path, e))?;
        let config: MergeConfig = serde_json::from_str(&raw)
            .map_err(|e| MergeError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.question_threshold > 100 {
            return Err(MergeError::InvalidConfig(format!(
                "question_threshold must be within 0..=100, got {}",
                self.question_threshold
            )));
        }
        for (name, value) in [
            ("heading_threshold", self.heading_threshold),
            ("merge_threshold", self.merge_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MergeError::InvalidConfig(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        if self.heading_style.trim().is_empty() {
            return Err(MergeError::InvalidConfig("heading_style must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "question_threshold": 80, "scan_tables": false }}"#).unwrap();

        let config = MergeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.question_threshold, 80);
        assert!(!config.scan_tables);
        assert_eq!(config.merge_threshold, DEFAULT_MERGE_THRESHOLD);
        assert_eq!(config.heading_style, "Heading1");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let config = MergeConfig {
            merge_threshold: 1.5,
            ..MergeConfig::default()
        };
        assert!(matches!(config.validate(), Err(MergeError::InvalidConfig(_))));

        let config = MergeConfig {
            question_threshold: 101,
            ..MergeConfig::default()
        };
        assert!(matches!(config.validate(), Err(MergeError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let err = MergeConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MergeError::InputNotFound { .. }));
    }
}
