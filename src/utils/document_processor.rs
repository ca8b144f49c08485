use crate::config::MergeConfig;
use crate::core::classifier::HeadingClassifier;
use crate::core::extractor::SectionExtractor;
use crate::core::matcher::match_questions;
use crate::core::merger::{merge_sections, MergeOutcome, Replacement};
use crate::core::parser::{DocxParser, Parser};
use crate::core::question_list::{load_matched_headings, read_questions};
use crate::core::sections::{SectionMap, TargetHeadingSet};
use crate::core::writer::{DocxWriter, Writer};
use crate::error::MergeError;
use log::{error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where the target headings of a run come from.
#[derive(Debug, Clone)]
pub enum HeadingSource {
    /// Question list matched against the base document.
    Questions(PathBuf),
    /// Matched-headings file saved by an earlier run.
    Saved(PathBuf),
}

#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub base: PathBuf,
    pub updated: PathBuf,
    pub headings: HeadingSource,
    pub output: PathBuf,
}

/// Summary of a finished merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub matched_headings: usize,
    pub base_sections: usize,
    pub updated_sections: usize,
    pub replaced_sections: usize,
    pub replacements: Vec<Replacement>,
    pub output: PathBuf,
}

pub struct DocumentProcessor {
    parser: DocxParser,
    writer: DocxWriter,
    config: MergeConfig,
}

impl DocumentProcessor {
    pub fn new(config: MergeConfig) -> Self {
        Self {
            parser: DocxParser::new(),
            writer: DocxWriter::new(config.heading_style.clone()),
            config,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Match questions against the lines of `document`.
    ///
    /// An empty result is logged, not returned as an error: style-tagged
    /// headings can still partition the documents.
    pub fn match_questions_in<P: AsRef<Path>>(
        &self,
        document: P,
        questions: &[String],
    ) -> Result<TargetHeadingSet, MergeError> {
        let document = self.parser.parse(document)?;
        let lines = document.lines();
        info!("matching {} questions against {} lines", questions.len(), lines.len());

        let matched = match_questions(questions, &lines, self.config.question_threshold);
        if matched.is_empty() {
            warn!("{}", MergeError::NoQualifyingMatches);
        }
        Ok(matched)
    }

    /// Resolve the target heading set for a request.
    pub fn target_headings(&self, source: &HeadingSource, base: &Path) -> Result<TargetHeadingSet, MergeError> {
        match source {
            HeadingSource::Questions(path) => {
                let questions = read_questions(path)?;
                self.match_questions_in(base, &questions)
            }
            HeadingSource::Saved(path) => load_matched_headings(path),
        }
    }

    /// Extract the sections of one document.
    ///
    /// A document that cannot be parsed yields an empty map; a missing one is an error.
    pub fn extract<P: AsRef<Path>>(&self, path: P, targets: &TargetHeadingSet) -> Result<SectionMap, MergeError> {
        let path = path.as_ref();
        let document = match self.parser.parse(path) {
            Ok(document) => document,
            Err(e) if e.is_recoverable_parse() => {
                error!("Error extracting sections from {}: {}", path.display(), e);
                return Ok(SectionMap::new());
            }
            Err(e) => return Err(e),
        };
        let classifier = HeadingClassifier::new(targets, self.config.heading_threshold);
        Ok(SectionExtractor::new(&classifier)
            .scan_tables(self.config.scan_tables)
            .extract(&document))
    }

    /// Extract both documents (in parallel) and merge them.
    pub fn merge_files<P: AsRef<Path> + Sync>(
        &self,
        base: P,
        updated: P,
        targets: &TargetHeadingSet,
    ) -> Result<(MergeOutcome, usize), MergeError> {
        info!("extracting sections from {} and {}", base.as_ref().display(), updated.as_ref().display());
        let (base_sections, updated_sections) = rayon::join(
            || self.extract(base.as_ref(), targets),
            || self.extract(updated.as_ref(), targets),
        );
        let (base_sections, updated_sections) = (base_sections?, updated_sections?);

        if base_sections.is_empty() || updated_sections.is_empty() {
            error!("Unable to process documents! Check the format and try again.");
        }
        let outcome = merge_sections(&base_sections, &updated_sections, self.config.merge_threshold)?;
        Ok((outcome, updated_sections.len()))
    }

    /// Full run: headings, extraction, merge, atomic write.
    pub fn run(&self, request: &MergeRequest) -> Result<MergeReport, MergeError> {
        info!("Starting merge of {} with {}", request.base.display(), request.updated.display());

        let targets = self.target_headings(&request.headings, &request.base)?;
        let (outcome, updated_sections) = self.merge_files(&request.base, &request.updated, &targets)?;

        self.writer.write_sections(&outcome.sections, &request.output)?;
        info!("Merged document saved to {}", request.output.display());

        Ok(MergeReport {
            matched_headings: targets.len(),
            base_sections: outcome.sections.len(),
            updated_sections,
            replaced_sections: outcome.replacements.len(),
            replacements: outcome.replacements,
            output: request.output.clone(),
        })
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(MergeConfig::default())
    }
}
