// src/main.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docx_merge_rs::core::classifier::HeadingClassifier;
use docx_merge_rs::core::extractor::SectionExtractor;
use docx_merge_rs::core::parser::{DocxParser, Parser as _};
use docx_merge_rs::core::question_list::{read_questions, save_matched_headings};
use docx_merge_rs::utils::document_processor::{DocumentProcessor, HeadingSource, MergeRequest};
use docx_merge_rs::MergeConfig;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docx-merge", version, about = "Merge question sections between two .docx revisions")]
struct Cli {
    /// JSON file with thresholds and options
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct HeadingArgs {
    /// Question list, one per line, matched against the document
    #[arg(long)]
    questions: Option<PathBuf>,
    /// Matched-headings file written by `match`
    #[arg(long)]
    headings: Option<PathBuf>,
}

impl HeadingArgs {
    fn source(self) -> Result<HeadingSource> {
        match (self.questions, self.headings) {
            (Some(questions), _) => Ok(HeadingSource::Questions(questions)),
            (None, Some(headings)) => Ok(HeadingSource::Saved(headings)),
            (None, None) => anyhow::bail!("either --questions or --headings is required"),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Match questions against a document and save the matched heading lines
    Match {
        #[arg(long)]
        document: PathBuf,
        #[arg(long)]
        questions: PathBuf,
        #[arg(long, default_value = "matched_questions.txt")]
        out: PathBuf,
        /// Minimum fuzzy score, 0-100
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Replace base sections with their counterparts from the updated document
    Merge {
        #[arg(long)]
        base: PathBuf,
        #[arg(long)]
        updated: PathBuf,
        #[command(flatten)]
        headings: HeadingArgs,
        #[arg(long, default_value = "merged_report.docx")]
        out: PathBuf,
        /// Minimum fuzzy score, 0-100
        #[arg(long)]
        threshold: Option<u8>,
        /// Ignore headings found in table cells
        #[arg(long)]
        no_tables: bool,
        /// Print the merge report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the sections extracted from one document
    Sections {
        #[arg(long)]
        document: PathBuf,
        #[command(flatten)]
        headings: HeadingArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<MergeConfig> {
    let config = match path {
        Some(path) => MergeConfig::from_file(path)?,
        None => MergeConfig::default(),
    };
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Command::Match { document, questions, out, threshold } => {
            if let Some(threshold) = threshold {
                config.question_threshold = threshold;
            }
            config.validate()?;
            let processor = DocumentProcessor::new(config);
            let questions = read_questions(&questions)?;
            let matched = processor.match_questions_in(&document, &questions)?;
            save_matched_headings(&out, &matched)?;
            println!("Matched {} headings, saved to {}", matched.len(), out.display());
        }
        Command::Merge { base, updated, headings, out, threshold, no_tables, json } => {
            if let Some(threshold) = threshold {
                config.question_threshold = threshold;
            }
            if no_tables {
                config.scan_tables = false;
            }
            config.validate()?;
            let processor = DocumentProcessor::new(config);
            let request = MergeRequest {
                base,
                updated,
                headings: headings.source()?,
                output: out,
            };
            let report = processor.run(&request).context("merge failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Merged {} of {} sections into {}",
                    report.replaced_sections,
                    report.base_sections,
                    report.output.display()
                );
            }
        }
        Command::Sections { document, headings, json } => {
            config.validate()?;
            let processor = DocumentProcessor::new(config);
            let targets = processor.target_headings(&headings.source()?, &document)?;
            let parsed = DocxParser::new().parse(&document)?;
            let classifier = HeadingClassifier::new(&targets, processor.config().heading_threshold);
            let sections = SectionExtractor::new(&classifier)
                .scan_tables(processor.config().scan_tables)
                .extract(&parsed);
            info!(
                "{} paragraphs ({} heading-styled), {} tables, {} styles",
                parsed.paragraphs.len(),
                parsed.heading_count(),
                parsed.tables.len(),
                parsed.metadata.style_count
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for (heading, body) in sections.iter() {
                    println!("## {}", heading);
                    print!("{}", body);
                    println!();
                }
            }
        }
    }
    Ok(())
}
