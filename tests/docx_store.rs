mod common;

use common::{heading, para, write_docx, write_package, Block};
use docx_merge_rs::core::parser::{DocxParser, Parser};
use docx_merge_rs::core::sections::SectionMap;
use docx_merge_rs::core::writer::{DocxWriter, Writer};
use docx_merge_rs::{MergeError, StyleCategory};
use tempfile::TempDir;

#[test]
fn reads_paragraph_text_styles_and_tables() {
    let tmp = TempDir::new().unwrap();
    let path = write_docx(
        tmp.path(),
        "base.docx",
        &[
            heading("1. Overview"),
            para("first line\nsecond line"),
            Block::Para(Some("ListParagraph"), "- item"),
            Block::Para(Some("Missing7"), "dangling style"),
            Block::Table(vec![vec!["2. Risks", "detail"], vec!["a", "b"]]),
            para("after table"),
        ],
    );

    let doc = DocxParser::new().parse(&path).unwrap();
    let texts: Vec<_> = doc.paragraphs.iter().map(|p| p.raw_text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["1. Overview", "first line\nsecond line", "- item", "dangling style", "after table"]
    );

    let styles: Vec<_> = doc.paragraphs.iter().map(|p| p.style).collect();
    assert_eq!(
        styles,
        vec![
            StyleCategory::Heading,
            StyleCategory::Body,
            StyleCategory::Body,
            StyleCategory::Body,
            StyleCategory::Body
        ]
    );
    assert_eq!(doc.paragraphs[0].style_name.as_deref(), Some("Heading 1"));
    assert_eq!(doc.paragraphs[3].style_name.as_deref(), Some("Missing7"));

    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0].rows, vec![vec!["2. Risks", "detail"], vec!["a", "b"]]);
    assert_eq!(doc.metadata.file_path, path.to_string_lossy());
    assert!(doc.metadata.file_size > 0);
}

#[test]
fn package_without_styles_reports_unknown_style() {
    let tmp = TempDir::new().unwrap();
    let path = write_package(
        tmp.path(),
        "bare.docx",
        &[("word/document.xml", common::document_xml(&[para("plain")]))],
    );

    let doc = DocxParser::new().parse(&path).unwrap();
    assert_eq!(doc.paragraphs[0].style, StyleCategory::Unknown);
    assert_eq!(doc.paragraphs[0].style_name, None);
}

#[test]
fn missing_file_is_input_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = DocxParser::new().parse(tmp.path().join("absent.docx")).unwrap_err();
    assert!(matches!(err, MergeError::InputNotFound { .. }));
}

#[test]
fn broken_packages_are_parse_errors() {
    let tmp = TempDir::new().unwrap();

    let not_zip = common::write_text(tmp.path(), "not_zip.docx", "plain text");
    let err = DocxParser::new().parse(&not_zip).unwrap_err();
    assert!(err.is_recoverable_parse(), "{}", err);

    let no_document = write_package(tmp.path(), "empty.docx", &[("word/styles.xml", common::styles_xml())]);
    let err = DocxParser::new().parse(&no_document).unwrap_err();
    assert!(matches!(err, MergeError::DocumentParse { .. }));

    let bad_xml = write_package(tmp.path(), "bad.docx", &[("word/document.xml", "<w:document".to_string())]);
    assert!(DocxParser::new().parse(&bad_xml).unwrap_err().is_recoverable_parse());
}

#[test]
fn written_document_reads_back_as_heading_body_pairs() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("merged.docx");
    let sections: SectionMap = [
        ("1. Overview", "new overview\nsecond <line>\n"),
        ("2. Scope", ""),
    ]
    .into_iter()
    .collect();

    DocxWriter::default().write_sections(&sections, &out).unwrap();

    let doc = DocxParser::new().parse(&out).unwrap();
    let read: Vec<_> = doc
        .paragraphs
        .iter()
        .map(|p| (p.style, p.raw_text.as_str()))
        .collect();
    assert_eq!(
        read,
        vec![
            (StyleCategory::Heading, "1. Overview"),
            (StyleCategory::Body, "new overview\nsecond <line>\n"),
            (StyleCategory::Heading, "2. Scope"),
            (StyleCategory::Body, ""),
        ]
    );
    assert_eq!(doc.paragraphs[0].style_name.as_deref(), Some("Heading 1"));
}

#[test]
fn failed_write_leaves_no_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("no_such_dir").join("merged.docx");
    let sections: SectionMap = [("A", "b")].into_iter().collect();

    let err = DocxWriter::default().write_sections(&sections, &out).unwrap_err();
    assert!(matches!(err, MergeError::Write { .. }));
    assert!(!out.exists());
}
