#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// One body element of a fixture document.
pub enum Block<'a> {
    /// Paragraph with an optional style id; `\n` in the text becomes `w:br`.
    Para(Option<&'a str>, &'a str),
    /// Table given as rows of cell texts.
    Table(Vec<Vec<&'a str>>),
}

pub fn para(text: &str) -> Block<'_> {
    Block::Para(None, text)
}

pub fn heading(text: &str) -> Block<'_> {
    Block::Para(Some("Heading1"), text)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn paragraph_xml(style: Option<&str>, text: &str) -> String {
    let ppr = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
        .unwrap_or_default();
    let runs: Vec<String> = text
        .split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)))
        .collect();
    format!("<w:p>{}<w:r>{}</w:r></w:p>", ppr, runs.join("<w:br/>"))
}

pub fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        match block {
            Block::Para(style, text) => body.push_str(&paragraph_xml(*style, text)),
            Block::Table(rows) => {
                body.push_str("<w:tbl>");
                for row in rows {
                    body.push_str("<w:tr>");
                    for cell in row {
                        body.push_str(&format!("<w:tc>{}</w:tc>", paragraph_xml(None, cell)));
                    }
                    body.push_str("</w:tr>");
                }
                body.push_str("</w:tbl>");
            }
        }
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

pub fn styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="{ns}"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style></w:styles>"#,
        ns = W_NS
    )
}

/// Write a `.docx` with the given parts into `dir/name`.
pub fn write_package(dir: &Path, name: &str, parts: &[(&str, String)]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (entry, content) in parts {
        zip.start_file(*entry, FileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// Write a styled `.docx` built from `blocks`.
pub fn write_docx(dir: &Path, name: &str, blocks: &[Block]) -> PathBuf {
    write_package(
        dir,
        name,
        &[
            ("word/document.xml", document_xml(blocks)),
            ("word/styles.xml", styles_xml()),
        ],
    )
}

pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
