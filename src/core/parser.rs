use crate::core::layout::{Document, DocumentMetadata};
use crate::error::MergeError;
use crate::{Paragraph, Table};
use anyhow::{Context, Result};
use memmap2::Mmap;
use roxmltree::Node;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Files above this size are memory-mapped instead of read into a buffer.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

pub trait Parser {
    /// Read a document into paragraphs and tables.
    fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Document, MergeError>;
}

/// DocxParser: reads body paragraphs and tables from `word/document.xml` using roxmltree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxParser;

/// Style ids from `word/styles.xml` mapped to display names.
#[derive(Debug, Default)]
struct StyleTable {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleTable {
    fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml).context("malformed word/styles.xml")?;
        let mut table = StyleTable::default();

        for style in doc.root_element().children().filter(|n| n.has_tag_name((W_NS, "style"))) {
            let Some(style_id) = style.attribute((W_NS, "styleId")) else {
                continue;
            };
            let name = style
                .children()
                .find(|n| n.has_tag_name((W_NS, "name")))
                .and_then(|n| n.attribute((W_NS, "val")))
                .unwrap_or(style_id);
            let name = ui_style_name(name);

            let is_paragraph = style.attribute((W_NS, "type")).map_or(true, |t| t == "paragraph");
            let is_default = matches!(style.attribute((W_NS, "default")), Some("1") | Some("true"));
            if is_paragraph && is_default {
                table.default_paragraph = Some(name.clone());
            }
            table.names.insert(style_id.to_string(), name);
        }
        Ok(table)
    }

    /// Display name for a paragraph's style.
    ///
    /// No `pStyle` falls back to the default paragraph style, then `Normal` when
    /// a style table exists at all. An id missing from the table is reported as is.
    fn resolve(&self, style_id: Option<&str>, has_styles: bool) -> Option<String> {
        match style_id {
            Some(id) => Some(self.names.get(id).cloned().unwrap_or_else(|| id.to_string())),
            None if has_styles => Some(
                self.default_paragraph
                    .clone()
                    .unwrap_or_else(|| "Normal".to_string()),
            ),
            None => None,
        }
    }
}

/// Word stores built-in names in lower case (`heading 1`); report them the way
/// the UI shows them.
fn ui_style_name(name: &str) -> String {
    const BUILTIN: [&str; 6] = ["heading", "title", "subtitle", "caption", "header", "footer"];
    let lower = name.to_ascii_lowercase();
    if BUILTIN.iter().any(|b| lower == *b || lower.starts_with(&format!("{} ", b))) {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        name.to_string()
    }
}

impl Parser for DocxParser {
    fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Document, MergeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MergeError::input(path, e))?;
        let file_size = file.metadata().map_err(|e| MergeError::input(path, e))?.len();

        let parsed = if file_size > MMAP_THRESHOLD {
            // SAFETY: the mapping is read-only and dropped before this call returns.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MergeError::input(path, e))?;
            self.parse_archive(Cursor::new(&mmap[..]))
        } else {
            let mut bytes = Vec::with_capacity(file_size as usize);
            (&file).read_to_end(&mut bytes).map_err(|e| MergeError::input(path, e))?;
            self.parse_archive(Cursor::new(bytes))
        };

        let mut document = parsed.map_err(|e| MergeError::DocumentParse {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })?;
        document.metadata.file_path = path.to_string_lossy().to_string();
        document.metadata.file_size = file_size;
        Ok(document)
    }
}

impl DocxParser {
    pub fn new() -> Self {
        DocxParser
    }

    fn parse_archive<R: Read + Seek>(&self, reader: R) -> Result<Document> {
        let mut archive = ZipArchive::new(reader).context("not a zip package")?;

        let styles_xml = read_entry(&mut archive, "word/styles.xml").ok();
        let doc_xml = read_entry(&mut archive, "word/document.xml")?;

        let styles = match styles_xml.as_deref() {
            Some(xml) => StyleTable::parse(xml)?,
            None => StyleTable::default(),
        };
        let has_styles = styles_xml.is_some();

        let doc = roxmltree::Document::parse(&doc_xml).context("malformed word/document.xml")?;
        let body = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name((W_NS, "body")))
            .context("word/document.xml has no w:body")?;

        let mut paragraphs = Vec::new();
        let mut tables = Vec::new();
        let mut element_id = 1;

        for node in body.children().filter(|n| n.is_element()) {
            if node.has_tag_name((W_NS, "p")) {
                let style_id = paragraph_style_id(node);
                let style_name = styles.resolve(style_id, has_styles);
                paragraphs.push(Paragraph::new(element_id, self.extract_text_from_paragraph(node), style_name));
                element_id += 1;
            } else if node.has_tag_name((W_NS, "tbl")) {
                tables.push(Table {
                    id: element_id,
                    rows: self.extract_table_cells(node),
                });
                element_id += 1;
            }
        }

        Ok(Document {
            paragraphs,
            tables,
            metadata: DocumentMetadata {
                style_count: styles.names.len(),
                ..DocumentMetadata::default()
            },
        })
    }

    /// Paragraph text the way Word shows it: tabs and line breaks kept.
    fn extract_text_from_paragraph(&self, p_node: Node) -> String {
        let mut text = String::new();
        collect_run_text(p_node, &mut text);
        text
    }

    /// Cell texts per row; a cell's paragraphs are joined by newlines.
    fn extract_table_cells(&self, tbl_node: Node) -> Vec<Vec<String>> {
        tbl_node
            .children()
            .filter(|n| n.has_tag_name((W_NS, "tr")))
            .map(|tr| {
                tr.children()
                    .filter(|n| n.has_tag_name((W_NS, "tc")))
                    .map(|tc| {
                        tc.children()
                            .filter(|n| n.has_tag_name((W_NS, "p")))
                            .map(|p| self.extract_text_from_paragraph(p))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .collect()
            })
            .collect()
    }
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name).with_context(|| format!("missing {}", name))?;
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .with_context(|| format!("unreadable {}", name))?;
    Ok(content)
}

fn paragraph_style_id<'a>(p_node: Node<'a, '_>) -> Option<&'a str> {
    p_node
        .children()
        .find(|n| n.has_tag_name((W_NS, "pPr")))?
        .children()
        .find(|n| n.has_tag_name((W_NS, "pStyle")))?
        .attribute((W_NS, "val"))
}

fn collect_run_text(node: Node, out: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(W_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or("")),
            "tab" => out.push('\t'),
            "br" => {
                if child.attribute((W_NS, "type")) != Some("page") {
                    out.push('\n');
                }
            }
            "cr" => out.push('\n'),
            "noBreakHyphen" => out.push('-'),
            // properties, deleted text, field codes, drawings and text boxes
            "pPr" | "rPr" | "delText" | "instrText" | "drawing" | "pict" | "txbxContent" => {}
            _ => collect_run_text(child, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_style_names_are_capitalized() {
        assert_eq!(ui_style_name("heading 1"), "Heading 1");
        assert_eq!(ui_style_name("title"), "Title");
        assert_eq!(ui_style_name("Body Text"), "Body Text");
        assert_eq!(ui_style_name("headingish"), "headingish");
    }

    #[test]
    fn style_table_resolves_ids_and_defaults() {
        let xml = format!(
            r#"<w:styles xmlns:w="{ns}">
                 <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
                 <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
               </w:styles>"#,
            ns = W_NS
        );
        let table = StyleTable::parse(&xml).unwrap();
        assert_eq!(table.resolve(Some("Heading2"), true).as_deref(), Some("Heading 2"));
        assert_eq!(table.resolve(None, true).as_deref(), Some("Normal"));
        assert_eq!(table.resolve(Some("Custom9"), true).as_deref(), Some("Custom9"));
        assert_eq!(StyleTable::default().resolve(None, false), None);
    }

    #[test]
    fn run_text_keeps_breaks_and_skips_deleted_text() {
        let xml = format!(
            r#"<w:p xmlns:w="{ns}"><w:r><w:t>#### 1. Overview</w:t><w:br/><w:t>Body</w:t><w:tab/></w:r>
                 <w:del><w:r><w:delText>gone</w:delText></w:r></w:del>
                 <w:r><w:br w:type="page"/><w:t xml:space="preserve"> end</w:t></w:r></w:p>"#,
            ns = W_NS
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let text = DocxParser.extract_text_from_paragraph(doc.root_element());
        assert_eq!(text, "#### 1. Overview\nBody\t end");
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(DocxParser.parse_archive(Cursor::new(b"definitely not a zip")).is_err());
    }
}
