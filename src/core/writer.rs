use crate::config::DEFAULT_HEADING_STYLE;
use crate::core::sections::SectionMap;
use crate::error::MergeError;
use anyhow::Result;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

/// Writer is responsible for turning an ordered section map into a new .docx package
pub trait Writer {
    fn write_sections<P: AsRef<Path>>(&self, sections: &SectionMap, out_path: P) -> Result<(), MergeError>;
}

/// DocxWriter: one heading paragraph plus one body paragraph per section.
#[derive(Debug, Clone)]
pub struct DocxWriter {
    heading_style: String,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_STYLE)
    }
}

impl Writer for DocxWriter {
    /// The package is staged in a temp file next to `out_path` and only moved
    /// into place once complete.
    fn write_sections<P: AsRef<Path>>(&self, sections: &SectionMap, out_path: P) -> Result<(), MergeError> {
        let out_path = out_path.as_ref();
        let write_err = |e: anyhow::Error| MergeError::Write {
            path: out_path.to_path_buf(),
            reason: format!("{:#}", e),
        };

        let dir = match out_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_err(e.into()))?;
        self.write_package(sections, staged.as_file_mut()).map_err(write_err)?;
        staged.persist(out_path).map_err(|e| write_err(e.error.into()))?;
        Ok(())
    }
}

impl DocxWriter {
    pub fn new(heading_style: impl Into<String>) -> Self {
        Self {
            heading_style: heading_style.into(),
        }
    }

    /// Serialize the package into any seekable sink.
    pub fn write_package<W: Write + Seek>(&self, sections: &SectionMap, sink: W) -> Result<()> {
        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("docProps/core.xml", core_properties_xml()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/styles.xml", self.styles_xml()),
            ("word/document.xml", self.document_xml(sections)),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }
        zip.finish()?;
        Ok(())
    }

    fn document_xml(&self, sections: &SectionMap) -> String {
        let mut body = String::new();
        for (heading, content) in sections.iter() {
            body.push_str(&format!(
                r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p>"#,
                html_escape::encode_double_quoted_attribute(&self.heading_style),
                runs_xml(heading)
            ));
            body.push_str(&format!("<w:p>{}</w:p>", runs_xml(content)));
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    fn styles_xml(&self) -> String {
        let style_id = html_escape::encode_double_quoted_attribute(&self.heading_style);
        let style_name = style_display_name(&self.heading_style);
        let style_name = html_escape::encode_double_quoted_attribute(&style_name);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
</w:styles>"#,
            id = style_id,
            name = style_name
        )
    }
}

/// Display name for a style id: a trailing level number is split off
/// (`Heading1` → `Heading 1`), other ids are used as is.
fn style_display_name(style_id: &str) -> String {
    let stem = style_id.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.is_empty() || stem.len() == style_id.len() {
        style_id.to_string()
    } else {
        format!("{} {}", stem, &style_id[stem.len()..])
    }
}

/// A single run; `\n` becomes `w:br` and `\t` becomes `w:tab`.
fn runs_xml(text: &str) -> String {
    let mut run = String::from("<w:r>");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run.push_str("<w:br/>");
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                run.push_str("<w:tab/>");
            }
            if !piece.is_empty() {
                run.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    html_escape::encode_text(piece)
                ));
            }
        }
    }
    run.push_str("</w:r>");
    run
}

fn core_properties_xml() -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>docx-merge</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#,
        now = now
    )
}
