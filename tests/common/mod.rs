//! In-memory EPUB fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const OPF_MEDIA_TYPE: &str = "application/oebps-package+xml";
pub const XHTML: &str = "application/xhtml+xml";

/// Builds an EPUB archive entry by entry.
pub struct EpubBuilder {
    entries: Vec<(String, Vec<u8>, zip::CompressionMethod)>,
}

impl Default for EpubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EpubBuilder {
    /// Starts with the `mimetype` entry, stored, as EPUB requires.
    pub fn new() -> Self {
        Self {
            entries: vec![(
                "mimetype".to_string(),
                b"application/epub+zip".to_vec(),
                zip::CompressionMethod::Stored,
            )],
        }
    }

    pub fn file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((
            path.to_string(),
            content.as_ref().to_vec(),
            zip::CompressionMethod::Stored,
        ));
        self
    }

    pub fn deflated(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((
            path.to_string(),
            content.as_ref().to_vec(),
            zip::CompressionMethod::Deflated,
        ));
        self
    }

    /// Adds `META-INF/container.xml` declaring the given root files.
    pub fn container(self, root_files: &[(&str, &str)]) -> Self {
        self.file("META-INF/container.xml", container_xml(root_files))
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, data, method) in self.entries {
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(path, options).expect("start zip entry");
            zip.write_all(&data).expect("write zip entry");
        }
        zip.finish().expect("finish zip").into_inner()
    }
}

pub fn container_xml(root_files: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
"#,
    );
    for (full_path, media_type) in root_files {
        xml.push_str(&format!(
            "    <rootfile full-path=\"{full_path}\" media-type=\"{media_type}\"/>\n"
        ));
    }
    xml.push_str("  </rootfiles>\n</container>\n");
    xml
}

/// A package document. `items` are `(id, href, media-type)`; `spine` is
/// `(idref, linear)` where an empty `linear` omits the attribute.
pub fn opf(items: &[(&str, &str, &str)], spine: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:00000000-0000-4000-8000-000000000000</dc:identifier>
    <dc:title>Fixture</dc:title>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
"#,
    );
    for (id, href, media_type) in items {
        xml.push_str(&format!(
            "    <item id=\"{id}\" href=\"{href}\" media-type=\"{media_type}\"/>\n"
        ));
    }
    xml.push_str("  </manifest>\n  <spine>\n");
    for (idref, linear) in spine {
        if linear.is_empty() {
            xml.push_str(&format!("    <itemref idref=\"{idref}\"/>\n"));
        } else {
            xml.push_str(&format!(
                "    <itemref idref=\"{idref}\" linear=\"{linear}\"/>\n"
            ));
        }
    }
    xml.push_str("  </spine>\n</package>\n");
    xml
}

/// An XHTML content document with one `<p>` per paragraph.
pub fn xhtml(paragraphs: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Chapter</title></head>
<body>
"#,
    );
    for p in paragraphs {
        xml.push_str(&format!("<p>{p}</p>\n"));
    }
    xml.push_str("</body>\n</html>\n");
    xml
}

/// One-chapter book laid out the conventional way under `OEBPS/`.
pub fn single_chapter(paragraphs: &[&str]) -> Vec<u8> {
    EpubBuilder::new()
        .container(&[("OEBPS/content.opf", OPF_MEDIA_TYPE)])
        .file(
            "OEBPS/content.opf",
            opf(&[("c1", "chap1.xhtml", XHTML)], &[("c1", "")]),
        )
        .file("OEBPS/chap1.xhtml", xhtml(paragraphs))
        .build()
}
