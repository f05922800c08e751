//! Spine-ordered text extraction.
//!
//! Each spine entry goes through resolve (manifest lookup), filter (media
//! type, optionally linearity), fetch (archive entry) and parse (markup
//! extractor). Any failure ends the whole extraction; there is no
//! partial result.

use crate::epub::options::{ExtractOptions, join_href};
use crate::epub::package::{ItemRef, Manifest, Package};
use crate::error::{Error, Result, StructuralError};
use crate::io::EntrySource;
use crate::markup::TextExtractor;

/// Separator between paragraphs, and between documents.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A spine entry resolved to an archive path, ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    pub idref: String,
    pub href: String,
    /// Archive-internal path of the document.
    pub path: String,
    pub raw_linear: String,
}

/// Lazily resolves spine entries to content documents, in spine order.
pub struct ContentDocuments<'a> {
    item_refs: std::slice::Iter<'a, ItemRef>,
    manifest: &'a Manifest,
    base: &'a str,
    skip_non_linear: bool,
}

impl Iterator for ContentDocuments<'_> {
    type Item = Result<ContentDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        for item_ref in self.item_refs.by_ref() {
            let Some(item) = self.manifest.item(&item_ref.idref) else {
                return Some(Err(
                    StructuralError::MissingManifestItem(item_ref.idref.clone()).into()
                ));
            };

            if !item.is_xhtml() {
                tracing::trace!(id = %item.id, media_type = %item.media_type, "skipping non-XHTML spine item");
                continue;
            }

            if self.skip_non_linear && !item_ref.raw_linear.is_empty() {
                match item_ref.is_linear() {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::trace!(id = %item.id, "skipping non-linear spine item");
                        continue;
                    }
                    Err(e) => return Some(Err(e.into())),
                }
            }

            return Some(Ok(ContentDocument {
                idref: item_ref.idref.clone(),
                href: item.href.clone(),
                path: join_href(self.base, &item.href),
                raw_linear: item_ref.raw_linear.clone(),
            }));
        }
        None
    }
}

/// Resolve the spine of `package` against its manifest.
///
/// Fails immediately when the spine or the manifest is missing; dangling
/// references surface as the iterator reaches them.
pub fn content_documents<'a>(
    package: &'a Package,
    base: &'a str,
    options: &ExtractOptions,
) -> Result<ContentDocuments<'a>> {
    let spine = package.spine.as_ref().ok_or(StructuralError::NoSpine)?;
    let manifest = package.manifest.as_ref().ok_or(StructuralError::NoManifest)?;

    Ok(ContentDocuments {
        item_refs: spine.item_refs.iter(),
        manifest,
        base,
        skip_non_linear: options.skip_non_linear,
    })
}

/// Fetch one content document and return its trimmed text.
///
/// Paragraphs are joined with [`PARAGRAPH_SEPARATOR`]. The result may be
/// empty.
pub fn extract_document<S, E>(source: &S, doc: &ContentDocument, extractor: &E) -> Result<String>
where
    S: EntrySource + ?Sized,
    E: TextExtractor + ?Sized,
{
    let bytes = source.read_entry(&doc.path).map_err(|source| Error::Entry {
        path: doc.path.clone(),
        source,
    })?;

    let paragraphs = extractor
        .extract_paragraphs(&bytes)
        .map_err(|source| Error::Parse {
            path: doc.path.clone(),
            source,
        })?;

    Ok(paragraphs.join(PARAGRAPH_SEPARATOR).trim().to_string())
}

/// Extract the text of every qualifying spine item, in spine order.
///
/// Items whose text is empty after trimming contribute nothing. An empty
/// result is not an error.
pub fn extract_text<S, E>(
    source: &S,
    package: &Package,
    base: &str,
    options: &ExtractOptions,
    extractor: &E,
) -> Result<String>
where
    S: EntrySource + ?Sized,
    E: TextExtractor + ?Sized,
{
    let mut parts = Vec::new();

    for doc in content_documents(package, base, options)? {
        let doc = doc?;
        let text = extract_document(source, &doc, extractor)?;
        if text.is_empty() {
            tracing::trace!(path = %doc.path, "content document has no text");
            continue;
        }
        tracing::trace!(path = %doc.path, len = text.len(), "extracted content document");
        parts.push(text);
    }

    tracing::debug!(documents = parts.len(), "extracted text");
    Ok(parts.join(PARAGRAPH_SEPARATOR))
}
