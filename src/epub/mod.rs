//! EPUB reading: container, package and spine-ordered text.

pub mod container;
pub mod options;
pub mod package;
pub mod text;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, StructuralError};
use crate::io::{EntrySource, MemorySource, ZipSource};
use crate::markup::{ParagraphExtractor, TextExtractor};

pub use container::{CONTAINER_PATH, Container, RootFile, resolve_container};
pub use options::{ContentRoot, DEFAULT_CONTENT_ROOT, ExtractOptions, join_href};
pub use package::{
    ItemRef, Manifest, ManifestItem, Metadata, Package, Spine, XHTML_MEDIA_TYPE, resolve_package,
};
pub use text::{
    ContentDocument, ContentDocuments, PARAGRAPH_SEPARATOR, content_documents, extract_document,
    extract_text,
};

/// An opened EPUB: its archive plus the decoded container and package.
///
/// Everything is resolved once, when the file is opened, and never
/// changes afterwards.
pub struct EpubFile<S = ZipSource> {
    source: S,
    container: Container,
    package: Option<Package>,
}

impl EpubFile<ZipSource> {
    /// Open an EPUB held entirely in memory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use epub_text::EpubFile;
    ///
    /// let bytes = std::fs::read("book.epub")?;
    /// let epub = EpubFile::from_bytes(bytes)?;
    /// println!("{}", epub.text()?);
    /// # Ok::<(), epub_text::Error>(())
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let source = ZipSource::new(Arc::new(MemorySource::new(bytes)))?;
        Self::from_source(source)
    }

    /// Read `reader` to the end, then open the result.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    /// Read the file at `path` into memory and open it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }
}

impl<S: EntrySource> EpubFile<S> {
    /// Resolve the container and package of an already opened archive.
    pub fn from_source(source: S) -> Result<Self> {
        let container = resolve_container(&source)?;
        let package = resolve_package(&source, Some(&container))?;

        Ok(Self {
            source,
            container,
            package,
        })
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The decoded package, or `None` when the container names no root file.
    pub fn package(&self) -> Option<&Package> {
        self.package.as_ref()
    }

    /// The underlying archive.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn require_package(&self) -> Result<&Package> {
        self.package
            .as_ref()
            .ok_or_else(|| StructuralError::NoPackage.into())
    }

    /// All readable text, in spine order, with default settings.
    pub fn text(&self) -> Result<String> {
        self.text_with(&ExtractOptions::default(), &ParagraphExtractor::new())
    }

    /// All readable text, in spine order.
    pub fn text_with<E>(&self, options: &ExtractOptions, extractor: &E) -> Result<String>
    where
        E: TextExtractor + ?Sized,
    {
        let package = self.require_package()?;
        let base = options.content_root.base(Some(&self.container));
        extract_text(&self.source, package, base, options, extractor)
    }

    /// The content documents text would be read from, in spine order.
    pub fn content_documents(&self, options: &ExtractOptions) -> Result<Vec<ContentDocument>> {
        let package = self.require_package()?;
        let base = options.content_root.base(Some(&self.container));
        content_documents(package, base, options)?.collect()
    }

    /// Text of a single content document; see [`extract_document`].
    pub fn document_text<E>(&self, doc: &ContentDocument, extractor: &E) -> Result<String>
    where
        E: TextExtractor + ?Sized,
    {
        extract_document(&self.source, doc, extractor)
    }
}

impl<S> std::fmt::Debug for EpubFile<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpubFile")
            .field("container", &self.container)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}
