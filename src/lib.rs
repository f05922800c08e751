//! # epub-text
//!
//! Extracts the plain reading text of an EPUB, in reading order.
//!
//! Opening an EPUB resolves `META-INF/container.xml` to the package
//! document, and the package document to its manifest and spine. Text is
//! then read from every XHTML content document the spine references, one
//! paragraph per `<p>` element, with a blank line between paragraphs and
//! between documents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use epub_text::EpubFile;
//!
//! let epub = EpubFile::open("book.epub")?;
//! let root = &epub.container().root_files[0];
//! println!("package: {} ({})", root.full_path, root.media_type);
//! println!("{}", epub.text()?);
//! # Ok::<(), epub_text::Error>(())
//! ```
//!
//! ## Settings
//!
//! Hrefs are resolved under `OEBPS/` unless told otherwise:
//!
//! ```no_run
//! use epub_text::{EpubFile, ExtractOptions, ParagraphExtractor};
//!
//! let epub = EpubFile::open("book.epub")?;
//! let options = ExtractOptions::new()
//!     .with_package_directory()
//!     .with_skip_non_linear(true);
//! let text = epub.text_with(&options, &ParagraphExtractor::new())?;
//! # Ok::<(), epub_text::Error>(())
//! ```

pub mod epub;
pub mod error;
pub mod io;
pub mod markup;
pub(crate) mod util;
pub mod xml;

pub use epub::{
    Container, ContentDocument, ContentRoot, EpubFile, ExtractOptions, ItemRef, Manifest,
    ManifestItem, Metadata, Package, RootFile, Spine,
};
pub use error::{Error, ErrorKind, Result, StructuralError};
pub use io::{EntrySource, ZipSource};
pub use markup::{ParagraphExtractor, ParseError, TextExtractor};
