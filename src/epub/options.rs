//! Extraction settings.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::epub::container::Container;

/// Directory content-document hrefs are resolved against when no other
/// root is configured.
pub const DEFAULT_CONTENT_ROOT: &str = "OEBPS";

/// Where manifest hrefs are resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRoot {
    /// A fixed top-level directory, regardless of where the package
    /// document actually lives. Empty means the archive root.
    Fixed(String),
    /// The directory holding the first root file's package document.
    PackageDirectory,
}

impl Default for ContentRoot {
    fn default() -> Self {
        ContentRoot::Fixed(DEFAULT_CONTENT_ROOT.to_string())
    }
}

impl ContentRoot {
    /// The directory prefix hrefs are joined to.
    pub fn base<'a>(&'a self, container: Option<&'a Container>) -> &'a str {
        match self {
            ContentRoot::Fixed(prefix) => prefix,
            ContentRoot::PackageDirectory => container
                .and_then(Container::first_root_file)
                .map_or("", |root| root.base_dir()),
        }
    }
}

/// Configuration for text extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub content_root: ContentRoot,
    /// Skip spine items marked `linear="no"`. Off by default: every spine
    /// item is read.
    pub skip_non_linear: bool,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_root(mut self, root: ContentRoot) -> Self {
        self.content_root = root;
        self
    }

    /// Resolve hrefs under a fixed directory.
    pub fn with_fixed_root(self, prefix: impl Into<String>) -> Self {
        self.with_content_root(ContentRoot::Fixed(prefix.into()))
    }

    /// Resolve hrefs relative to the package document's directory.
    pub fn with_package_directory(self) -> Self {
        self.with_content_root(ContentRoot::PackageDirectory)
    }

    pub fn with_skip_non_linear(mut self, skip: bool) -> Self {
        self.skip_non_linear = skip;
        self
    }
}

/// Join a manifest href onto `base`, producing an archive entry path.
///
/// The fragment is dropped, percent-escapes are decoded, and `.`/`..`
/// segments are folded. `..` never climbs above the archive root.
pub fn join_href(base: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or_default();
    let href: Cow<'_, str> = percent_decode_str(href).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(href.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::container::RootFile;

    #[test]
    fn test_join_href() {
        assert_eq!(join_href("OEBPS", "chap1.xhtml"), "OEBPS/chap1.xhtml");
        assert_eq!(join_href("OEBPS/", "text/ch1.xhtml"), "OEBPS/text/ch1.xhtml");
        assert_eq!(join_href("", "chap1.xhtml"), "chap1.xhtml");
        assert_eq!(join_href("OEBPS", "ch1.xhtml#sec2"), "OEBPS/ch1.xhtml");
        assert_eq!(join_href("OEBPS", "Chapter%201.xhtml"), "OEBPS/Chapter 1.xhtml");
        assert_eq!(join_href("OPS/text", "../ch1.xhtml"), "OPS/ch1.xhtml");
        assert_eq!(join_href("OPS", "./ch1.xhtml"), "OPS/ch1.xhtml");
        assert_eq!(join_href("OPS", "../../ch1.xhtml"), "ch1.xhtml");
    }

    #[test]
    fn test_content_root_base() {
        let container = Container {
            root_files: vec![RootFile {
                full_path: "OPS/package.opf".to_string(),
                media_type: "application/oebps-package+xml".to_string(),
            }],
        };

        assert_eq!(ContentRoot::default().base(Some(&container)), "OEBPS");
        assert_eq!(ContentRoot::PackageDirectory.base(Some(&container)), "OPS/");
        assert_eq!(ContentRoot::PackageDirectory.base(None), "");
        assert_eq!(ContentRoot::Fixed(String::new()).base(None), "");
    }

    #[test]
    fn test_builders() {
        let options = ExtractOptions::new()
            .with_package_directory()
            .with_skip_non_linear(true);
        assert_eq!(options.content_root, ContentRoot::PackageDirectory);
        assert!(options.skip_non_linear);

        let options = ExtractOptions::new().with_fixed_root("content");
        assert_eq!(options.content_root, ContentRoot::Fixed("content".to_string()));
        assert!(!options.skip_non_linear);
    }
}
