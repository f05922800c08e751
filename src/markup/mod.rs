//! Markup text extraction.
//!
//! Content documents are parsed the way a browser would parse them:
//! leniently, with html5ever, into a small arena DOM. The text of each
//! paragraph-level element is then collected in document order.

mod arena;
mod tree_sink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use thiserror::Error;

use crate::util::decode_document;

pub use arena::{ArenaDom, ArenaNodeId};
pub use tree_sink::ArenaSink;

/// A markup document could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse HTML: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns a markup document into its paragraph texts.
pub trait TextExtractor {
    /// Returns the trimmed, non-empty text of each paragraph-level element
    /// in document order.
    fn extract_paragraphs(&self, content: &[u8]) -> Result<Vec<String>, ParseError>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_paragraphs(&self, content: &[u8]) -> Result<Vec<String>, ParseError> {
        (**self).extract_paragraphs(content)
    }
}

/// Default extractor: html5ever parse, then select elements by local name.
#[derive(Debug, Clone)]
pub struct ParagraphExtractor {
    block_tags: Vec<String>,
}

impl Default for ParagraphExtractor {
    fn default() -> Self {
        Self {
            block_tags: vec!["p".to_string()],
        }
    }
}

impl ParagraphExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select these element names instead of just `p`.
    ///
    /// When matching elements nest, only the outermost one contributes.
    pub fn with_block_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_tags: tags
                .into_iter()
                .map(|t| t.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn block_tags(&self) -> &[String] {
        &self.block_tags
    }

    /// Parse `content` into an arena DOM.
    pub fn parse(&self, content: &[u8]) -> ArenaDom {
        let text = decode_document(content);
        let sink = parse_document(ArenaSink::new(), ParseOpts::default())
            .from_utf8()
            .one(text.as_bytes());

        if sink.parse_errors() > 0 {
            tracing::trace!(errors = sink.parse_errors(), "markup parsed with recoverable errors");
        }
        sink.into_dom()
    }
}

impl TextExtractor for ParagraphExtractor {
    fn extract_paragraphs(&self, content: &[u8]) -> Result<Vec<String>, ParseError> {
        let dom = self.parse(content);

        let paragraphs = dom
            .select_outermost(|name| self.block_tags.iter().any(|t| t == name))
            .into_iter()
            .filter_map(|id| {
                let text = dom.text_content(id);
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();

        Ok(paragraphs)
    }
}
