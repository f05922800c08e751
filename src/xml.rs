//! Schema-driven XML decoding for the container and package documents.
//!
//! Schemas are plain serde types. Attributes are mapped with `@name`
//! renames, repeated children with `Vec` fields. Elements and attributes
//! the schema does not mention are ignored, and namespace prefixes on
//! element names are not significant.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::io::EntrySource;
use crate::util::decode_document;

/// Decode `bytes` against the schema `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, quick_xml::DeError> {
    let text = decode_document(bytes);
    quick_xml::de::from_str(&text)
}

/// Read the archive entry at `path` and decode it against the schema `T`.
pub fn decode_entry<T, S>(source: &S, path: &str) -> Result<T>
where
    T: DeserializeOwned,
    S: EntrySource + ?Sized,
{
    let bytes = source.read_entry(path).map_err(|source| Error::Entry {
        path: path.to_string(),
        source,
    })?;

    decode(&bytes).map_err(|source| Error::Decode {
        path: path.to_string(),
        source,
    })
}
