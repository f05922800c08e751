//! `META-INF/container.xml`: the archive's entry point.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::EntrySource;
use crate::xml::decode_entry;

/// Fixed location of the container descriptor inside every EPUB.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// The decoded container descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename(deserialize = "rootfiles"), default, with = "rootfiles")]
    pub root_files: Vec<RootFile>,
}

/// A package document declared by the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFile {
    #[serde(rename(deserialize = "@full-path"), default)]
    pub full_path: String,

    #[serde(rename(deserialize = "@media-type"), default)]
    pub media_type: String,
}

impl Container {
    /// The root file the package is read from; later ones are ignored.
    pub fn first_root_file(&self) -> Option<&RootFile> {
        self.root_files.first()
    }
}

impl RootFile {
    /// Directory part of `full_path`, with a trailing slash, or empty when
    /// the package document sits at the archive root.
    pub fn base_dir(&self) -> &str {
        match self.full_path.rfind('/') {
            Some(i) => &self.full_path[..=i],
            None => "",
        }
    }
}

/// `<rootfiles><rootfile/>...</rootfiles>` flattened into a `Vec`.
mod rootfiles {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::RootFile;

    #[derive(Deserialize)]
    struct RootFiles {
        #[serde(rename = "rootfile", default)]
        rootfile: Vec<RootFile>,
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RootFile>, D::Error> {
        RootFiles::deserialize(d).map(|r| r.rootfile)
    }

    pub fn serialize<S: Serializer>(files: &[RootFile], s: S) -> Result<S::Ok, S::Error> {
        files.serialize(s)
    }
}

/// Read and decode the container descriptor.
pub fn resolve_container<S: EntrySource + ?Sized>(source: &S) -> Result<Container> {
    let container: Container = decode_entry(source, CONTAINER_PATH)?;
    tracing::debug!(root_files = container.root_files.len(), "resolved container");
    Ok(container)
}
