//! The package document: metadata, manifest and spine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::epub::container::Container;
use crate::error::{Result, StructuralError};
use crate::io::EntrySource;
use crate::xml::decode_entry;

/// Media type of the content documents text is extracted from.
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// The decoded package document.
///
/// Each part is optional: a package without a spine or manifest still
/// decodes, and the absence is reported by whatever needs the part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Package {
    pub metadata: Option<Metadata>,
    pub manifest: Option<Manifest>,
    pub spine: Option<Spine>,
}

/// Dublin Core metadata as it appears in the package, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub titles: Vec<String>,
    pub creators: Vec<String>,
    pub languages: Vec<String>,
    pub identifiers: Vec<String>,
}

impl Metadata {
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }

    pub fn language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

/// Every resource of the publication, indexed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    items: Vec<ManifestItem>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
}

impl ManifestItem {
    pub fn is_xhtml(&self) -> bool {
        self.media_type == XHTML_MEDIA_TYPE
    }
}

impl Manifest {
    /// Build a manifest from items in document order.
    ///
    /// Duplicate IDs are kept; lookups resolve to the first occurrence.
    pub fn new(items: Vec<ManifestItem>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            index.entry(item.id.clone()).or_insert(i);
        }
        Self { items, index }
    }

    /// Look up an item by exact ID.
    pub fn item(&self, id: &str) -> Option<&ManifestItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Items in document order, duplicates included.
    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Spine {
    pub item_refs: Vec<ItemRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub idref: String,
    /// The `linear` attribute exactly as written; empty when absent.
    pub raw_linear: String,
}

impl ItemRef {
    /// Interpret the `linear` attribute.
    ///
    /// Only `yes` and `no` (any case) are valid. Anything else, including
    /// an absent attribute, is an error the caller has to decide about.
    pub fn is_linear(&self) -> std::result::Result<bool, StructuralError> {
        if self.raw_linear.eq_ignore_ascii_case("yes") {
            Ok(true)
        } else if self.raw_linear.eq_ignore_ascii_case("no") {
            Ok(false)
        } else {
            Err(StructuralError::InvalidLinear(self.raw_linear.clone()))
        }
    }
}

impl Package {
    /// Decode a package document.
    pub fn from_xml(bytes: &[u8]) -> std::result::Result<Self, quick_xml::DeError> {
        crate::xml::decode::<PackageXml>(bytes).map(Package::from)
    }
}

/// Locate, read and decode the package document named by `container`.
///
/// Returns `Ok(None)` when there is no container or it declares no root
/// files. Only the first root file is used.
pub fn resolve_package<S: EntrySource + ?Sized>(
    source: &S,
    container: Option<&Container>,
) -> Result<Option<Package>> {
    let Some(root_file) = container.and_then(Container::first_root_file) else {
        tracing::debug!("container declares no root file, skipping package");
        return Ok(None);
    };

    if root_file.full_path.is_empty() {
        return Err(StructuralError::EmptyRootFilePath.into());
    }

    let raw: PackageXml = decode_entry(source, &root_file.full_path)?;
    let package = Package::from(raw);

    tracing::debug!(
        path = %root_file.full_path,
        manifest_items = package.manifest.as_ref().map_or(0, Manifest::len),
        spine_items = package.spine.as_ref().map_or(0, |s| s.item_refs.len()),
        "resolved package"
    );

    Ok(Some(package))
}

// ----------------------------------------------------------------------------
// XML schema
// ----------------------------------------------------------------------------

#[derive(Deserialize)]
struct PackageXml {
    #[serde(default)]
    metadata: Option<MetadataXml>,
    #[serde(default)]
    manifest: Option<ManifestXml>,
    #[serde(default)]
    spine: Option<SpineXml>,
}

#[derive(Deserialize)]
struct MetadataXml {
    #[serde(rename = "title", default)]
    title: Vec<TextXml>,
    #[serde(rename = "creator", default)]
    creator: Vec<TextXml>,
    #[serde(rename = "language", default)]
    language: Vec<TextXml>,
    #[serde(rename = "identifier", default)]
    identifier: Vec<TextXml>,
}

#[derive(Deserialize)]
struct TextXml {
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Deserialize)]
struct ManifestXml {
    #[serde(rename = "item", default)]
    item: Vec<ManifestItemXml>,
}

#[derive(Deserialize)]
struct ManifestItemXml {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@media-type", default)]
    media_type: String,
}

#[derive(Deserialize)]
struct SpineXml {
    #[serde(rename = "itemref", default)]
    itemref: Vec<ItemRefXml>,
}

#[derive(Deserialize)]
struct ItemRefXml {
    #[serde(rename = "@idref", default)]
    idref: String,
    #[serde(rename = "@linear", default)]
    linear: String,
}

impl From<PackageXml> for Package {
    fn from(raw: PackageXml) -> Self {
        let texts = |v: Vec<TextXml>| -> Vec<String> {
            v.into_iter().map(|t| t.text.trim().to_string()).collect()
        };

        Package {
            metadata: raw.metadata.map(|m| Metadata {
                titles: texts(m.title),
                creators: texts(m.creator),
                languages: texts(m.language),
                identifiers: texts(m.identifier),
            }),
            manifest: raw.manifest.map(|m| {
                Manifest::new(
                    m.item
                        .into_iter()
                        .map(|i| ManifestItem {
                            id: i.id,
                            href: i.href,
                            media_type: i.media_type,
                        })
                        .collect(),
                )
            }),
            spine: raw.spine.map(|s| Spine {
                item_refs: s
                    .itemref
                    .into_iter()
                    .map(|r| ItemRef {
                        idref: r.idref,
                        raw_linear: r.linear,
                    })
                    .collect(),
            }),
        }
    }
}
