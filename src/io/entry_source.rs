use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read};
use std::sync::Arc;

use zip::ZipArchive;

use super::{ByteSource, ByteSourceCursor};

/// Named-entry access to an archive.
///
/// Paths are archive-internal: forward slashes, case-sensitive, no
/// leading slash. A missing entry is reported as [`io::ErrorKind::NotFound`].
pub trait EntrySource {
    /// Read the whole entry at `path`.
    fn read_entry(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Names of all entries, in archive order where one exists.
    fn entry_names(&self) -> Vec<String>;
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("File not found in ZIP: {}", path),
    )
}

impl EntrySource for BTreeMap<String, Vec<u8>> {
    fn read_entry(&self, path: &str) -> io::Result<Vec<u8>> {
        self.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn entry_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl EntrySource for HashMap<String, Vec<u8>> {
    fn read_entry(&self, path: &str) -> io::Result<Vec<u8>> {
        self.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().cloned().collect();
        names.sort();
        names
    }
}

/// ZIP archive with its central directory indexed up front.
///
/// Entry data is read straight from the byte source and inflated on
/// demand; no `ZipArchive` is kept alive after construction.
pub struct ZipSource {
    source: Arc<dyn ByteSource>,
    index: HashMap<String, ZipEntryLoc>,
    names: Vec<String>,
}

#[derive(Clone, Copy)]
struct ZipEntryLoc {
    /// Offset to the compressed data within the ZIP file.
    data_offset: u64,
    compressed_size: u64,
    size: u64,
    crc32: u32,
    compression: Compression,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Compression {
    Stored,
    Deflated,
    Unsupported,
}

impl From<zip::CompressionMethod> for Compression {
    fn from(method: zip::CompressionMethod) -> Self {
        match method {
            zip::CompressionMethod::Stored => Compression::Stored,
            zip::CompressionMethod::Deflated => Compression::Deflated,
            _ => Compression::Unsupported,
        }
    }
}

impl ZipSource {
    /// Scan the central directory of `source`.
    pub fn new(source: Arc<dyn ByteSource>) -> zip::result::ZipResult<Self> {
        let cursor = ByteSourceCursor::new(source.clone());
        let mut archive = ZipArchive::new(cursor)?;

        let mut index = HashMap::with_capacity(archive.len());
        let mut names = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            let name = file.name().to_string();
            let data_offset = file.data_start().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("No data offset for ZIP entry: {}", name),
                )
            })?;

            // First entry wins when an archive repeats a name.
            index.entry(name.clone()).or_insert(ZipEntryLoc {
                data_offset,
                compressed_size: file.compressed_size(),
                size: file.size(),
                crc32: file.crc32(),
                compression: file.compression().into(),
            });
            names.push(name);
        }

        tracing::debug!(entries = names.len(), "indexed ZIP central directory");

        Ok(Self {
            source,
            index,
            names,
        })
    }

    /// Returns true if the archive has an entry named `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }
}

impl EntrySource for ZipSource {
    fn read_entry(&self, path: &str) -> io::Result<Vec<u8>> {
        let loc = self.index.get(path).ok_or_else(|| not_found(path))?;

        let compressed_size = usize::try_from(loc.compressed_size)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "entry too large"))?;
        let compressed = self.source.read_at(loc.data_offset, compressed_size)?;

        let data = match loc.compression {
            Compression::Stored => compressed,
            Compression::Deflated => {
                let decoder = flate2::read::DeflateDecoder::new(&compressed[..]);
                // One byte past the declared size is enough to detect a lie.
                let mut out = Vec::new();
                decoder.take(loc.size.saturating_add(1)).read_to_end(&mut out)?;
                out
            }
            Compression::Unsupported => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("Unsupported compression method for {}", path),
                ));
            }
        };

        if data.len() as u64 != loc.size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Size mismatch for {}", path),
            ));
        }

        let mut crc = flate2::Crc::new();
        crc.update(&data);
        if crc.sum() != loc.crc32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Checksum mismatch for {}", path),
            ));
        }

        Ok(data)
    }

    fn entry_names(&self) -> Vec<String> {
        self.names.clone()
    }
}
