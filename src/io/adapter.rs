use super::byte_source::ByteSource;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

/// Stateful `Read + Seek` view over a shared [`ByteSource`].
///
/// Only used to hand the source to `zip::ZipArchive` for the central
/// directory scan; entry data is read through the source directly.
pub struct ByteSourceCursor {
    inner: Arc<dyn ByteSource>,
    position: u64,
}

impl ByteSourceCursor {
    pub fn new(inner: Arc<dyn ByteSource>) -> Self {
        Self { inner, position: 0 }
    }
}

impl Read for ByteSourceCursor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let total_len = self.inner.len();
        if self.position >= total_len {
            return Ok(0);
        }
        let count = (total_len - self.position).min(buf.len() as u64) as usize;

        self.inner.read_at_into(self.position, &mut buf[..count])?;
        self.position += count as u64;

        Ok(count)
    }
}

impl Seek for ByteSourceCursor {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(p) => self.inner.len().checked_add_signed(p),
            SeekFrom::Current(p) => self.position.checked_add_signed(p),
        };

        match new_pos {
            Some(p) => {
                self.position = p;
                Ok(p)
            }
            None => Err(io::Error::new(io::ErrorKind::InvalidInput, "Seek before 0")),
        }
    }
}
