//! Archive access: random-access byte sources and named ZIP entries.

mod adapter;
mod byte_source;
mod entry_source;

pub use adapter::ByteSourceCursor;
pub use byte_source::{ByteSource, MemorySource};
pub use entry_source::{EntrySource, ZipSource};
