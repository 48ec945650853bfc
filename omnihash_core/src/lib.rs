//! Omnihash Core Library
//!
//! Computes many digests of a single input in one pass over its bytes:
//! a digest-factory registry filtered by name-fragment criteria, and a
//! fan-out engine that replays one byte-chunk stream to every registered
//! accumulator. Byte-source acquisition and rendering live in the CLI crate.

pub mod digest;
pub mod engine;
pub mod error;
pub mod registry;

// Re-export main types
pub use digest::{Digester, DigesterFactory, GitObjectKind};
pub use engine::{HashReport, produce_digests};
pub use error::{Error, Result};
pub use registry::{Criteria, DigesterRegistry};

/// Read-buffer size used by byte-chunk producers.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
