//! Digest accumulator implementations
//!
//! Every concrete accumulator kind lives here: the general-purpose
//! cryptographic digests, the contributed extras, the LENGTH counter, the
//! git-style content-addressed digests, and the CRC checksum table.

mod checksum;
mod contrib;
mod git;
mod length;
mod standard;
pub(crate) mod traits;

pub use git::{GitDigester, GitObjectKind, GitSlurpDigester};
pub use length::LengthDigester;
pub use traits::{Digester, DigesterFactory};

pub(crate) use checksum::register_checksums;
pub(crate) use contrib::register_contributed;
pub(crate) use git::register_git;
pub(crate) use standard::register_standard;
