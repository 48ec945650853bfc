//! General-purpose cryptographic digest algorithms
//!
//! One generic wrapper covers every RustCrypto `Digest` implementation; the
//! registration pass below lists the active algorithms by canonical name.

use super::traits::{Digester, DigesterFactory};
use crate::registry::DigesterRegistry;
use digest::Digest;

/// Streaming wrapper around any RustCrypto digest primitive.
///
/// Ignores the declared input length; emits lower-case hex.
struct StandardDigester<D: Digest> {
    hasher: D,
}

impl<D: Digest> StandardDigester<D> {
    fn new() -> Self {
        Self { hasher: D::new() }
    }
}

impl<D: Digest + Send> Digester for StandardDigester<D> {
    fn update(&mut self, chunk: &[u8]) {
        Digest::update(&mut self.hasher, chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        hex::encode(self.hasher.finalize())
    }
}

fn standard_factory<D>() -> DigesterFactory
where
    D: Digest + Send + 'static,
{
    Box::new(|_declared_len| -> Box<dyn Digester> { Box::new(StandardDigester::<D>::new()) })
}

/// Register the general-purpose digest algorithms.
pub(crate) fn register_standard(registry: &mut DigesterRegistry) {
    registry.register_if_accepted("MD4", standard_factory::<md4::Md4>());
    registry.register_if_accepted("MD5", standard_factory::<md5::Md5>());
    registry.register_if_accepted("SHA1", standard_factory::<sha1::Sha1>());
    registry.register_if_accepted("SHA224", standard_factory::<sha2::Sha224>());
    registry.register_if_accepted("SHA256", standard_factory::<sha2::Sha256>());
    registry.register_if_accepted("SHA384", standard_factory::<sha2::Sha384>());
    registry.register_if_accepted("SHA512", standard_factory::<sha2::Sha512>());
    registry.register_if_accepted("SHA3-224", standard_factory::<sha3::Sha3_224>());
    registry.register_if_accepted("SHA3-256", standard_factory::<sha3::Sha3_256>());
    registry.register_if_accepted("SHA3-384", standard_factory::<sha3::Sha3_384>());
    registry.register_if_accepted("SHA3-512", standard_factory::<sha3::Sha3_512>());
    registry.register_if_accepted("BLAKE2B", standard_factory::<blake2::Blake2b512>());
    registry.register_if_accepted("BLAKE2S", standard_factory::<blake2::Blake2s256>());
}
