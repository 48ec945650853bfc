//! Contributed digest algorithms
//!
//! Algorithms that live outside the RustCrypto `Digest` family: BLAKE3,
//! the xxHash pair, and CRC32. Registered after the general-purpose pass,
//! mirroring how externally contributed algorithms are appended at runtime.

use super::traits::Digester;
use crate::registry::DigesterRegistry;
use crc32fast::Hasher as Crc32Hasher;
use std::hash::Hasher as _;
use twox_hash::{XxHash32, XxHash64};

struct Blake3Digester {
    hasher: blake3::Hasher,
}

impl Digester for Blake3Digester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}

struct Xx32Digester {
    hasher: XxHash32,
}

impl Digester for Xx32Digester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.write(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:08x}", self.hasher.finish() as u32)
    }
}

struct Xx64Digester {
    hasher: XxHash64,
}

impl Digester for Xx64Digester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.write(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:016x}", self.hasher.finish())
    }
}

struct Crc32Digester {
    hasher: Crc32Hasher,
}

impl Digester for Crc32Digester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:08x}", self.hasher.finalize())
    }
}

/// Register the contributed algorithms.
pub(crate) fn register_contributed(registry: &mut DigesterRegistry) {
    registry.register_if_accepted(
        "BLAKE3",
        Box::new(|_| -> Box<dyn Digester> {
            Box::new(Blake3Digester {
                hasher: blake3::Hasher::new(),
            })
        }),
    );
    registry.register_if_accepted(
        "XXH32",
        Box::new(|_| -> Box<dyn Digester> {
            Box::new(Xx32Digester {
                hasher: XxHash32::with_seed(0),
            })
        }),
    );
    registry.register_if_accepted(
        "XXH64",
        Box::new(|_| -> Box<dyn Digester> {
            Box::new(Xx64Digester {
                hasher: XxHash64::with_seed(0),
            })
        }),
    );
    registry.register_if_accepted(
        "CRC32",
        Box::new(|_| -> Box<dyn Digester> {
            Box::new(Crc32Digester {
                hasher: Crc32Hasher::new(),
            })
        }),
    );
}
