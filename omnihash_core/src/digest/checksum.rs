//! CRC checksum algorithms
//!
//! A table of named polynomial/width profiles from the `crc` catalog,
//! activated by the caller's include-checksums flag. Output is lower-case
//! hex, zero-padded to the profile width, matching the cryptographic
//! digests' formatting.

use super::traits::Digester;
use crate::registry::DigesterRegistry;
use crc::Crc;

static CRC_8_SMBUS: Crc<u8> = Crc::<u8>::new(&crc::CRC_8_SMBUS);
static CRC_8_I_432_1: Crc<u8> = Crc::<u8>::new(&crc::CRC_8_I_432_1);
static CRC_16_ARC: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_ARC);
static CRC_16_IBM_SDLC: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_IBM_SDLC);
static CRC_16_USB: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_USB);
static CRC_16_MODBUS: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_MODBUS);
static CRC_16_KERMIT: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_KERMIT);
static CRC_16_XMODEM: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_XMODEM);
static CRC_24_OPENPGP: Crc<u32> = Crc::<u32>::new(&crc::CRC_24_OPENPGP);
static CRC_32_ISO_HDLC: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
static CRC_32_BZIP2: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_BZIP2);
static CRC_32_ISCSI: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_ISCSI);
static CRC_32_MPEG_2: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_MPEG_2);
static CRC_32_CKSUM: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_CKSUM);
static CRC_32_JAMCRC: Crc<u32> = Crc::<u32>::new(&crc::CRC_32_JAMCRC);
static CRC_64_ECMA_182: Crc<u64> = Crc::<u64>::new(&crc::CRC_64_ECMA_182);
static CRC_64_XZ: Crc<u64> = Crc::<u64>::new(&crc::CRC_64_XZ);

enum CrcKernel {
    W8(&'static Crc<u8>),
    W16(&'static Crc<u16>),
    W32(&'static Crc<u32>),
    W64(&'static Crc<u64>),
}

struct CrcProfile {
    /// Canonical catalog name, upper-case.
    name: &'static str,
    /// Hex digits in the formatted checksum, ceil(width / 4).
    hex_width: usize,
    kernel: CrcKernel,
}

static PROFILES: &[CrcProfile] = &[
    CrcProfile { name: "CRC-8/SMBUS", hex_width: 2, kernel: CrcKernel::W8(&CRC_8_SMBUS) },
    CrcProfile { name: "CRC-8/I-432-1", hex_width: 2, kernel: CrcKernel::W8(&CRC_8_I_432_1) },
    CrcProfile { name: "CRC-16/ARC", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_ARC) },
    CrcProfile { name: "CRC-16/IBM-SDLC", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_IBM_SDLC) },
    CrcProfile { name: "CRC-16/USB", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_USB) },
    CrcProfile { name: "CRC-16/MODBUS", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_MODBUS) },
    CrcProfile { name: "CRC-16/KERMIT", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_KERMIT) },
    CrcProfile { name: "CRC-16/XMODEM", hex_width: 4, kernel: CrcKernel::W16(&CRC_16_XMODEM) },
    CrcProfile { name: "CRC-24/OPENPGP", hex_width: 6, kernel: CrcKernel::W32(&CRC_24_OPENPGP) },
    CrcProfile { name: "CRC-32/ISO-HDLC", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_ISO_HDLC) },
    CrcProfile { name: "CRC-32/BZIP2", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_BZIP2) },
    CrcProfile { name: "CRC-32/ISCSI", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_ISCSI) },
    CrcProfile { name: "CRC-32/MPEG-2", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_MPEG_2) },
    CrcProfile { name: "CRC-32/CKSUM", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_CKSUM) },
    CrcProfile { name: "CRC-32/JAMCRC", hex_width: 8, kernel: CrcKernel::W32(&CRC_32_JAMCRC) },
    CrcProfile { name: "CRC-64/ECMA-182", hex_width: 16, kernel: CrcKernel::W64(&CRC_64_ECMA_182) },
    CrcProfile { name: "CRC-64/XZ", hex_width: 16, kernel: CrcKernel::W64(&CRC_64_XZ) },
];

enum CrcState {
    W8(crc::Digest<'static, u8>),
    W16(crc::Digest<'static, u16>),
    W32(crc::Digest<'static, u32>),
    W64(crc::Digest<'static, u64>),
}

/// Streaming checksum over one catalog profile.
struct CrcChecksumDigester {
    state: CrcState,
    hex_width: usize,
}

impl CrcChecksumDigester {
    fn new(profile: &CrcProfile) -> Self {
        let state = match profile.kernel {
            CrcKernel::W8(kernel) => CrcState::W8(kernel.digest()),
            CrcKernel::W16(kernel) => CrcState::W16(kernel.digest()),
            CrcKernel::W32(kernel) => CrcState::W32(kernel.digest()),
            CrcKernel::W64(kernel) => CrcState::W64(kernel.digest()),
        };
        Self {
            state,
            hex_width: profile.hex_width,
        }
    }
}

impl Digester for CrcChecksumDigester {
    fn update(&mut self, chunk: &[u8]) {
        match &mut self.state {
            CrcState::W8(digest) => digest.update(chunk),
            CrcState::W16(digest) => digest.update(chunk),
            CrcState::W32(digest) => digest.update(chunk),
            CrcState::W64(digest) => digest.update(chunk),
        }
    }

    fn finalize(self: Box<Self>) -> String {
        let value = match self.state {
            CrcState::W8(digest) => digest.finalize() as u64,
            CrcState::W16(digest) => digest.finalize() as u64,
            CrcState::W32(digest) => digest.finalize() as u64,
            CrcState::W64(digest) => digest.finalize(),
        };
        format!("{value:0width$x}", width = self.hex_width)
    }
}

/// Register the checksum table.
///
/// Acceptance is consulted before touching a profile so that rejected names
/// never cost a kernel digest setup.
pub(crate) fn register_checksums(registry: &mut DigesterRegistry) {
    for profile in PROFILES {
        if !registry.is_accepted(profile.name) {
            continue;
        }
        registry.register_if_accepted(
            profile.name,
            Box::new(move |_declared_len| -> Box<dyn Digester> {
                Box::new(CrcChecksumDigester::new(profile))
            }),
        );
    }
}
