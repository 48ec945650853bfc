//! Single-pass fan-out hashing engine
//!
//! Replays one lazy byte-chunk stream to every registered accumulator in a
//! single read loop: each chunk is fed to every accumulator before the next
//! chunk is pulled, so all algorithms observe identical bytes in identical
//! order while memory stays bounded by one chunk plus accumulator state.

use crate::digest::Digester;
use crate::error::Result;
use crate::registry::DigesterRegistry;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Result of one hashing pass: digests in registration order, plus whether a
/// requested match substring missed everything.
#[derive(Debug)]
pub struct HashReport {
    entries: Vec<(String, String)>,
    no_match: bool,
}

impl HashReport {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            no_match: false,
        }
    }

    pub fn get(&self, algo: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == algo)
            .map(|(_, digest)| digest.as_str())
    }

    /// (algorithm, digest) pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, digest)| (name.as_str(), digest.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff a match substring was supplied and no digest contained it.
    pub fn no_match(&self) -> bool {
        self.no_match
    }
}

impl Serialize for HashReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (algo, digest) in &self.entries {
            map.serialize_entry(algo, digest)?;
        }
        map.end()
    }
}

/// Run every registered algorithm over `chunks` in one pass.
///
/// `declared_len` is handed to each factory so length-aware accumulators can
/// avoid buffering. A mid-stream error aborts the whole pass; no partial
/// digests are returned, even for algorithms that had already finished. An
/// empty registry yields an empty report without the stream being polled.
pub async fn produce_digests<S>(
    mut chunks: S,
    declared_len: Option<u64>,
    registry: &DigesterRegistry,
    matcher: Option<&str>,
) -> Result<HashReport>
where
    S: Stream<Item = std::io::Result<Bytes>> + Unpin,
{
    if registry.is_empty() {
        return Ok(HashReport::empty());
    }

    let mut digesters: Vec<(&str, Box<dyn Digester>)> = registry
        .iter()
        .map(|(algo, factory)| (algo, factory(declared_len)))
        .collect();
    log::debug!(
        "fanning out to {} algorithms (declared length: {declared_len:?})",
        digesters.len()
    );

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        for (_, digester) in &mut digesters {
            digester.update(&chunk);
        }
    }

    let mut entries = Vec::with_capacity(digesters.len());
    let mut match_found = false;
    for (algo, digester) in digesters {
        let digest = digester.finalize();
        match matcher {
            Some(fragment) => {
                if digest.contains(fragment) {
                    match_found = true;
                    entries.push((algo.to_string(), digest));
                }
            }
            None => entries.push((algo.to_string(), digest)),
        }
    }

    Ok(HashReport {
        entries,
        no_match: matcher.is_some() && !match_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Criteria;
    use futures::stream;
    use std::io;

    fn chunked(pieces: &[&[u8]]) -> impl Stream<Item = io::Result<Bytes>> + Unpin {
        let owned: Vec<io::Result<Bytes>> = pieces
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p)))
            .collect();
        stream::iter(owned)
    }

    #[tokio::test]
    async fn test_known_digests_in_one_pass() {
        let registry = DigesterRegistry::collect(Criteria::default(), false);
        let report = produce_digests(chunked(&[b"hash", b"me"]), Some(6), &registry, None)
            .await
            .unwrap();

        assert_eq!(report.get("LENGTH"), Some("6"));
        assert_eq!(
            report.get("SHA1"),
            Some("fb78992e561929a6967d5328f49413fa99048d06")
        );
        assert_eq!(
            report.get("MD5"),
            Some("533f6357e0210e67d91f651bc49e1278")
        );
        assert_eq!(report.get("CRC32"), Some("23f267be"));
    }

    #[tokio::test]
    async fn test_empty_registry_does_not_touch_source() {
        let registry = DigesterRegistry::collect(Criteria::new(vec!["NOPE"], vec![]), true);
        assert!(registry.is_empty());

        // A stream that fails on first poll: proof it was never pulled.
        let poisoned = stream::iter(vec![Err::<Bytes, _>(io::Error::other("must not be read"))]);
        let report = produce_digests(poisoned, None, &registry, None)
            .await
            .unwrap();
        assert!(report.is_empty());
        assert!(!report.no_match());
    }

    #[tokio::test]
    async fn test_mid_stream_error_discards_everything() {
        let registry = DigesterRegistry::collect(Criteria::default(), false);
        let failing = stream::iter(vec![
            Ok(Bytes::from_static(b"good chunk")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "dropped")),
        ]);
        let result = produce_digests(failing, None, &registry, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_match_filter_keeps_only_hits() {
        let registry = DigesterRegistry::collect(Criteria::default(), false);

        // SHA1("hashme") starts with fb78992e; nothing else should contain it
        let report = produce_digests(chunked(&[b"hashme"]), Some(6), &registry, Some("fb78992e"))
            .await
            .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.get("SHA1"),
            Some("fb78992e561929a6967d5328f49413fa99048d06")
        );
        assert!(!report.no_match());
    }

    #[tokio::test]
    async fn test_match_miss_sets_flag() {
        let registry = DigesterRegistry::collect(Criteria::default(), false);
        let report = produce_digests(chunked(&[b"hashme"]), Some(6), &registry, Some("zzzzzzzz"))
            .await
            .unwrap();
        assert!(report.is_empty());
        assert!(report.no_match());
    }

    #[tokio::test]
    async fn test_report_serializes_in_registration_order() {
        let registry = DigesterRegistry::collect(Criteria::new(vec!["SHA2"], vec![]), false);
        let report = produce_digests(chunked(&[b"Hi"]), Some(2), &registry, None)
            .await
            .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let sha224_pos = json.find("SHA224").unwrap();
        let sha256_pos = json.find("SHA256").unwrap();
        let sha512_pos = json.find("SHA512").unwrap();
        assert!(sha224_pos < sha256_pos);
        assert!(sha256_pos < sha512_pos);
        assert!(json.contains(
            "\"3639efcd08abb273b1619e82e78c29a7df02c1051b1820e99fc395dcaa3326b8\""
        ));
    }

    #[tokio::test]
    async fn test_unknown_length_engages_slurp_variant() {
        let registry = DigesterRegistry::collect(Criteria::new(vec!["GIT"], vec![]), false);

        let declared = produce_digests(chunked(&[b"hello"]), Some(5), &registry, None)
            .await
            .unwrap();
        let undeclared = produce_digests(chunked(&[b"hel", b"lo"]), None, &registry, None)
            .await
            .unwrap();

        assert_eq!(
            declared.get("GIT-BLOB"),
            Some("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0")
        );
        assert_eq!(declared.get("GIT-BLOB"), undeclared.get("GIT-BLOB"));
        assert_eq!(declared.get("GIT-COMMIT"), undeclared.get("GIT-COMMIT"));
        assert_eq!(declared.get("GIT-TAG"), undeclared.get("GIT-TAG"));
    }
}
