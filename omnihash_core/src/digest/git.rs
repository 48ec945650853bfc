//! Git-style content-addressed object digests
//!
//! Git SHA1-hashes object bytes prefixed with a `"<type> <length>\0"` header,
//! so the total length must be known before the first content byte is hashed.
//! Sources that declare their length stream straight through; sources that
//! cannot (standard input) are slurped so the header can be computed at
//! finalize time. Contrary to `git hash-object`, no EOL translation is done:
//! binary content is hashed as-is.

use super::traits::Digester;
use crate::registry::DigesterRegistry;
use sha1::{Digest as Sha1Digest, Sha1};

/// Object types participating in content addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitObjectKind {
    Blob,
    Commit,
    Tag,
}

impl GitObjectKind {
    pub const ALL: [GitObjectKind; 3] = [Self::Blob, Self::Commit, Self::Tag];

    /// Lower-case token used inside the object header.
    pub fn token(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Commit => "commit",
            Self::Tag => "tag",
        }
    }

    /// Canonical registry name.
    pub fn algo_name(self) -> &'static str {
        match self {
            Self::Blob => "GIT-BLOB",
            Self::Commit => "GIT-COMMIT",
            Self::Tag => "GIT-TAG",
        }
    }
}

fn object_header(kind: GitObjectKind, len: u64) -> Vec<u8> {
    format!("{} {}\0", kind.token(), len).into_bytes()
}

/// Known-length variant: the header is hashed at construction and content
/// chunks feed the primitive directly.
pub struct GitDigester {
    hasher: Sha1,
}

impl GitDigester {
    pub fn new(kind: GitObjectKind, declared_len: u64) -> Self {
        let mut hasher = Sha1::new();
        Sha1Digest::update(&mut hasher, object_header(kind, declared_len));
        Self { hasher }
    }
}

impl Digester for GitDigester {
    fn update(&mut self, chunk: &[u8]) {
        Sha1Digest::update(&mut self.hasher, chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        format!("{:x}", Sha1Digest::finalize(self.hasher))
    }
}

/// Unknown-length variant: buffers all content, then hashes header + content
/// once the length is known. Trades memory for correctness; only used when
/// the engine cannot know the total length ahead of time.
pub struct GitSlurpDigester {
    kind: GitObjectKind,
    content: Vec<u8>,
}

impl GitSlurpDigester {
    pub fn new(kind: GitObjectKind) -> Self {
        Self {
            kind,
            content: Vec::new(),
        }
    }
}

impl Digester for GitSlurpDigester {
    fn update(&mut self, chunk: &[u8]) {
        self.content.extend_from_slice(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        let mut hasher = Sha1::new();
        Sha1Digest::update(
            &mut hasher,
            object_header(self.kind, self.content.len() as u64),
        );
        Sha1Digest::update(&mut hasher, &self.content);
        format!("{:x}", Sha1Digest::finalize(hasher))
    }
}

/// Register the content-addressed object algorithms.
pub(crate) fn register_git(registry: &mut DigesterRegistry) {
    for kind in GitObjectKind::ALL {
        registry.register_if_accepted(
            kind.algo_name(),
            Box::new(move |declared_len| -> Box<dyn Digester> {
                match declared_len {
                    Some(len) => Box::new(GitDigester::new(kind, len)),
                    None => Box::new(GitSlurpDigester::new(kind)),
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SHA-1 of b"blob 5\0hello", the canonical `git hash-object` result
    #[test]
    fn test_blob_known_vector() {
        let mut digester = GitDigester::new(GitObjectKind::Blob, 5);
        digester.update(b"hello");
        assert_eq!(
            Box::new(digester).finalize(),
            "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"
        );
    }

    #[test]
    fn test_commit_and_tag_known_vectors() {
        let mut commit = GitDigester::new(GitObjectKind::Commit, 5);
        commit.update(b"hello");
        assert_eq!(
            Box::new(commit).finalize(),
            "34f5fae8d15abafca1ab4a596faab46b4583d8db"
        );

        let mut tag = GitDigester::new(GitObjectKind::Tag, 12);
        tag.update(b"test content");
        assert_eq!(
            Box::new(tag).finalize(),
            "4c0cbf0c18c18f2431cd5b5d108aa698373cceba"
        );
    }

    /// Slurping must not change the hashed byte sequence
    #[test]
    fn test_slurp_equals_known_length() {
        for kind in GitObjectKind::ALL {
            let content = b"some longer content, split across several updates";

            let mut known = GitDigester::new(kind, content.len() as u64);
            let mut slurp = GitSlurpDigester::new(kind);
            for piece in content.chunks(9) {
                known.update(piece);
                slurp.update(piece);
            }

            assert_eq!(
                Box::new(known).finalize(),
                Box::new(slurp).finalize(),
                "variants disagree for {kind:?}"
            );
        }
    }

    #[test]
    fn test_empty_blob() {
        // git hash-object on /dev/null
        let digester = GitDigester::new(GitObjectKind::Blob, 0);
        assert_eq!(
            Box::new(digester).finalize(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );

        let slurp = GitSlurpDigester::new(GitObjectKind::Blob);
        assert_eq!(
            Box::new(slurp).finalize(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn test_binary_content_hashed_as_is() {
        // CRLF and NUL bytes pass through untranslated
        let content = b"line one\r\nline\0two\r\n";
        let mut known = GitDigester::new(GitObjectKind::Blob, content.len() as u64);
        known.update(content);
        let mut slurp = GitSlurpDigester::new(GitObjectKind::Blob);
        slurp.update(content);
        assert_eq!(Box::new(known).finalize(), Box::new(slurp).finalize());
    }
}
