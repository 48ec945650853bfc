//! Byte-source acquisition
//!
//! Resolves each input to a chunk stream plus an optional declared length:
//! a URL if it parses as http(s), an existing file unless strings are
//! forced, an inline string otherwise. Standard input is its own source
//! with no declared length.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use omnihash_core::{DEFAULT_CHUNK_SIZE, Error, Result};
use std::io;
use std::path::Path;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

pub type ChunkStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// What an input resolved to; drives banner wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    File,
    Text,
    Stdin,
}

impl SourceKind {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Url => "content of URL",
            Self::File => "file",
            Self::Text => "string",
            Self::Stdin => "standard input",
        }
    }
}

pub struct ResolvedSource {
    pub kind: SourceKind,
    pub declared_len: Option<u64>,
    pub chunks: ChunkStream,
}

/// Resolve one input. Returns `None` for inputs that are skipped rather
/// than failed (directories).
pub async fn resolve(input: &str, force_string: bool) -> Result<Option<ResolvedSource>> {
    if !force_string {
        if let Some(url) = parse_http_url(input) {
            return fetch_url(url).await.map(Some);
        }
        let path = Path::new(input);
        if path.exists() {
            return open_file(path).await;
        }
    }
    Ok(Some(string_source(input)))
}

fn parse_http_url(input: &str) -> Option<reqwest::Url> {
    let url = reqwest::Url::parse(input).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

async fn fetch_url(url: reqwest::Url) -> Result<ResolvedSource> {
    log::debug!("fetching {url}");
    let response = reqwest::get(url.clone())
        .await
        .map_err(|err| Error::source(format!("fetching {url} failed: {err}")))?
        .error_for_status()
        .map_err(|err| Error::source(format!("{url} answered with an error: {err}")))?;

    // Content-Length when the server sent one; hashing works without it
    let declared_len = response.content_length();
    let chunks = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(io::Error::other))
        .boxed();

    Ok(ResolvedSource {
        kind: SourceKind::Url,
        declared_len,
        chunks,
    })
}

async fn open_file(path: &Path) -> Result<Option<ResolvedSource>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|err| Error::source(format!("cannot stat {}: {err}", path.display())))?;
    if metadata.is_dir() {
        return Ok(None);
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| Error::source(format!("cannot open {}: {err}", path.display())))?;

    Ok(Some(ResolvedSource {
        kind: SourceKind::File,
        declared_len: Some(metadata.len()),
        chunks: reader_chunks(file),
    }))
}

fn string_source(input: &str) -> ResolvedSource {
    let bytes = Bytes::copy_from_slice(input.as_bytes());
    ResolvedSource {
        kind: SourceKind::Text,
        declared_len: Some(bytes.len() as u64),
        chunks: futures::stream::iter([Ok(bytes)]).boxed(),
    }
}

/// Standard input; total length unknown until exhausted.
pub fn stdin_source() -> ResolvedSource {
    ResolvedSource {
        kind: SourceKind::Stdin,
        declared_len: None,
        chunks: reader_chunks(tokio::io::stdin()),
    }
}

/// Chunk an async reader. The handle is owned by the stream and dropped
/// exactly once, on exhaustion, error, or when the stream itself is
/// dropped.
fn reader_chunks<R>(reader: R) -> ChunkStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let state = (reader, vec![0u8; DEFAULT_CHUNK_SIZE], false);
    futures::stream::unfold(state, |(mut reader, mut buf, failed)| async move {
        if failed {
            return None;
        }
        match reader.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                let chunk = Bytes::copy_from_slice(&buf[..n]);
                Some((Ok(chunk), (reader, buf, false)))
            }
            Err(err) => Some((Err(err), (reader, buf, true))),
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use std::fs;
    use tempfile::TempDir;

    fn join(chunks: &[Bytes]) -> Vec<u8> {
        let mut joined = Vec::new();
        for chunk in chunks {
            joined.extend_from_slice(chunk);
        }
        joined
    }

    #[test]
    fn test_url_detection() {
        assert!(parse_http_url("https://example.com/file.bin").is_some());
        assert!(parse_http_url("http://localhost:8080/x").is_some());
        assert!(parse_http_url("ftp://example.com/x").is_none());
        assert!(parse_http_url("not a url").is_none());
        assert!(parse_http_url("/etc/hostname").is_none());
    }

    #[tokio::test]
    async fn test_existing_file_declares_length() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.bin");
        fs::write(&file_path, b"twelve bytes").unwrap();

        let resolved = resolve(file_path.to_str().unwrap(), false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind, SourceKind::File);
        assert_eq!(resolved.declared_len, Some(12));

        let chunks: Vec<Bytes> = resolved.chunks.try_collect().await.unwrap();
        assert_eq!(join(&chunks), b"twelve bytes");
    }

    #[tokio::test]
    async fn test_directory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let resolved = resolve(temp_dir.path().to_str().unwrap(), false)
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_string() {
        let resolved = resolve("no/such/file/anywhere", false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.kind, SourceKind::Text);
        assert_eq!(resolved.declared_len, Some("no/such/file/anywhere".len() as u64));
    }

    #[tokio::test]
    async fn test_force_string_ignores_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("collide");
        fs::write(&file_path, b"file body").unwrap();

        let input = file_path.to_str().unwrap();
        let resolved = resolve(input, true).await.unwrap().unwrap();
        assert_eq!(resolved.kind, SourceKind::Text);

        let chunks: Vec<Bytes> = resolved.chunks.try_collect().await.unwrap();
        assert_eq!(join(&chunks), input.as_bytes());
    }

    #[tokio::test]
    async fn test_reader_chunks_respects_content() {
        let data = vec![0xa5u8; DEFAULT_CHUNK_SIZE * 2 + 17];
        let reader = std::io::Cursor::new(data.clone());
        let chunks: Vec<Bytes> = reader_chunks(reader).try_collect().await.unwrap();
        assert!(chunks.len() >= 3);
        assert_eq!(join(&chunks), data);
    }
}
