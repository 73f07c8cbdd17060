//! Filesystem image storage under a public directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// URL prefix the image directory is served under.
pub const PUBLIC_PREFIX: &str = "/images";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("only image uploads are allowed, got {0:?}")]
    NotAnImage(String),
    #[error("file name is empty")]
    EmptyName,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub file_name: String,
    pub url: String,
}

impl Asset {
    fn from_file_name(file_name: String) -> Self {
        let url = format!("{PUBLIC_PREFIX}/{file_name}");
        Self { file_name, url }
    }
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `bytes` as `{unix_millis}-{sanitized name}`. Rejects anything
    /// whose MIME type is not `image/*`. A name already taken bumps the
    /// timestamp until a free one is found.
    pub async fn upload(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<Asset, AssetError> {
        if !mime_type.starts_with("image/") {
            return Err(AssetError::NotAnImage(mime_type.to_string()));
        }
        let sanitized = sanitize_file_name(original_name);
        if sanitized.is_empty() {
            return Err(AssetError::EmptyName);
        }

        fs::create_dir_all(&self.dir).await?;

        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let file_name = format!("{stamp}-{sanitized}");
            let target = self.dir.join(&file_name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
                .await
            {
                Ok(file) => {
                    write_or_discard(file, &target, bytes).await?;
                    tracing::info!(file_name = %file_name, size = bytes.len(), "Image stored");
                    return Ok(Asset::from_file_name(file_name));
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Every file currently in the image directory, sorted by name.
    /// A directory that does not exist yet lists as empty.
    pub async fn list(&self) -> Result<Vec<Asset>, AssetError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names.into_iter().map(Asset::from_file_name).collect())
    }
}

/// Write `bytes` to the freshly created `target`. A failed write removes
/// the file so no truncated image is left behind.
async fn write_or_discard<W>(mut out: W, target: &Path, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match out.write_all(bytes).await {
        Ok(()) => out.flush().await,
        Err(err) => Err(err),
    };
    if written.is_err() {
        drop(out);
        if let Err(cleanup) = fs::remove_file(target).await {
            tracing::warn!(path = %target.display(), "Removing partial upload failed: {cleanup}");
        }
    }
    written
}

/// Lowercase and replace every character outside `[a-z0-9.]` with `-`.
pub fn sanitize_file_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_stamped(name: &str, suffix: &str) -> bool {
        match name.split_once('-') {
            Some((stamp, rest)) => {
                !stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit()) && rest == suffix
            }
            None => false,
        }
    }

    #[test]
    fn sanitize_replaces_disallowed_chars() {
        assert_eq!(sanitize_file_name("My Photo!.png"), "my-photo-.png");
        assert_eq!(sanitize_file_name("Zdjęcie_01.JPG"), "zdj-cie-01.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "..-..-etc-passwd");
    }

    #[tokio::test]
    async fn upload_writes_bytes_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("nested/images"));
        let bytes = vec![7u8; 10 * 1024];
        let asset = store.upload(&bytes, "My Photo!.png", "image/png").await.unwrap();

        assert!(is_stamped(&asset.file_name, "my-photo-.png"), "{}", asset.file_name);
        assert_eq!(asset.url, format!("/images/{}", asset.file_name));
        let written = std::fs::read(store.dir().join(&asset.file_name)).unwrap();
        assert_eq!(written, bytes);
    }

    #[tokio::test]
    async fn non_image_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("images"));
        let err = store.upload(b"%PDF", "doc.pdf", "application/pdf").await.unwrap_err();
        assert!(matches!(err, AssetError::NotAnImage(_)));
        assert!(!store.dir().exists());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_name_twice_gives_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let a = store.upload(b"a", "bike.jpg", "image/jpeg").await.unwrap();
        let b = store.upload(b"b", "bike.jpg", "image/jpeg").await.unwrap();
        assert_ne!(a.file_name, b.file_name);
        assert_ne!(a.url, b.url);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("thumbs")).unwrap();
        std::fs::write(dir.path().join("1-a.png"), b"x").unwrap();
        let store = AssetStore::new(dir.path());
        let listed = store.list().await.unwrap();
        assert_eq!(
            listed,
            vec![Asset {
                file_name: "1-a.png".into(),
                url: "/images/1-a.png".into()
            }]
        );
    }

    struct BrokenDisk;

    impl AsyncWrite for BrokenDisk {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("1-partial.png");
        std::fs::write(&target, b"").unwrap();

        let err = write_or_discard(BrokenDisk, &target, b"image bytes").await.unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!target.exists());
        assert!(AssetStore::new(dir.path()).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("1-ok.png");
        let file = fs::File::create(&target).await.unwrap();
        write_or_discard(file, &target, b"png").await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"png");
    }

    #[tokio::test]
    async fn empty_sanitized_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        assert!(matches!(
            store.upload(b"x", "", "image/png").await,
            Err(AssetError::EmptyName)
        ));
    }
}
