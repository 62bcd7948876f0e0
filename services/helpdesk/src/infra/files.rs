use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use helpdesk_domain::upload::UploadKind;

use crate::domain::repository::FileStore;
use crate::error::HelpdeskError;

/// Filesystem media store rooted at `MEDIA_ROOT`. Stored paths are relative
/// (`uploads/<uuid>.<ext>`), never absolute.
#[derive(Clone)]
pub struct FsFileStore {
    root: PathBuf,
}

impl FsFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the namespace directories. Called once at startup.
    pub async fn ensure_layout(&self) -> Result<(), anyhow::Error> {
        for kind in [UploadKind::Question, UploadKind::Comment, UploadKind::Avatar] {
            tokio::fs::create_dir_all(self.root.join(kind.dir()))
                .await
                .with_context(|| format!("create media dir {}", kind.dir()))?;
        }
        Ok(())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, HelpdeskError> {
        let rel = Path::new(path);
        let escapes = rel.is_absolute()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(HelpdeskError::Internal(anyhow::anyhow!(
                "media path escapes the media root: {path}"
            )));
        }
        Ok(self.root.join(rel))
    }
}

impl FileStore for FsFileStore {
    async fn save(
        &self,
        kind: UploadKind,
        ext: &str,
        bytes: &[u8],
    ) -> Result<String, HelpdeskError> {
        let name = format!("{}.{ext}", Uuid::new_v4());
        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media dir {}", kind.dir()))?;
        tokio::fs::write(dir.join(&name), bytes)
            .await
            .with_context(|| format!("write media file {name}"))?;
        Ok(format!("{}/{name}", kind.dir()))
    }

    async fn delete(&self, path: &str) -> Result<(), HelpdeskError> {
        let abs = self.resolve(path)?;
        match tokio::fs::remove_file(&abs).await {
            Ok(()) => Ok(()),
            // Already gone — the record was the source of truth anyway.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HelpdeskError::Internal(
                anyhow::Error::from(e).context(format!("delete media file {path}")),
            )),
        }
    }
}
