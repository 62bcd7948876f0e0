//! Upload namespaces and attachment validation.

use serde::{Deserialize, Serialize};

/// Media-store namespace an upload belongs to. Each kind maps to a
/// subdirectory of the media root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Question,
    Comment,
    Avatar,
}

impl UploadKind {
    pub fn dir(self) -> &'static str {
        match self {
            Self::Question => "uploads",
            Self::Comment => "comment_files",
            Self::Avatar => "profile_pics",
        }
    }
}

/// Path of the placeholder avatar, relative to the media root.
pub const DEFAULT_AVATAR: &str = "profile_pics/default.png";

/// Maximum accepted attachment size (8 MiB).
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

const ATTACHMENT_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "pdf", "txt", "log", "zip",
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Errors produced by [`validate_upload`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("file name has no extension")]
    MissingExtension,
    #[error("file type not allowed")]
    DisallowedExtension,
    #[error("file is empty")]
    Empty,
    #[error("file exceeds the size limit")]
    TooLarge,
}

/// Lowercased extension of a file name, if any.
pub fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate an attachment's name and size against the namespace rules.
/// Avatars accept image extensions only; question/comment attachments accept
/// the broader document list. Returns the normalized extension on success.
pub fn validate_upload(
    kind: UploadKind,
    filename: &str,
    size: usize,
) -> Result<String, UploadError> {
    let ext = extension(filename).ok_or(UploadError::MissingExtension)?;
    let allowed = match kind {
        UploadKind::Avatar => IMAGE_EXTENSIONS,
        UploadKind::Question | UploadKind::Comment => ATTACHMENT_EXTENSIONS,
    };
    if !allowed.contains(&ext.as_str()) {
        return Err(UploadError::DisallowedExtension);
    }
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(ext)
}
