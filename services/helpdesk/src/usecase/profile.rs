use uuid::Uuid;

use helpdesk_domain::upload::{DEFAULT_AVATAR, UploadKind, validate_upload};

use crate::domain::repository::{FileStore, ProfileRepository};
use crate::domain::types::{Profile, Upload};
use crate::error::HelpdeskError;

fn default_profile(user_id: Uuid) -> Profile {
    Profile {
        user_id,
        bio: None,
        picture: DEFAULT_AVATAR.to_owned(),
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> GetProfileUseCase<P> {
    /// Profiles are created during signup; the lazy create here covers
    /// accounts that predate that step.
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, HelpdeskError> {
        if let Some(profile) = self.repo.find(user_id).await? {
            return Ok(profile);
        }
        let profile = default_profile(user_id);
        self.repo.create(&profile).await?;
        Ok(profile)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub bio: Option<String>,
    pub upload: Option<Upload>,
}

pub struct UpdateProfileUseCase<P, F>
where
    P: ProfileRepository,
    F: FileStore,
{
    pub repo: P,
    pub files: F,
}

impl<P, F> UpdateProfileUseCase<P, F>
where
    P: ProfileRepository,
    F: FileStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<(), HelpdeskError> {
        if input.bio.is_none() && input.upload.is_none() {
            return Err(HelpdeskError::MissingData);
        }

        let profile = match self.repo.find(user_id).await? {
            Some(profile) => profile,
            None => {
                let profile = default_profile(user_id);
                self.repo.create(&profile).await?;
                profile
            }
        };

        let picture = match &input.upload {
            Some(upload) => {
                let ext =
                    validate_upload(UploadKind::Avatar, &upload.filename, upload.bytes.len())?;
                // The shared placeholder is never deleted.
                if profile.picture != DEFAULT_AVATAR {
                    self.files.delete(&profile.picture).await?;
                }
                Some(
                    self.files
                        .save(UploadKind::Avatar, &ext, &upload.bytes)
                        .await?,
                )
            }
            None => None,
        };

        self.repo
            .update(user_id, input.bio.as_deref(), picture.as_deref())
            .await
    }
}

// ── RemovePicture ────────────────────────────────────────────────────────────

pub struct RemovePictureUseCase<P, F>
where
    P: ProfileRepository,
    F: FileStore,
{
    pub repo: P,
    pub files: F,
}

impl<P, F> RemovePictureUseCase<P, F>
where
    P: ProfileRepository,
    F: FileStore,
{
    /// Reset the picture to the placeholder. The column is non-null, so
    /// removal never leaves it empty.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), HelpdeskError> {
        let Some(profile) = self.repo.find(user_id).await? else {
            let profile = default_profile(user_id);
            self.repo.create(&profile).await?;
            return Ok(());
        };
        if profile.picture != DEFAULT_AVATAR {
            self.files.delete(&profile.picture).await?;
            self.repo
                .update(user_id, None, Some(DEFAULT_AVATAR))
                .await?;
        }
        Ok(())
    }
}
