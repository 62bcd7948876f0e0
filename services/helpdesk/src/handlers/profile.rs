use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::domain::types::Profile;
use crate::error::HelpdeskError;
use crate::handlers::read_form;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::profile::{
    GetProfileUseCase, RemovePictureUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub bio: Option<String>,
    pub picture: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            bio: profile.bio,
            picture: profile.picture,
        }
    }
}

// ── GET /profile/ ────────────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, HelpdeskError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(identity.user_id).await?;
    Ok(Json(profile.into()))
}

// ── POST /profile/ ───────────────────────────────────────────────────────────

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<StatusCode, HelpdeskError> {
    let mut form = read_form(multipart).await?;
    let input = UpdateProfileInput {
        bio: form.take("bio"),
        upload: form.upload.take(),
    };

    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
        files: state.file_store(),
    };
    usecase.execute(identity.user_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /remove-dp/ ─────────────────────────────────────────────────────────

pub async fn remove_picture(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, HelpdeskError> {
    let usecase = RemovePictureUseCase {
        repo: state.profile_repo(),
        files: state.file_store(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
