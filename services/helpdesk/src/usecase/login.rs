use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::HelpdeskError;
use crate::usecase::password::verify_password;

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Credential check. Every failure mode (unknown user, wrong password,
    /// unverified account) collapses into the same generic error.
    pub async fn execute(&self, input: LoginInput) -> Result<User, HelpdeskError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(HelpdeskError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, &input.password) {
            return Err(HelpdeskError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(HelpdeskError::InvalidCredentials);
        }
        Ok(user)
    }
}
