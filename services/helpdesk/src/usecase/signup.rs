use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use helpdesk_domain::upload::DEFAULT_AVATAR;
use helpdesk_domain::user::UserRole;

use crate::domain::repository::{MailPort, OtpRepository, ProfileRepository, UserRepository};
use crate::domain::types::{
    Otp, Profile, User, validate_email, validate_password, validate_username,
};
use crate::error::HelpdeskError;
use crate::usecase::password::hash_password;

fn generate_otp() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..=999_999u32).to_string()
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug)]
pub struct SignupOutput {
    pub user_id: Uuid,
}

pub struct SignupUseCase<U, O, P, M>
where
    U: UserRepository,
    O: OtpRepository,
    P: ProfileRepository,
    M: MailPort,
{
    pub users: U,
    pub otps: O,
    pub profiles: P,
    pub mailer: M,
}

impl<U, O, P, M> SignupUseCase<U, O, P, M>
where
    U: UserRepository,
    O: OtpRepository,
    P: ProfileRepository,
    M: MailPort,
{
    pub async fn execute(&self, input: SignupInput) -> Result<SignupOutput, HelpdeskError> {
        if !validate_username(&input.username) {
            return Err(HelpdeskError::InvalidUsername);
        }
        if !validate_email(&input.email) {
            return Err(HelpdeskError::InvalidEmail);
        }
        if !validate_password(&input.password1) {
            return Err(HelpdeskError::InvalidPassword);
        }
        // Checks run in the order the form reports them: password match,
        // then email, then username.
        if input.password1 != input.password2 {
            return Err(HelpdeskError::PasswordMismatch);
        }
        if self.users.email_exists(&input.email).await? {
            return Err(HelpdeskError::EmailTaken);
        }
        if self.users.username_exists(&input.username).await? {
            return Err(HelpdeskError::UsernameTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email.clone(),
            phone: input.phone.filter(|p| !p.trim().is_empty()),
            password_hash: hash_password(&input.password1)?,
            role: UserRole::Normal,
            is_active: false,
            created_at: now,
        };
        self.users.create(&user).await?;

        // Profile creation is an explicit signup step, not a save hook.
        self.profiles
            .create(&Profile {
                user_id: user.id,
                bio: None,
                picture: DEFAULT_AVATAR.to_owned(),
            })
            .await?;

        let code = generate_otp();
        self.otps
            .create(&Otp {
                id: Uuid::new_v4(),
                user_id: user.id,
                code: code.clone(),
                created_at: now,
            })
            .await?;

        // Mail is synchronous. On failure the signup rolls back entirely so
        // the email/username are not locked by an unreachable account.
        if let Err(e) = self
            .mailer
            .send(&input.email, "Your OTP Code", &format!("Your OTP is {code}"))
            .await
        {
            self.users.delete(user.id).await?;
            return Err(e);
        }

        Ok(SignupOutput { user_id: user.id })
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user_id: Uuid,
    pub role: UserRole,
}

pub struct VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub async fn execute(&self, user_id: Uuid, code: &str) -> Result<VerifyOtpOutput, HelpdeskError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(HelpdeskError::UserNotFound)?;

        // Most recent code wins; older rows are superseded, not consumed.
        let otp = self
            .otps
            .find_latest(user.id)
            .await?
            .ok_or(HelpdeskError::InvalidOtp)?;

        if otp.code != code || otp.is_expired() {
            return Err(HelpdeskError::InvalidOtp);
        }

        self.users.activate(user.id).await?;
        Ok(VerifyOtpOutput {
            user_id: user.id,
            role: user.role,
        })
    }
}

// ── ResendOtp ────────────────────────────────────────────────────────────────

pub struct ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailPort,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailPort,
{
    /// Mint a fresh code and re-send it. Prior codes stay in storage; the
    /// latest-wins lookup supersedes them. No rate limit.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), HelpdeskError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(HelpdeskError::UserNotFound)?;

        let code = generate_otp();
        self.otps
            .create(&Otp {
                id: Uuid::new_v4(),
                user_id: user.id,
                code: code.clone(),
                created_at: Utc::now(),
            })
            .await?;

        self.mailer
            .send(
                &user.email,
                "Your OTP Code",
                &format!("Your new OTP is {code}"),
            )
            .await
    }
}
