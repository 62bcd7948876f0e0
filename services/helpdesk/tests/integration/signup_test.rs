use helpdesk::error::HelpdeskError;
use helpdesk::usecase::signup::{SignupInput, SignupUseCase};
use helpdesk_domain::upload::DEFAULT_AVATAR;

use crate::helpers::{MockMailer, MockOtpRepo, MockProfileRepo, MockUserRepo, test_user};

fn signup_input(username: &str, email: &str) -> SignupInput {
    SignupInput {
        username: username.to_owned(),
        email: email.to_owned(),
        phone: Some("+15550001111".to_owned()),
        password1: "long-enough-password".to_owned(),
        password2: "long-enough-password".to_owned(),
    }
}

fn usecase(
    users: MockUserRepo,
    otps: MockOtpRepo,
    profiles: MockProfileRepo,
    mailer: MockMailer,
) -> SignupUseCase<MockUserRepo, MockOtpRepo, MockProfileRepo, MockMailer> {
    SignupUseCase {
        users,
        otps,
        profiles,
        mailer,
    }
}

#[tokio::test]
async fn should_create_inactive_user_with_profile_and_otp() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let profiles = MockProfileRepo::empty();
    let mailer = MockMailer::working();
    let uc = usecase(users.clone(), otps.clone(), profiles.clone(), mailer.clone());

    let out = uc.execute(signup_input("alice", "alice@example.com")).await.unwrap();

    let user = users.get(out.user_id).expect("user should exist");
    assert!(!user.is_active, "new user must be inactive until OTP check");
    assert_ne!(
        user.password_hash, "long-enough-password",
        "password must be stored hashed"
    );

    let profile = profiles.get(out.user_id).expect("profile auto-created");
    assert_eq!(profile.picture, DEFAULT_AVATAR);

    assert_eq!(otps.count(), 1);
    assert_eq!(mailer.sent_count(), 1);
    let body = mailer.last_body().unwrap();
    assert!(body.starts_with("Your OTP is "));
}

#[tokio::test]
async fn should_reject_mismatched_passwords_without_creating_user() {
    let users = MockUserRepo::empty();
    let mailer = MockMailer::working();
    let uc = usecase(
        users.clone(),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        mailer.clone(),
    );

    let mut input = signup_input("alice", "alice@example.com");
    input.password2 = "a-different-password".to_owned();
    let result = uc.execute(input).await;

    assert!(matches!(result, Err(HelpdeskError::PasswordMismatch)));
    assert_eq!(users.count(), 0);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_email_without_mail() {
    let existing = test_user("bob", true);
    let users = MockUserRepo::new(vec![existing.clone()]);
    let mailer = MockMailer::working();
    let uc = usecase(
        users.clone(),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        mailer.clone(),
    );

    let result = uc.execute(signup_input("alice", &existing.email)).await;

    assert!(matches!(result, Err(HelpdeskError::EmailTaken)));
    assert_eq!(users.count(), 1);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_username_without_mail() {
    let existing = test_user("alice", true);
    let users = MockUserRepo::new(vec![existing]);
    let mailer = MockMailer::working();
    let uc = usecase(
        users.clone(),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        mailer.clone(),
    );

    let result = uc.execute(signup_input("alice", "fresh@example.com")).await;

    assert!(matches!(result, Err(HelpdeskError::UsernameTaken)));
    assert_eq!(users.count(), 1);
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn password_mismatch_is_reported_before_uniqueness() {
    // Same email as an existing user AND mismatched passwords: the form
    // reports the mismatch first.
    let existing = test_user("bob", true);
    let uc = usecase(
        MockUserRepo::new(vec![existing.clone()]),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        MockMailer::working(),
    );

    let mut input = signup_input("alice", &existing.email);
    input.password2 = "a-different-password".to_owned();
    let result = uc.execute(input).await;

    assert!(matches!(result, Err(HelpdeskError::PasswordMismatch)));
}

#[tokio::test]
async fn mail_failure_rolls_back_the_created_user() {
    let users = MockUserRepo::empty();
    let uc = usecase(
        users.clone(),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        MockMailer::broken(),
    );

    let result = uc.execute(signup_input("alice", "alice@example.com")).await;

    assert!(matches!(result, Err(HelpdeskError::MailDelivery(_))));
    assert_eq!(users.count(), 0, "failed signup must not leave a user behind");
}

#[tokio::test]
async fn should_reject_weak_password() {
    let uc = usecase(
        MockUserRepo::empty(),
        MockOtpRepo::empty(),
        MockProfileRepo::empty(),
        MockMailer::working(),
    );

    let mut input = signup_input("alice", "alice@example.com");
    input.password1 = "short".to_owned();
    input.password2 = "short".to_owned();
    let result = uc.execute(input).await;

    assert!(matches!(result, Err(HelpdeskError::InvalidPassword)));
}
