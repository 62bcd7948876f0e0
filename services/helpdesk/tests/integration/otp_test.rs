use uuid::Uuid;

use helpdesk::error::HelpdeskError;
use helpdesk::usecase::signup::{ResendOtpUseCase, VerifyOtpUseCase};

use crate::helpers::{MockMailer, MockOtpRepo, MockUserRepo, test_otp, test_user};

#[tokio::test]
async fn should_activate_user_on_valid_code() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![test_otp(user.id, "123456", 5)]);
    let uc = VerifyOtpUseCase {
        users: users.clone(),
        otps,
    };

    let out = uc.execute(user.id, "123456").await.unwrap();

    assert_eq!(out.user_id, user.id);
    assert!(users.get(user.id).unwrap().is_active);
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![test_otp(user.id, "123456", 5)]);
    let uc = VerifyOtpUseCase {
        users: users.clone(),
        otps,
    };

    let result = uc.execute(user.id, "654321").await;

    assert!(matches!(result, Err(HelpdeskError::InvalidOtp)));
    assert!(!users.get(user.id).unwrap().is_active);
}

#[tokio::test]
async fn correct_code_after_61_seconds_must_fail() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![test_otp(user.id, "123456", 61)]);
    let uc = VerifyOtpUseCase {
        users: users.clone(),
        otps,
    };

    let result = uc.execute(user.id, "123456").await;

    assert!(matches!(result, Err(HelpdeskError::InvalidOtp)));
    assert!(!users.get(user.id).unwrap().is_active);
}

#[tokio::test]
async fn code_within_60_seconds_still_verifies() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![test_otp(user.id, "123456", 59)]);
    let uc = VerifyOtpUseCase { users, otps };

    assert!(uc.execute(user.id, "123456").await.is_ok());
}

#[tokio::test]
async fn verification_uses_the_most_recent_code() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    // Older code is still within its TTL but superseded.
    let otps = MockOtpRepo::new(vec![
        test_otp(user.id, "111111", 30),
        test_otp(user.id, "222222", 5),
    ]);
    let uc = VerifyOtpUseCase {
        users: users.clone(),
        otps,
    };

    let result = uc.execute(user.id, "111111").await;
    assert!(
        matches!(result, Err(HelpdeskError::InvalidOtp)),
        "superseded code must not verify"
    );

    uc.execute(user.id, "222222").await.unwrap();
    assert!(users.get(user.id).unwrap().is_active);
}

#[tokio::test]
async fn resend_keeps_prior_codes_in_storage() {
    let user = test_user("alice", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![test_otp(user.id, "111111", 30)]);
    let mailer = MockMailer::working();
    let uc = ResendOtpUseCase {
        users,
        otps: otps.clone(),
        mailer: mailer.clone(),
    };

    uc.execute(user.id).await.unwrap();

    assert_eq!(otps.count(), 2, "resend supersedes, never deletes");
    assert_eq!(mailer.sent_count(), 1);
    assert!(mailer.last_body().unwrap().starts_with("Your new OTP is "));
}

#[tokio::test]
async fn verify_with_unknown_user_reports_user_not_found() {
    let uc = VerifyOtpUseCase {
        users: MockUserRepo::empty(),
        otps: MockOtpRepo::empty(),
    };

    let result = uc.execute(Uuid::now_v7(), "123456").await;

    assert!(matches!(result, Err(HelpdeskError::UserNotFound)));
}
