use helpdesk::error::HelpdeskError;
use helpdesk::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{MockUserRepo, TEST_PASSWORD, test_user};

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_log_in_active_user_with_correct_password() {
    let user = test_user("alice", true);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let logged_in = uc.execute(login("alice", TEST_PASSWORD)).await.unwrap();
    assert_eq!(logged_in.id, user.id);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![test_user("alice", true)]),
    };

    let result = uc.execute(login("alice", "not-the-password")).await;
    assert!(matches!(result, Err(HelpdeskError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unknown_username() {
    let uc = LoginUseCase {
        users: MockUserRepo::empty(),
    };

    let result = uc.execute(login("nobody", TEST_PASSWORD)).await;
    assert!(matches!(result, Err(HelpdeskError::InvalidCredentials)));
}

#[tokio::test]
async fn unverified_user_cannot_authenticate() {
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![test_user("alice", false)]),
    };

    let result = uc.execute(login("alice", TEST_PASSWORD)).await;
    assert!(
        matches!(result, Err(HelpdeskError::InvalidCredentials)),
        "inactive accounts must not log in, even with the right password"
    );
}
