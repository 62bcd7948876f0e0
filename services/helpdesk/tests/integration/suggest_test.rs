use uuid::Uuid;

use helpdesk::error::HelpdeskError;
use helpdesk::usecase::suggest::{DraftAnswerUseCase, SuggestUseCase};

use crate::helpers::{MockCompletion, MockQuestionRepo, test_question};

// ── Heuristic suggestions ────────────────────────────────────────────────────

#[tokio::test]
async fn suggest_on_missing_question_reports_not_found() {
    let uc = SuggestUseCase {
        repo: MockQuestionRepo::default(),
    };

    let result = uc.execute(999, None).await;
    assert!(matches!(result, Err(HelpdeskError::QuestionNotFound)));
}

#[tokio::test]
async fn suggest_uses_question_title_and_body_by_default() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Panic on boot", "stack trace attached");
    let uc = SuggestUseCase { repo };

    let suggestions = uc.execute(question.id, None).await.unwrap();

    assert_eq!(suggestions.len(), 3);
    assert!(suggestions[0].contains("Panic on boot"));
}

#[tokio::test]
async fn explicit_request_text_wins_over_question_text() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Ignored title", "ignored body");
    let uc = SuggestUseCase { repo };

    let suggestions = uc
        .execute(question.id, Some("custom focus area".to_owned()))
        .await
        .unwrap();

    assert!(suggestions[0].contains("custom focus area"));
    assert!(!suggestions[0].contains("Ignored title"));
}

#[tokio::test]
async fn blank_request_text_falls_back_to_question() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Fallback title", "body");
    let uc = SuggestUseCase { repo };

    let suggestions = uc
        .execute(question.id, Some("   ".to_owned()))
        .await
        .unwrap();

    assert!(suggestions[0].contains("Fallback title"));
}

// ── Draft answer chain ───────────────────────────────────────────────────────

#[tokio::test]
async fn draft_answer_is_fake_without_api_credential() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "No key configured", "body");
    let uc = DraftAnswerUseCase::<_, MockCompletion> {
        repo,
        completion: None,
        force_fake: false,
    };

    let answer = uc.execute(question.id).await.unwrap();
    assert!(answer.starts_with("(FAKE-AI) Draft for: No key configured"));
}

#[tokio::test]
async fn force_fake_flag_bypasses_a_configured_backend() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Forced fake", "body");
    let uc = DraftAnswerUseCase {
        repo,
        completion: Some(MockCompletion::answering("real model answer")),
        force_fake: true,
    };

    let answer = uc.execute(question.id).await.unwrap();
    assert!(answer.starts_with("(FAKE-AI)"));
}

#[tokio::test]
async fn backend_answer_is_returned_trimmed() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Real call", "body");
    let uc = DraftAnswerUseCase {
        repo,
        completion: Some(MockCompletion::answering("  spaced out answer \n")),
        force_fake: false,
    };

    let answer = uc.execute(question.id).await.unwrap();
    assert_eq!(answer, "spaced out answer");
}

#[tokio::test]
async fn backend_failure_degrades_to_diagnostic_text() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Flaky backend", "body");
    let uc = DraftAnswerUseCase {
        repo,
        completion: Some(MockCompletion::failing("rate limited")),
        force_fake: false,
    };

    let answer = uc.execute(question.id).await.unwrap();
    assert_eq!(
        answer,
        "(AI error) Could not fetch AI answer: rate limited",
        "backend errors must never fail the request"
    );
}

#[tokio::test]
async fn draft_answer_on_missing_question_reports_not_found() {
    let uc = DraftAnswerUseCase::<_, MockCompletion> {
        repo: MockQuestionRepo::default(),
        completion: None,
        force_fake: false,
    };

    let result = uc.execute(1).await;
    assert!(matches!(result, Err(HelpdeskError::QuestionNotFound)));
}
