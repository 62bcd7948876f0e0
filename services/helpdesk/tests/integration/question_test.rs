use chrono::Utc;
use uuid::Uuid;

use helpdesk::domain::types::Upload;
use helpdesk::error::HelpdeskError;
use helpdesk::usecase::comment::{
    CreateCommentInput, CreateCommentUseCase, DeleteCommentUseCase, EditCommentInput,
    EditCommentUseCase,
};
use helpdesk::usecase::question::{
    CreateQuestionInput, CreateQuestionUseCase, DeleteQuestionFileUseCase, DeleteQuestionUseCase,
    EditQuestionInput, EditQuestionUseCase, SearchQuestionsUseCase,
};
use helpdesk_domain::pagination::PageRequest;
use helpdesk_domain::user::UserRole;

use crate::helpers::{MockFileStore, MockQuestionRepo, test_question};

fn upload(name: &str) -> Upload {
    Upload {
        filename: name.to_owned(),
        bytes: b"file-bytes".to_vec(),
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_question_with_attachment() {
    let repo = MockQuestionRepo::default();
    let files = MockFileStore::empty();
    let uc = CreateQuestionUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };

    let question = uc
        .execute(
            Uuid::now_v7(),
            CreateQuestionInput {
                title: "Build fails on CI".to_owned(),
                body: "The pipeline dies at the link step.".to_owned(),
                upload: Some(upload("trace.log")),
            },
        )
        .await
        .unwrap();

    let stored = repo.get(question.id).unwrap();
    let path = stored.file.expect("file path stored");
    assert!(path.starts_with("uploads/"));
    assert!(files.contains(&path));
}

#[tokio::test]
async fn should_reject_question_without_body() {
    let uc = CreateQuestionUseCase {
        repo: MockQuestionRepo::default(),
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(
            Uuid::now_v7(),
            CreateQuestionInput {
                title: "Title only".to_owned(),
                body: "   ".to_owned(),
                upload: None,
            },
        )
        .await;

    assert!(matches!(result, Err(HelpdeskError::MissingData)));
}

#[tokio::test]
async fn should_reject_disallowed_attachment_type() {
    let repo = MockQuestionRepo::default();
    let uc = CreateQuestionUseCase {
        repo: repo.clone(),
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(
            Uuid::now_v7(),
            CreateQuestionInput {
                title: "Suspicious".to_owned(),
                body: "body".to_owned(),
                upload: Some(upload("payload.exe")),
            },
        )
        .await;

    assert!(matches!(result, Err(HelpdeskError::InvalidUpload(_))));
    assert!(repo.store.lock().unwrap().questions.is_empty());
}

// ── Edit / authorization ─────────────────────────────────────────────────────

#[tokio::test]
async fn stranger_cannot_edit_question_and_record_is_unchanged() {
    let repo = MockQuestionRepo::default();
    let owner = Uuid::now_v7();
    let question = test_question(&repo, owner, "Original title", "Original body");
    let uc = EditQuestionUseCase {
        repo: repo.clone(),
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(
            Uuid::now_v7(),
            UserRole::Normal,
            question.id,
            EditQuestionInput {
                title: "Hijacked".to_owned(),
                body: "Hijacked".to_owned(),
                upload: None,
            },
        )
        .await;

    assert!(matches!(result, Err(HelpdeskError::Forbidden)));
    let stored = repo.get(question.id).unwrap();
    assert_eq!(stored.title, "Original title");
    assert_eq!(stored.body, "Original body");
}

#[tokio::test]
async fn owner_can_edit_question() {
    let repo = MockQuestionRepo::default();
    let owner = Uuid::now_v7();
    let question = test_question(&repo, owner, "Old", "Old body");
    let uc = EditQuestionUseCase {
        repo: repo.clone(),
        files: MockFileStore::empty(),
    };

    uc.execute(
        owner,
        UserRole::Normal,
        question.id,
        EditQuestionInput {
            title: "New".to_owned(),
            body: "New body".to_owned(),
            upload: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(repo.get(question.id).unwrap().title, "New");
}

#[tokio::test]
async fn superuser_can_edit_any_question() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Old", "Old body");
    let uc = EditQuestionUseCase {
        repo: repo.clone(),
        files: MockFileStore::empty(),
    };

    uc.execute(
        Uuid::now_v7(),
        UserRole::Superuser,
        question.id,
        EditQuestionInput {
            title: "Moderated".to_owned(),
            body: "Moderated body".to_owned(),
            upload: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(repo.get(question.id).unwrap().title, "Moderated");
}

#[tokio::test]
async fn editing_file_replaces_the_old_one() {
    let repo = MockQuestionRepo::default();
    let files = MockFileStore::empty();
    let owner = Uuid::now_v7();
    let uc = CreateQuestionUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };
    let question = uc
        .execute(
            owner,
            CreateQuestionInput {
                title: "With file".to_owned(),
                body: "body".to_owned(),
                upload: Some(upload("old.png")),
            },
        )
        .await
        .unwrap();
    let old_path = repo.get(question.id).unwrap().file.unwrap();

    let edit = EditQuestionUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };
    edit.execute(
        owner,
        UserRole::Normal,
        question.id,
        EditQuestionInput {
            title: "With file".to_owned(),
            body: "body".to_owned(),
            upload: Some(upload("new.png")),
        },
    )
    .await
    .unwrap();

    let new_path = repo.get(question.id).unwrap().file.unwrap();
    assert_ne!(new_path, old_path);
    assert!(!files.contains(&old_path), "old file must be deleted");
    assert!(files.contains(&new_path));
}

// ── Delete / cascade ─────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_question_removes_comments_and_media() {
    let repo = MockQuestionRepo::default();
    let comments = repo.comment_repo();
    let files = MockFileStore::empty();
    let owner = Uuid::now_v7();

    let create = CreateQuestionUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };
    let question = create
        .execute(
            owner,
            CreateQuestionInput {
                title: "Doomed".to_owned(),
                body: "body".to_owned(),
                upload: Some(upload("q.pdf")),
            },
        )
        .await
        .unwrap();

    let comment_uc = CreateCommentUseCase {
        questions: repo.clone(),
        comments: comments.clone(),
        files: files.clone(),
    };
    comment_uc
        .execute(
            Uuid::now_v7(),
            question.id,
            CreateCommentInput {
                content: "me too".to_owned(),
                upload: Some(upload("c.png")),
            },
        )
        .await
        .unwrap();
    assert_eq!(repo.comment_count(question.id), 1);
    assert_eq!(files.stored_count(), 2);

    let delete = DeleteQuestionUseCase {
        repo: repo.clone(),
        comments: comments.clone(),
        files: files.clone(),
    };
    delete
        .execute(owner, UserRole::Normal, question.id)
        .await
        .unwrap();

    assert!(repo.get(question.id).is_none());
    assert_eq!(repo.comment_count(question.id), 0, "comments must cascade");
    assert_eq!(files.stored_count(), 0, "attachments must be cleaned up");
}

#[tokio::test]
async fn stranger_cannot_delete_question() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "Keep me", "body");
    let uc = DeleteQuestionUseCase {
        repo: repo.clone(),
        comments: repo.comment_repo(),
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(Uuid::now_v7(), UserRole::Normal, question.id)
        .await;

    assert!(matches!(result, Err(HelpdeskError::Forbidden)));
    assert!(repo.get(question.id).is_some());
}

// ── Detach file route ────────────────────────────────────────────────────────

#[tokio::test]
async fn owner_can_detach_question_file() {
    let repo = MockQuestionRepo::default();
    let files = MockFileStore::empty();
    let owner = Uuid::now_v7();
    let create = CreateQuestionUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };
    let question = create
        .execute(
            owner,
            CreateQuestionInput {
                title: "t".to_owned(),
                body: "b".to_owned(),
                upload: Some(upload("a.txt")),
            },
        )
        .await
        .unwrap();

    let uc = DeleteQuestionFileUseCase {
        repo: repo.clone(),
        files: files.clone(),
    };
    uc.execute(owner, UserRole::Normal, question.id)
        .await
        .unwrap();

    assert!(repo.get(question.id).unwrap().file.is_none());
    assert_eq!(files.stored_count(), 0);
}

#[tokio::test]
async fn stranger_detaching_file_is_forbidden() {
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "t", "b");
    let uc = DeleteQuestionFileUseCase {
        repo,
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(Uuid::now_v7(), UserRole::Normal, question.id)
        .await;
    assert!(matches!(result, Err(HelpdeskError::Forbidden)));
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn only_author_or_superuser_may_edit_comment() {
    let repo = MockQuestionRepo::default();
    let comments = repo.comment_repo();
    let author = Uuid::now_v7();
    let question = test_question(&repo, Uuid::now_v7(), "t", "b");

    let create = CreateCommentUseCase {
        questions: repo.clone(),
        comments: comments.clone(),
        files: MockFileStore::empty(),
    };
    let comment = create
        .execute(
            author,
            question.id,
            CreateCommentInput {
                content: "original".to_owned(),
                upload: None,
            },
        )
        .await
        .unwrap();

    let edit = EditCommentUseCase {
        comments: comments.clone(),
        files: MockFileStore::empty(),
    };

    let stranger = edit
        .execute(
            Uuid::now_v7(),
            UserRole::Normal,
            comment.id,
            EditCommentInput {
                content: "defaced".to_owned(),
                upload: None,
            },
        )
        .await;
    assert!(matches!(stranger, Err(HelpdeskError::Forbidden)));
    assert_eq!(comments.get(comment.id).unwrap().content, "original");

    edit.execute(
        Uuid::now_v7(),
        UserRole::Superuser,
        comment.id,
        EditCommentInput {
            content: "moderated".to_owned(),
            upload: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(comments.get(comment.id).unwrap().content, "moderated");
}

#[tokio::test]
async fn deleting_comment_removes_its_file() {
    let repo = MockQuestionRepo::default();
    let comments = repo.comment_repo();
    let files = MockFileStore::empty();
    let author = Uuid::now_v7();
    let question = test_question(&repo, Uuid::now_v7(), "t", "b");

    let create = CreateCommentUseCase {
        questions: repo.clone(),
        comments: comments.clone(),
        files: files.clone(),
    };
    let comment = create
        .execute(
            author,
            question.id,
            CreateCommentInput {
                content: "with file".to_owned(),
                upload: Some(upload("shot.png")),
            },
        )
        .await
        .unwrap();
    assert_eq!(files.stored_count(), 1);

    let delete = DeleteCommentUseCase {
        comments: comments.clone(),
        files: files.clone(),
    };
    delete
        .execute(author, UserRole::Normal, comment.id)
        .await
        .unwrap();

    assert!(comments.get(comment.id).is_none());
    assert_eq!(files.stored_count(), 0);
}

#[tokio::test]
async fn commenting_on_missing_question_fails() {
    let repo = MockQuestionRepo::default();
    let uc = CreateCommentUseCase {
        questions: repo.clone(),
        comments: repo.comment_repo(),
        files: MockFileStore::empty(),
    };

    let result = uc
        .execute(
            Uuid::now_v7(),
            42,
            CreateCommentInput {
                content: "into the void".to_owned(),
                upload: None,
            },
        )
        .await;

    assert!(matches!(result, Err(HelpdeskError::QuestionNotFound)));
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_query_returns_empty_results() {
    let repo = MockQuestionRepo::default();
    test_question(&repo, Uuid::now_v7(), "Visible", "body");
    let uc = SearchQuestionsUseCase { repo };

    assert!(uc.execute(None, PageRequest::default()).await.unwrap().is_empty());
    assert!(
        uc.execute(Some("   "), PageRequest::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn body_only_match_is_found_case_insensitively() {
    let repo = MockQuestionRepo::default();
    test_question(
        &repo,
        Uuid::now_v7(),
        "Unrelated title",
        "The SEGFAULT happens on startup",
    );
    test_question(&repo, Uuid::now_v7(), "Other", "Nothing to see");
    let uc = SearchQuestionsUseCase { repo };

    let results = uc
        .execute(Some("segfault"), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Unrelated title");
}

#[tokio::test]
async fn question_created_at_is_recent() {
    // Sanity on fixture clock handling: created_at must be "now", not epoch.
    let repo = MockQuestionRepo::default();
    let question = test_question(&repo, Uuid::now_v7(), "t", "b");
    assert!(Utc::now() - question.created_at < chrono::Duration::seconds(5));
}
