mod common;

use book_publisher::core::{BookDraft, BookRecord, Category, Session};
use book_publisher::{AppShell, Route, WorkflowError};
use common::{FakeBooks, FakeImages, Harness, http_error, signed_in};

fn record(id: &str, owner: &str) -> BookRecord {
    BookRecord {
        id: id.to_string(),
        title: format!("책 {}", id),
        content: "소개".to_string(),
        category: Category::Mystery,
        cover_image_url: None,
        owner_id: Some(owner.to_string()),
    }
}

#[tokio::test]
async fn test_mount_fetches_list_exactly_once() {
    let h = Harness::with(
        FakeImages::new(),
        FakeBooks::with_list(vec![record("1", "7"), record("2", "8")]),
    );
    let mut shell = AppShell::new(h.deps());

    shell.mount().await;
    shell.mount().await;

    assert_eq!(*h.books.list_calls.lock().unwrap(), 1);
    assert!(shell.store().is_loaded());
    assert_eq!(shell.store().len(), 2);
    assert_eq!(shell.book("2").map(|b| b.title.as_str()), Some("책 2"));
}

#[tokio::test]
async fn test_mount_failure_leaves_empty_store() {
    let h = Harness::with(FakeImages::new(), FakeBooks::failing_list());
    let mut shell = AppShell::new(h.deps());

    shell.mount().await;

    assert!(!shell.store().is_loaded());
    assert!(shell.store().is_empty());
    assert!(h.presenter.alerts().is_empty());
}

#[tokio::test]
async fn test_completed_registration_is_added_to_store() {
    let h = Harness::with(FakeImages::new(), FakeBooks::with_list(vec![record("1", "8")]));
    let mut shell = AppShell::new(h.deps());
    shell.mount().await;

    let session = signed_in("7");
    let workflow = shell.open_registration(&session).unwrap();
    workflow.set_title("새 책").await.unwrap();
    workflow.set_content("새 소개").await.unwrap();

    let created = shell.complete_registration(&workflow).await.unwrap().unwrap();

    assert_eq!(created.owner_id.as_deref(), Some("7"));
    assert_eq!(shell.store().len(), 2);
    assert_eq!(shell.book(&created.id).map(|b| b.title.as_str()), Some("새 책"));
    assert_eq!(h.presenter.routes(), vec![Route::Home]);

    let mine = shell.profile_books(&session).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, created.id);
}

#[tokio::test]
async fn test_registration_without_returned_record_skips_store() {
    let h = Harness::with(FakeImages::new(), FakeBooks::with_list(vec![record("1", "8")]));
    h.books.push_create(Ok(None));
    let mut shell = AppShell::new(h.deps());
    shell.mount().await;

    let workflow = shell.open_registration(&signed_in("7")).unwrap();
    workflow.set_title("새 책").await.unwrap();

    let created = shell.complete_registration(&workflow).await.unwrap();

    assert!(created.is_none());
    assert_eq!(shell.store().len(), 1);
    assert_eq!(h.books.create_count(), 1);
    assert_eq!(h.presenter.routes(), vec![Route::Home]);
}

#[tokio::test]
async fn test_detail_and_profile_navigate() {
    let h = Harness::with(
        FakeImages::new(),
        FakeBooks::with_list(vec![record("1", "7"), record("2", "8")]),
    );
    let mut shell = AppShell::new(h.deps());
    shell.mount().await;

    assert!(shell.open_book("missing").is_none());
    assert_eq!(shell.open_book("2").map(|b| b.title.as_str()), Some("책 2"));
    let mine = shell.open_profile(&signed_in("7")).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, "1");

    assert_eq!(
        h.presenter.routes(),
        vec![Route::BookDetail("2".to_string()), Route::Profile]
    );
}

#[tokio::test]
async fn test_failed_registration_does_not_touch_store() {
    let h = Harness::new();
    h.books.push_create(Err(http_error(400, r#"{"message": "잘못된 요청"}"#)));
    let mut shell = AppShell::new(h.deps());
    shell.mount().await;

    let workflow = shell.open_registration(&signed_in("7")).unwrap();
    let err = shell.complete_registration(&workflow).await.unwrap_err();

    assert!(matches!(err, WorkflowError::SubmissionFailed { .. }));
    assert!(shell.store().is_empty());
    assert!(h.presenter.routes().is_empty());
}

#[tokio::test]
async fn test_add_book_uses_unified_create_path() {
    let h = Harness::new();
    let mut shell = AppShell::new(h.deps());
    shell.mount().await;

    let mut draft = BookDraft::new();
    draft.set_title("바로 등록");
    draft.set_content("소개");
    draft.category = Category::Poetry;

    let added = shell.add_book(&signed_in("9"), &draft).await.unwrap().unwrap();

    let created = h.books.created.lock().unwrap().clone();
    assert_eq!(created, vec![("9".to_string(), draft)]);
    assert_eq!(added.owner_id.as_deref(), Some("9"));
    assert_eq!(shell.store().len(), 1);
    assert_eq!(h.presenter.alerts(), vec!["책이 등록되었습니다!".to_string()]);
}

#[tokio::test]
async fn test_signed_out_pages_redirect_to_login() {
    let h = Harness::new();
    let mut shell = AppShell::new(h.deps());

    assert!(matches!(
        shell.open_registration(&Session::anonymous()),
        Err(WorkflowError::Unauthorized)
    ));
    assert!(matches!(
        shell.profile_books(&Session::anonymous()),
        Err(WorkflowError::Unauthorized)
    ));
    assert!(matches!(
        shell.add_book(&Session::anonymous(), &BookDraft::new()).await,
        Err(WorkflowError::Unauthorized)
    ));

    assert_eq!(h.presenter.routes(), vec![Route::Login, Route::Login, Route::Login]);
    assert_eq!(h.books.create_count(), 0);
}
