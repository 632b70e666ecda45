#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use book_publisher::core::{BookDraft, BookRecord, Session, User};
use book_publisher::workflow::CredentialPrompt;
use book_publisher::{BookService, ClientError, ImageGenerator, Presenter, Route, WorkflowDeps};

pub fn http_error(status: u16, body: &str) -> ClientError {
    ClientError::Http {
        status: reqwest::StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
    }
}

pub fn signed_in(id: &str) -> Session {
    Session::signed_in(User {
        id: id.to_string(),
        name: Some("tester".to_string()),
    })
}

/// 호출을 기록하고 미리 넣어 둔 응답을 돌려주는 이미지 API
#[derive(Default)]
pub struct FakeImages {
    responses: Mutex<VecDeque<Result<String, ClientError>>>,
    pub calls: Mutex<Vec<(String, String)>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl FakeImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// `entered` 는 호출이 시작되면 알리고, `release` 가 올 때까지 응답을 미룬다
    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::default()
        }
    }

    pub fn push(&self, response: Result<String, ClientError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), credential.to_string()));
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ClientError::EmptyResult))
    }
}

/// 도서 백엔드 대역
#[derive(Default)]
pub struct FakeBooks {
    pub listed: Mutex<Vec<BookRecord>>,
    pub list_fails: bool,
    pub list_calls: Mutex<usize>,
    create_responses: Mutex<VecDeque<Result<Option<BookRecord>, ClientError>>>,
    pub created: Mutex<Vec<(String, BookDraft)>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl FakeBooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(records: Vec<BookRecord>) -> Self {
        Self {
            listed: Mutex::new(records),
            ..Self::default()
        }
    }

    /// create 호출을 `release` 가 올 때까지 붙잡아 둔다
    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            list_fails: true,
            ..Self::default()
        }
    }

    pub fn push_create(&self, response: Result<Option<BookRecord>, ClientError>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl BookService for FakeBooks {
    async fn list(&self) -> Result<Vec<BookRecord>, ClientError> {
        *self.list_calls.lock().unwrap() += 1;
        if self.list_fails {
            return Err(http_error(503, ""));
        }
        Ok(self.listed.lock().unwrap().clone())
    }

    async fn create(
        &self,
        owner_id: &str,
        draft: &BookDraft,
    ) -> Result<Option<BookRecord>, ClientError> {
        self.created
            .lock()
            .unwrap()
            .push((owner_id.to_string(), draft.clone()));
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        let queued = self.create_responses.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            let n = self.created.lock().unwrap().len();
            Ok(Some(BookRecord {
                id: format!("book-{}", n),
                title: draft.title.clone(),
                content: draft.content.clone(),
                category: draft.category,
                cover_image_url: draft.cover_image_url.clone(),
                owner_id: None,
            }))
        })
    }
}

/// 알림과 화면 이동을 기록
#[derive(Default)]
pub struct RecordingPresenter {
    pub alerts: Mutex<Vec<String>>,
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingPresenter {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// 정해진 답을 돌려주는 키 입력 창
pub struct FixedPrompt(pub Option<String>);

#[async_trait]
impl CredentialPrompt for FixedPrompt {
    async fn request_credential(&self) -> Option<String> {
        self.0.clone()
    }
}

pub struct Harness {
    pub images: Arc<FakeImages>,
    pub books: Arc<FakeBooks>,
    pub presenter: Arc<RecordingPresenter>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(FakeImages::new(), FakeBooks::new())
    }

    pub fn with(images: FakeImages, books: FakeBooks) -> Self {
        Self {
            images: Arc::new(images),
            books: Arc::new(books),
            presenter: Arc::new(RecordingPresenter::default()),
        }
    }

    pub fn deps(&self) -> WorkflowDeps {
        WorkflowDeps {
            images: self.images.clone(),
            books: self.books.clone(),
            presenter: self.presenter.clone(),
        }
    }
}
