use std::sync::Arc;
use tracing::{error, info, warn};

use crate::app::AppConfig;
use crate::clients::{BookApiClient, ClientError, ImageApiClient};
use crate::core::{BookDraft, BookRecord, Session, User, WorkflowError};
use crate::presenter::{Presenter, Route};
use crate::store::BookStore;
use crate::workflow::registration::{LOGIN_REQUIRED_MSG, SUBMISSION_FAILED_MSG};
use crate::workflow::{RegistrationWorkflow, WorkflowDeps};

const BOOK_ADDED_MSG: &str = "책이 등록되었습니다!";

/// 애플리케이션 셸: 목록 상태를 소유하고 각 화면에 협력자를 나눠 준다
pub struct AppShell {
    deps: WorkflowDeps,
    store: BookStore,
    mounted: bool,
}

impl AppShell {
    pub fn new(deps: WorkflowDeps) -> Self {
        Self {
            deps,
            store: BookStore::new(),
            mounted: false,
        }
    }

    /// 설정에 적힌 주소로 실제 HTTP 클라이언트를 만든다
    pub fn from_config(
        config: &AppConfig,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self, ClientError> {
        let deps = WorkflowDeps {
            images: Arc::new(ImageApiClient::from_config(config)?),
            books: Arc::new(BookApiClient::from_config(config)?),
            presenter,
        };
        Ok(Self::new(deps))
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// 최초 한 번만 목록을 가져온다. 실패하면 빈 목록으로 남는다.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        match self.deps.books.list().await {
            Ok(records) => self.store.list_loaded(records),
            Err(e) => error!("서버 연결 실패: {}", e),
        }
    }

    /// 셸에서 바로 도서를 등록한다 (워크플로와 같은 create 경로)
    pub async fn add_book(
        &mut self,
        session: &Session,
        draft: &BookDraft,
    ) -> Result<Option<BookRecord>, WorkflowError> {
        let user = self.require_user(session)?.clone();

        match self.deps.books.create(&user.id, draft).await {
            Ok(record) => {
                let record = self.append_created(record, &user);
                self.deps.presenter.alert(BOOK_ADDED_MSG);
                Ok(record)
            }
            Err(e) => {
                error!("책 등록 실패: {}", e);
                let message = e.user_message(SUBMISSION_FAILED_MSG);
                self.deps
                    .presenter
                    .alert(&format!("{}: {}", SUBMISSION_FAILED_MSG, message));
                Err(WorkflowError::SubmissionFailed { message, source: e })
            }
        }
    }

    pub fn open_registration(&self, session: &Session) -> Result<RegistrationWorkflow, WorkflowError> {
        RegistrationWorkflow::enter(session, self.deps.clone())
    }

    /// 워크플로 제출 후 만들어진 레코드를 목록에 반영한다
    pub async fn complete_registration(
        &mut self,
        workflow: &RegistrationWorkflow,
    ) -> Result<Option<BookRecord>, WorkflowError> {
        let record = workflow.submit_draft().await?;
        Ok(self.append_created(record, workflow.owner()))
    }

    fn append_created(&mut self, record: Option<BookRecord>, owner: &User) -> Option<BookRecord> {
        let Some(record) = record else {
            warn!("서버가 등록된 레코드를 돌려주지 않아 목록에 반영하지 않습니다");
            return None;
        };
        let record = with_owner(record, owner);
        self.store.record_added(record.clone());
        info!("📚 목록에 새 도서 반영 (총 {} 권)", self.store.len());
        Some(record)
    }

    pub fn book(&self, id: &str) -> Option<&BookRecord> {
        self.store.get(id)
    }

    /// 상세 화면. 목록에 있는 도서일 때만 이동한다.
    pub fn open_book(&self, id: &str) -> Option<&BookRecord> {
        let book = self.store.get(id)?;
        self.deps.presenter.navigate(Route::BookDetail(book.id.clone()));
        Some(book)
    }

    /// 로그인한 사용자가 등록한 도서
    pub fn profile_books(&self, session: &Session) -> Result<Vec<&BookRecord>, WorkflowError> {
        let user = self.require_user(session)?;
        Ok(self.store.owned_by(&user.id))
    }

    /// 프로필 화면으로 이동하고 내 도서를 돌려준다
    pub fn open_profile(&self, session: &Session) -> Result<Vec<&BookRecord>, WorkflowError> {
        let books = self.profile_books(session)?;
        self.deps.presenter.navigate(Route::Profile);
        Ok(books)
    }

    fn require_user<'s>(&self, session: &'s Session) -> Result<&'s User, WorkflowError> {
        match session.user() {
            Some(user) => Ok(user),
            None => {
                warn!("로그인이 필요한 화면 접근");
                self.deps.presenter.alert(LOGIN_REQUIRED_MSG);
                self.deps.presenter.navigate(Route::Login);
                Err(WorkflowError::Unauthorized)
            }
        }
    }
}

// 서버가 소유자를 돌려주지 않으면 요청한 사용자로 채운다
fn with_owner(mut record: BookRecord, user: &User) -> BookRecord {
    if record.owner_id.is_none() {
        record.owner_id = Some(user.id.clone());
    }
    record
}
