use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::credential::{CredentialHolder, CredentialPrompt, ImageCredential};
use super::state::Phase;
use crate::clients::image_api::build_cover_prompt;
use crate::clients::{BookService, ImageGenerator};
use crate::core::{BookDraft, BookRecord, Category, Session, User, WorkflowError};
use crate::presenter::{Presenter, Route};

pub const LOGIN_REQUIRED_MSG: &str = "로그인이 필요합니다.";
pub const EMPTY_CONTENT_MSG: &str = "소개를 입력해주세요.";
pub const INVALID_KEY_MSG: &str = "API Key가 유효하지 않습니다. 다시 입력해주세요.";
pub const GENERATION_FAILED_MSG: &str = "이미지 생성 실패";
pub const SUBMISSION_FAILED_MSG: &str = "도서 등록 실패";

/// 워크플로가 사용하는 외부 협력자
#[derive(Clone)]
pub struct WorkflowDeps {
    pub images: Arc<dyn ImageGenerator>,
    pub books: Arc<dyn BookService>,
    pub presenter: Arc<dyn Presenter>,
}

/// 표지 생성 요청 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    CoverReady(String),
    /// 키가 없어 입력 창을 띄움. `submit_credential` 로 재시도된다.
    CredentialRequired,
}

#[derive(Debug, Default)]
struct WorkflowInner {
    draft: BookDraft,
    credential: CredentialHolder,
    phase: Phase,
    // 현재 표지를 만들 때 쓴 (소개, 카테고리)
    cover_source: Option<(String, Category)>,
}

impl WorkflowInner {
    fn settle(&mut self) {
        self.phase = Phase::settled(
            self.draft.cover_image_url.is_some(),
            self.draft.has_content(),
        );
    }

    fn cover_is_stale(&self) -> bool {
        match &self.cover_source {
            Some((content, category)) => {
                *content != self.draft.content || *category != self.draft.category
            }
            None => false,
        }
    }
}

/// 도서 등록 워크플로
///
/// 상태는 비동기 뮤텍스 안에 있고 네트워크 호출 동안에는 잠그지 않는다.
/// 동시에 들어온 요청은 [`Phase`] 검사로 거절된다.
pub struct RegistrationWorkflow {
    owner: User,
    deps: WorkflowDeps,
    inner: Mutex<WorkflowInner>,
}

impl RegistrationWorkflow {
    /// 로그인한 사용자만 진입할 수 있다. 아니면 로그인 화면으로 보낸다.
    pub fn enter(session: &Session, deps: WorkflowDeps) -> Result<Self, WorkflowError> {
        let Some(user) = session.user() else {
            warn!("로그인하지 않은 사용자의 도서 등록 진입 시도");
            deps.presenter.alert(LOGIN_REQUIRED_MSG);
            deps.presenter.navigate(Route::Login);
            return Err(WorkflowError::Unauthorized);
        };

        info!("📝 도서 등록 시작 (user={})", user.id);
        Ok(Self {
            owner: user.clone(),
            deps,
            inner: Mutex::new(WorkflowInner::default()),
        })
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub async fn draft(&self) -> BookDraft {
        self.inner.lock().await.draft.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.inner.lock().await.phase
    }

    pub async fn is_generating(&self) -> bool {
        self.inner.lock().await.phase == Phase::Generating
    }

    pub async fn is_submitting(&self) -> bool {
        self.inner.lock().await.phase == Phase::Submitting
    }

    pub async fn has_credential(&self) -> bool {
        self.inner.lock().await.credential.is_present()
    }

    /// 표지 생성 후 소개나 카테고리가 바뀌었는지
    pub async fn is_cover_stale(&self) -> bool {
        self.inner.lock().await.cover_is_stale()
    }

    /// 생성 버튼 활성 여부
    pub async fn can_generate(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.draft.has_content() && inner.phase.check_generation().is_ok()
    }

    /// 등록 버튼 활성 여부
    pub async fn can_submit(&self) -> bool {
        self.inner.lock().await.phase.is_ready_to_submit()
    }

    pub async fn set_title(&self, title: &str) -> Result<(), WorkflowError> {
        self.edit(|draft| draft.set_title(title)).await
    }

    pub async fn set_content(&self, content: &str) -> Result<(), WorkflowError> {
        self.edit(|draft| draft.set_content(content)).await
    }

    pub async fn set_category(&self, category: Category) -> Result<(), WorkflowError> {
        self.edit(|draft| draft.category = category).await
    }

    async fn edit(&self, apply: impl FnOnce(&mut BookDraft)) -> Result<(), WorkflowError> {
        let mut inner = self.inner.lock().await;
        inner.phase.check_edit()?;
        apply(&mut inner.draft);
        inner.phase = inner.phase.after_edit(inner.draft.has_content());
        if inner.cover_is_stale() {
            debug!("표지 생성 이후 소개/카테고리가 변경됨 (표지는 유지)");
        }
        Ok(())
    }

    /// 표지 생성 요청. 키가 없으면 입력 창을 띄우고 바로 반환한다.
    pub async fn request_cover_generation(
        &self,
        credential: Option<&str>,
    ) -> Result<GenerationOutcome, WorkflowError> {
        let (prompt, key, source) = {
            let mut inner = self.inner.lock().await;
            inner.phase.check_generation().map_err(|e| {
                warn!("표지 생성 요청 거절: {}", e);
                e
            })?;

            if !inner.draft.has_content() {
                self.deps.presenter.alert(EMPTY_CONTENT_MSG);
                return Err(WorkflowError::Validation(EMPTY_CONTENT_MSG.to_string()));
            }

            let passed = credential.and_then(ImageCredential::new);
            let key = match passed.or_else(|| inner.credential.current().cloned()) {
                Some(key) => key,
                None => {
                    info!("🔑 API Key 가 없어 입력을 요청합니다");
                    inner.phase = Phase::AwaitingCredential;
                    return Ok(GenerationOutcome::CredentialRequired);
                }
            };

            inner.phase = Phase::Generating;
            let prompt = build_cover_prompt(inner.draft.category, &inner.draft.content);
            let source = (inner.draft.content.clone(), inner.draft.category);
            (prompt, key, source)
        };

        let result = self.deps.images.generate(&prompt, key.expose()).await;

        let mut inner = self.inner.lock().await;
        if inner.phase == Phase::Abandoned {
            debug!("취소된 작성의 표지 생성 결과는 버립니다");
            return Err(WorkflowError::Finished);
        }
        match result {
            Ok(url) => {
                inner.draft.cover_image_url = Some(url.clone());
                inner.cover_source = Some(source);
                inner.phase = Phase::CoverReady;
                Ok(GenerationOutcome::CoverReady(url))
            }
            Err(e) if e.is_unauthorized() => {
                warn!("❌ API Key 가 유효하지 않음, 보관 중인 키를 폐기합니다");
                inner.credential.invalidate();
                inner.phase = Phase::GenerationError;
                self.deps.presenter.alert(INVALID_KEY_MSG);
                Err(WorkflowError::InvalidCredential(e))
            }
            Err(e) => {
                error!("❌ 표지 생성 실패: {}", e);
                inner.phase = Phase::GenerationError;
                self.deps.presenter.alert(GENERATION_FAILED_MSG);
                Err(WorkflowError::GenerationFailed(e))
            }
        }
    }

    /// 입력 창에서 받은 키를 보관하고 곧바로 생성을 다시 시도한다
    pub async fn submit_credential(
        &self,
        credential: &str,
    ) -> Result<GenerationOutcome, WorkflowError> {
        {
            let mut inner = self.inner.lock().await;
            // 거절될 요청이면 키도 바꾸지 않는다
            inner.phase.check_generation()?;
            if !inner.credential.capture(credential) {
                debug!("빈 API Key 입력은 무시합니다");
            }
            if inner.phase == Phase::AwaitingCredential {
                inner.settle();
            }
        }
        self.request_cover_generation(None).await
    }

    /// 키 입력 창 닫기
    pub async fn cancel_credential_prompt(&self) {
        let mut inner = self.inner.lock().await;
        if inner.phase == Phase::AwaitingCredential {
            debug!("API Key 입력 취소");
            inner.settle();
        }
    }

    /// 작성을 그만두고 목록 화면으로 돌아간다. 보관 중인 키는 버린다.
    ///
    /// 등록 요청 중에는 `Busy`, 이미 끝난 작업이면 `Finished`.
    /// 생성 요청 중에 취소하면 그 결과는 반영되지 않는다.
    pub async fn cancel(&self) -> Result<(), WorkflowError> {
        {
            let mut inner = self.inner.lock().await;
            inner.phase.check_cancel().map_err(|e| {
                warn!("작성 취소 거절: {}", e);
                e
            })?;
            inner.credential.invalidate();
            inner.phase = Phase::Abandoned;
        }
        info!("🚪 도서 등록 취소 (user={})", self.owner.id);
        self.deps.presenter.navigate(Route::Home);
        Ok(())
    }

    /// 생성 요청 후 키가 필요하면 `prompt` 로 한 번 받아서 재시도한다
    pub async fn generate_cover(
        &self,
        prompt: &dyn CredentialPrompt,
    ) -> Result<GenerationOutcome, WorkflowError> {
        match self.request_cover_generation(None).await? {
            GenerationOutcome::CredentialRequired => {}
            ready => return Ok(ready),
        }

        let outcome = match prompt.request_credential().await {
            Some(key) => self.submit_credential(&key).await?,
            None => GenerationOutcome::CredentialRequired,
        };
        if outcome == GenerationOutcome::CredentialRequired {
            self.cancel_credential_prompt().await;
        }
        Ok(outcome)
    }

    /// 작성 중인 도서를 현재 사용자 소유로 등록한다. 성공하면 목록 화면으로 이동.
    ///
    /// 서버가 만들어진 레코드를 돌려주지 않아도 성공이며 이때는 `Ok(None)`.
    pub async fn submit_draft(&self) -> Result<Option<BookRecord>, WorkflowError> {
        let draft = {
            let mut inner = self.inner.lock().await;
            inner.phase.check_submission().map_err(|e| {
                warn!("도서 등록 요청 거절: {}", e);
                e
            })?;
            inner.phase = Phase::Submitting;
            inner.draft.clone()
        };

        info!("📤 도서 등록 요청: {}", draft.title);
        let result = self.deps.books.create(&self.owner.id, &draft).await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(record) => {
                inner.phase = Phase::Submitted;
                drop(inner);
                self.deps.presenter.navigate(Route::Home);
                Ok(record)
            }
            Err(e) => {
                error!("❌ 도서 등록 실패: {}", e);
                inner.phase = Phase::SubmissionError;
                let message = e.user_message(SUBMISSION_FAILED_MSG);
                self.deps
                    .presenter
                    .alert(&format!("{}: {}", SUBMISSION_FAILED_MSG, message));
                Err(WorkflowError::SubmissionFailed { message, source: e })
            }
        }
    }
}
