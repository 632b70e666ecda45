use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use urlencoding::encode;

use super::{BookService, ClientError, build_http_client, ensure_success};
use crate::app::AppConfig;
use crate::core::{BookDraft, BookRecord};

/// 도서 백엔드 REST 클라이언트
#[derive(Clone, Debug)]
pub struct BookApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookApiClient {
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(&config.book_api_base_url, config.request_timeout_secs)
    }

    fn books_url(&self) -> String {
        format!("{}/api/books", self.base_url)
    }

    fn owner_books_url(&self, owner_id: &str) -> String {
        format!("{}/api/books/{}", self.base_url, encode(owner_id))
    }
}

#[async_trait]
impl BookService for BookApiClient {
    async fn list(&self) -> Result<Vec<BookRecord>, ClientError> {
        let url = self.books_url();
        debug!("도서 목록 요청: GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!("도서 목록 요청 실패: {}", e);
            ClientError::from(e)
        })?;
        let body = ensure_success(response).await?.text().await?;
        let books: Vec<BookRecord> = serde_json::from_str(&body)?;

        info!("📚 서버에서 받은 책: {} 권", books.len());
        Ok(books)
    }

    async fn create(
        &self,
        owner_id: &str,
        draft: &BookDraft,
    ) -> Result<Option<BookRecord>, ClientError> {
        let url = self.owner_books_url(owner_id);
        debug!("도서 등록 요청: POST {}", url);
        debug!("payload: {}", serde_json::to_string(draft)?);

        let response = self.http.post(&url).json(draft).send().await.map_err(|e| {
            error!("도서 등록 요청 실패: {}", e);
            ClientError::from(e)
        })?;
        let body = ensure_success(response).await?.text().await?;
        Ok(created_record(&body))
    }
}

// 상태 코드가 성공 여부를 정한다. 본문은 있으면 읽어 둘 뿐이다.
fn created_record(body: &str) -> Option<BookRecord> {
    if body.trim().is_empty() {
        info!("✅ 도서 등록 완료 (응답 본문 없음)");
        return None;
    }
    match serde_json::from_str::<BookRecord>(body) {
        Ok(record) => {
            info!("✅ 도서 등록 완료: {} (id={})", record.title, record.id);
            Some(record)
        }
        Err(e) => {
            warn!("도서 등록은 성공했지만 응답을 읽지 못함: {}", e);
            None
        }
    }
}
