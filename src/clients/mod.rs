pub mod book_api;
pub mod error;
pub mod image_api;

use async_trait::async_trait;
use std::time::Duration;

use crate::core::{BookDraft, BookRecord};

pub use book_api::BookApiClient;
pub use error::ClientError;
pub use image_api::ImageApiClient;

/// 도서 백엔드 (목록 조회 / 등록)
#[async_trait]
pub trait BookService: Send + Sync {
    async fn list(&self) -> Result<Vec<BookRecord>, ClientError>;

    /// 2xx 면 등록 성공. 응답 본문이 레코드로 읽히지 않으면 `None`.
    async fn create(
        &self,
        owner_id: &str,
        draft: &BookDraft,
    ) -> Result<Option<BookRecord>, ClientError>;
}

/// 표지 이미지 생성 API
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// 생성된 이미지 URL 하나를 돌려준다
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, ClientError>;
}

pub(crate) fn build_http_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// 2xx 가 아니면 본문을 담아 `ClientError::Http` 로 바꾼다
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Http { status, body })
}
