use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{ClientError, ImageGenerator, build_http_client, ensure_success};
use crate::app::AppConfig;
use crate::core::Category;

// 생성 정책 상수 (호출자가 바꿀 수 없음)
const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_COUNT: u8 = 1;
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// 카테고리와 소개로 표지 생성 프롬프트를 만든다
pub fn build_cover_prompt(category: Category, content: &str) -> String {
    format!(
        "Create a book cover image for a {} book. Description: {}",
        category, content
    )
}

/// 이미지 생성 API 클라이언트
#[derive(Clone, Debug)]
pub struct ImageApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ImageApiClient {
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client(timeout_secs)?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(&config.image_api_url, config.request_timeout_secs)
    }
}

#[async_trait]
impl ImageGenerator for ImageApiClient {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<String, ClientError> {
        let request = GenerationRequest {
            model: IMAGE_MODEL,
            prompt,
            n: IMAGE_COUNT,
            size: IMAGE_SIZE,
        };
        info!("🎨 표지 이미지 생성 요청 중... (model={}, size={})", IMAGE_MODEL, IMAGE_SIZE);
        debug!("prompt: {}", prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await?;
        let response = ensure_success(response).await.map_err(|e| {
            warn!("이미지 생성 API 오류: {}", e);
            e
        })?;

        let body = response.text().await?;
        let parsed: GenerationResponse = serde_json::from_str(&body)?;
        let url = parsed
            .data
            .into_iter()
            .next()
            .and_then(|img| img.url)
            .ok_or(ClientError::EmptyResult)?;

        info!("✅ 표지 이미지 생성 완료");
        debug!("이미지 URL: {}", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_category_and_content() {
        let prompt = build_cover_prompt(Category::ScienceFiction, "a robot detective");
        assert_eq!(
            prompt,
            "Create a book cover image for a SF book. Description: a robot detective"
        );
    }

    #[test]
    fn test_request_body_uses_fixed_policy() {
        let body = serde_json::to_value(GenerationRequest {
            model: IMAGE_MODEL,
            prompt: "p",
            n: IMAGE_COUNT,
            size: IMAGE_SIZE,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"model": "dall-e-3", "prompt": "p", "n": 1, "size": "1024x1024"})
        );
    }
}
