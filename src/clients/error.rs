use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// 외부 HTTP 서비스 호출 오류
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed with status code {status}")]
    Http { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("응답 파싱 실패: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("응답에 이미지가 없습니다")]
    EmptyResult,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// 서버가 응답 본문에 담아 준 `message` 필드
    pub fn server_message(&self) -> Option<String> {
        let ClientError::Http { body, .. } = self else {
            return None;
        };
        let value: Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// 사용자에게 보여줄 메시지: 서버 메시지 → 전송 오류 → 기본 문구
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(msg) = self.server_message() {
            return msg;
        }
        let text = self.to_string();
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }
}
