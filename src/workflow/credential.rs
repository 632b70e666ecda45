use async_trait::async_trait;
use std::fmt;

/// 이미지 생성용 Bearer 토큰. 디버그 출력에서는 가려진다.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageCredential(String);

impl ImageCredential {
    /// 공백뿐인 입력은 키가 없는 것으로 본다
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ImageCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImageCredential(***)")
    }
}

/// 워크플로 수명 동안만 키를 보관한다 (capture → use → invalidate)
#[derive(Debug, Default)]
pub struct CredentialHolder {
    slot: Option<ImageCredential>,
}

impl CredentialHolder {
    pub fn capture(&mut self, raw: &str) -> bool {
        match ImageCredential::new(raw) {
            Some(credential) => {
                self.slot = Some(credential);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&ImageCredential> {
        self.slot.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn is_present(&self) -> bool {
        self.slot.is_some()
    }
}

/// 키가 없을 때 사용자에게 입력을 받는 창구
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    /// 사용자가 취소하면 `None`
    async fn request_credential(&self) -> Option<String>;
}
