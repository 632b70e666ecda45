use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_book_api_base_url")]
    pub book_api_base_url: String,
    #[serde(default = "default_image_api_url")]
    pub image_api_url: String,
    /// 없으면 타임아웃을 걸지 않는다
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl AppConfig {
    /// 설정 파일을 읽는다. 파일이 없으면 기본값.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("설정 파일 없음, 기본값 사용: {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("설정 파일 읽기 실패: {}", path.display()));
            }
        };
        Self::from_toml(&raw).with_context(|| format!("설정 파일 파싱 실패: {}", path.display()))
    }

    /// TOML 문자열에서 설정을 만들고 주소 형식을 확인한다
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        for (key, url) in [
            ("book_api_base_url", &config.book_api_base_url),
            ("image_api_url", &config.image_api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{} 는 http(s) 주소여야 합니다: {:?}", key, url);
            }
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            book_api_base_url: default_book_api_base_url(),
            image_api_url: default_image_api_url(),
            request_timeout_secs: None,
        }
    }
}

fn default_book_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_image_api_url() -> String {
    "https://api.openai.com/v1/images/generations".to_string()
}
