use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 제목 최대 글자 수
pub const TITLE_MAX_CHARS: usize = 50;
/// 소개 최대 글자 수
pub const CONTENT_MAX_CHARS: usize = 300;

/// 도서 카테고리 (전송 시 한글 라벨 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "로맨스")]
    Romance,
    #[serde(rename = "SF")]
    ScienceFiction,
    #[serde(rename = "공포")]
    Horror,
    #[serde(rename = "추리")]
    Mystery,
    #[serde(rename = "역사")]
    History,
    #[serde(rename = "시")]
    Poetry,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Romance,
        Category::ScienceFiction,
        Category::Horror,
        Category::Mystery,
        Category::History,
        Category::Poetry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Romance => "로맨스",
            Category::ScienceFiction => "SF",
            Category::Horror => "공포",
            Category::Mystery => "추리",
            Category::History => "역사",
            Category::Poetry => "시",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// 한글 라벨 또는 영문 별칭(대소문자 무시)을 받는다
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(c) = Category::ALL.iter().find(|c| c.label() == raw) {
            return Ok(*c);
        }
        match raw.to_ascii_lowercase().as_str() {
            "romance" => Ok(Category::Romance),
            "sf" | "scifi" | "sci-fi" => Ok(Category::ScienceFiction),
            "horror" => Ok(Category::Horror),
            "mystery" => Ok(Category::Mystery),
            "history" => Ok(Category::History),
            "poetry" | "poem" => Ok(Category::Poetry),
            _ => Err(format!("알 수 없는 카테고리: {}", raw)),
        }
    }
}

/// 작성 중인 도서 (등록 전)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(rename = "coverImageUrl")]
    pub cover_image_url: Option<String>,
}

impl BookDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 단계에서 최대 글자 수를 적용한다 (초과분은 잘라냄)
    pub fn set_title(&mut self, title: &str) {
        self.title = truncate_chars(title, TITLE_MAX_CHARS);
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = truncate_chars(content, CONTENT_MAX_CHARS);
    }

    pub fn title_count(&self) -> usize {
        self.title.chars().count()
    }

    pub fn content_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// 서버가 소유한 도서 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "coverImageUrl", default)]
    pub cover_image_url: Option<String>,
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<String>,
}

// 서버가 id 를 문자열 또는 정수로 내려줄 수 있음
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_id")] String);

    Option::<Wrapped>::deserialize(deserializer).map(|w| w.map(|Wrapped(id)| id))
}

/// 로그인한 사용자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
}

/// 인증 컨텍스트가 넘겨주는 세션
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
