use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::presenter::{Presenter, Route};
use crate::workflow::CredentialPrompt;

/// 알림은 표준 출력으로, 화면 이동은 기록만 한다
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    history: Mutex<Vec<Route>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막으로 이동한 화면
    pub fn current_route(&self) -> Option<Route> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.last().cloned())
    }
}

impl Presenter for TerminalPresenter {
    fn alert(&self, message: &str) {
        println!("⚠️  {}", message);
    }

    fn navigate(&self, route: Route) {
        info!("➡️  이동: {}", route);
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

/// 표준 입력으로 API Key 를 받는다
#[derive(Debug, Default)]
pub struct StdinCredentialPrompt;

const CREDENTIAL_QUESTION: &str = "🔑 OpenAI API Key 를 입력하세요 (빈 입력은 취소): ";

#[async_trait]
impl CredentialPrompt for StdinCredentialPrompt {
    async fn request_credential(&self) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        let mut stdin = BufReader::new(tokio::io::stdin());
        ask_credential(&mut stdout, &mut stdin).await
    }
}

/// 질문을 쓰고 한 줄을 읽는다. 입출력 오류나 빈 입력은 취소로 본다.
async fn ask_credential<W, R>(out: &mut W, input: &mut R) -> Option<String>
where
    W: AsyncWrite + Unpin,
    R: AsyncBufRead + Unpin,
{
    if let Err(e) = out.write_all(CREDENTIAL_QUESTION.as_bytes()).await {
        warn!("API Key 질문 출력 실패: {}", e);
        return None;
    }
    if let Err(e) = out.flush().await {
        warn!("API Key 질문 출력 실패: {}", e);
        return None;
    }

    let mut line = String::new();
    match input.read_line(&mut line).await {
        Ok(0) => None,
        Ok(_) => {
            let key = line.trim();
            if key.is_empty() {
                None
            } else {
                Some(key.to_string())
            }
        }
        Err(e) => {
            warn!("API Key 입력 읽기 실패: {}", e);
            None
        }
    }
}
