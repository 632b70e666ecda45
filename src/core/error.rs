use thiserror::Error;

use crate::clients::ClientError;

/// 등록 워크플로의 오류 분류
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 필수 입력 누락, 네트워크 호출 전에 차단됨
    #[error("입력 오류: {0}")]
    Validation(String),

    #[error("로그인이 필요합니다")]
    Unauthorized,

    /// 이미지 API 가 401 을 돌려줌, 보관 중인 키는 폐기됨
    #[error("유효하지 않은 API Key")]
    InvalidCredential(#[source] ClientError),

    #[error("이미지 생성 실패: {0}")]
    GenerationFailed(#[source] ClientError),

    #[error("도서 등록 실패: {message}")]
    SubmissionFailed {
        message: String,
        #[source]
        source: ClientError,
    },

    /// 진행 중인 요청이 있어 다른 동작을 받을 수 없음
    #[error("이미 처리 중인 요청이 있습니다 ({0})")]
    Busy(&'static str),

    #[error("이미 등록이 완료된 작업입니다")]
    Finished,
}
