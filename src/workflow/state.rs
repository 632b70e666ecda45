use crate::core::WorkflowError;

/// 등록 워크플로 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ReadyToGenerate,
    Generating,
    AwaitingCredential,
    CoverReady,
    GenerationError,
    Submitting,
    Submitted,
    SubmissionError,
    /// 사용자가 작성을 취소함
    Abandoned,
}

impl Phase {
    /// 네트워크 요청이 진행 중인 단계
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Generating | Phase::Submitting)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Submitted | Phase::Abandoned)
    }

    pub fn is_ready_to_submit(self) -> bool {
        matches!(
            self,
            Phase::Idle
                | Phase::ReadyToGenerate
                | Phase::CoverReady
                | Phase::GenerationError
                | Phase::SubmissionError
        )
    }

    pub fn check_generation(self) -> Result<(), WorkflowError> {
        match self {
            Phase::Submitted | Phase::Abandoned => Err(WorkflowError::Finished),
            Phase::Generating => Err(WorkflowError::Busy("표지 생성 중")),
            Phase::Submitting => Err(WorkflowError::Busy("등록 중")),
            _ => Ok(()),
        }
    }

    pub fn check_submission(self) -> Result<(), WorkflowError> {
        match self {
            Phase::Submitted | Phase::Abandoned => Err(WorkflowError::Finished),
            Phase::Generating => Err(WorkflowError::Busy("표지 생성 중")),
            Phase::Submitting => Err(WorkflowError::Busy("등록 중")),
            Phase::AwaitingCredential => Err(WorkflowError::Busy("API Key 입력 대기")),
            _ => Ok(()),
        }
    }

    /// 작성 취소는 등록 요청 중에만 막는다
    pub fn check_cancel(self) -> Result<(), WorkflowError> {
        match self {
            Phase::Submitted | Phase::Abandoned => Err(WorkflowError::Finished),
            Phase::Submitting => Err(WorkflowError::Busy("등록 중")),
            _ => Ok(()),
        }
    }

    pub fn check_edit(self) -> Result<(), WorkflowError> {
        if self.is_terminal() {
            Err(WorkflowError::Finished)
        } else {
            Ok(())
        }
    }

    /// 입력이 바뀐 뒤의 단계. 표지나 오류 상태는 유지한다.
    pub fn after_edit(self, has_content: bool) -> Phase {
        match self {
            Phase::Idle | Phase::ReadyToGenerate if has_content => Phase::ReadyToGenerate,
            Phase::Idle | Phase::ReadyToGenerate => Phase::Idle,
            other => other,
        }
    }

    /// 진행 중인 요청이 없을 때 돌아갈 단계
    pub fn settled(has_cover: bool, has_content: bool) -> Phase {
        if has_cover {
            Phase::CoverReady
        } else if has_content {
            Phase::ReadyToGenerate
        } else {
            Phase::Idle
        }
    }
}
