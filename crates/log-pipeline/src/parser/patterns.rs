//! UE4 라인 패턴 정의
//!
//! [`LinePatterns`]는 파서가 사용하는 정규식 묶음입니다. 한 번 컴파일한 뒤
//! 읽기 전용으로 공유하므로 여러 스레드에서 잠금 없이 사용할 수 있습니다.
//!
//! 타임스탬프/프레임/카테고리 패턴은 모두 `^`로 잔여 문자열 시작에 고정되어
//! 있어 라인 길이에 선형인 비용으로 매칭됩니다.

use regex::Regex;

use crate::error::LogPipelineError;

/// ANSI CSI 이스케이프 시퀀스: `ESC [ 파라미터* 중간* 종료`
pub const ANSI_ESCAPE_PATTERN: &str = r"\x1B\[[0-?]*[ -/]*[@-~]";

/// `[2018.09.21-21.44.44:949]` 형태의 타임스탬프 토큰
pub const TIMESTAMP_PATTERN: &str = r"^\[([0-9.\-:]+)\]";

/// 타임스탬프 토큰의 고정 폭 모양 `YYYY.MM.DD-hh.mm.ss[:mmm]`
pub const TIMESTAMP_SHAPE_PATTERN: &str =
    r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2}-[0-9]{2}\.[0-9]{2}\.[0-9]{2}(:[0-9]+)?$";

/// `[  0]` 형태의 프레임 번호 (숫자 앞 ASCII 공백 허용)
pub const FRAME_PATTERN: &str = r"^\[[\t\n\f\r ]*([0-9]+)\]";

/// `LogInit: ` 형태의 카테고리. `sh: `를 배제하기 위해 최소 3자
pub const CATEGORY_PATTERN: &str = r"^([a-zA-Z0-9_]{3,}): ";

/// 컴파일된 라인 패턴 묶음
#[derive(Debug, Clone)]
pub struct LinePatterns {
    pub(crate) ansi: Regex,
    pub(crate) timestamp: Regex,
    pub(crate) timestamp_shape: Regex,
    pub(crate) frame: Regex,
    pub(crate) category: Regex,
}

impl LinePatterns {
    /// 모든 패턴을 컴파일합니다.
    pub fn compile() -> Result<Self, LogPipelineError> {
        Ok(Self {
            ansi: compile("ansi", ANSI_ESCAPE_PATTERN)?,
            timestamp: compile("timestamp", TIMESTAMP_PATTERN)?,
            timestamp_shape: compile("timestamp_shape", TIMESTAMP_SHAPE_PATTERN)?,
            frame: compile("frame", FRAME_PATTERN)?,
            category: compile("category", CATEGORY_PATTERN)?,
        })
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, LogPipelineError> {
    Regex::new(pattern).map_err(|source| LogPipelineError::Pattern { name, source })
}
