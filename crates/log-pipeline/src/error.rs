//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 로그 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for Ue4beatError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 라인 파싱은 실패하지 않으므로 여기에는 파싱 에러가 없습니다.
//! 파서 구성, 출력 인코딩, 스트림 I/O, 설정 변환 에러만 다룹니다.

use ue4beat_core::error::{ConfigError, OutputError, ParseError, Ue4beatError};

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 정규식 패턴 컴파일 실패
    #[error("pattern error: {name}: {source}")]
    Pattern {
        /// 패턴 이름 (ansi, timestamp, timestamp_shape, frame, category)
        name: &'static str,
        /// 원인
        #[source]
        source: regex::Error,
    },

    /// 레코드 JSON 인코딩 실패
    #[error("encode error: line {line}: {reason}")]
    Encode {
        /// 1부터 시작하는 입력 라인 번호
        line: u64,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// I/O 에러 (입력 읽기, 출력 쓰기)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LogPipelineError> for Ue4beatError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Pattern { name, source } => {
                Ue4beatError::Parse(ParseError::InvalidPattern {
                    name: name.to_owned(),
                    reason: source.to_string(),
                })
            }
            LogPipelineError::Encode { line, reason } => {
                Ue4beatError::Output(OutputError::Encode { line, reason })
            }
            LogPipelineError::Config { field, reason } => {
                Ue4beatError::Config(ConfigError::InvalidValue { field, reason })
            }
            LogPipelineError::Io(e) => Ue4beatError::Io(e),
        }
    }
}
