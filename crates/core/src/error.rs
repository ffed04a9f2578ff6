//! 에러 타입 -- 도메인별 에러 정의

/// ue4beat 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum Ue4beatError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파서 구성 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 출력 인코딩 에러
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파서 구성 에러
///
/// 라인 파싱 자체는 실패하지 않습니다. 이 에러는 패턴 컴파일처럼
/// 파서를 만드는 단계에서만 발생합니다.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 패턴 컴파일 실패
    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },
}

/// 출력 인코딩 에러
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// 레코드 직렬화 실패
    #[error("failed to encode line {line}: {reason}")]
    Encode { line: u64, reason: String },
}
