//! 파이프라인 trait -- 라인 파서 확장 포인트 정의

use crate::types::LogRecord;

/// 라인 파서 trait
///
/// 원시 로그 한 줄을 [`LogRecord`]로 변환합니다. 구현은 전함수(total)여야 합니다.
/// 어떤 입력에 대해서도 실패하거나 패닉하지 않고, 인식하지 못한 부분은
/// 메시지에 그대로 남깁니다.
///
/// 새로운 서버 로그 형식을 지원하려면 이 trait을 구현합니다.
pub trait LineParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 라인을 로그 레코드로 파싱
    fn parse(&self, line: &str) -> LogRecord;
}
