//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `ue4beat_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(ue4beat_core::metrics::LINES_READ_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 심각도 레이블 키 (info, warning, error)
pub const LABEL_LEVEL: &str = "level";

/// 출력 레이아웃 레이블 키 (flat, record)
pub const LABEL_LAYOUT: &str = "layout";

// ─── 스트림 메트릭 ─────────────────────────────────────────────────

/// 입력에서 읽은 전체 라인 수 (counter)
pub const LINES_READ_TOTAL: &str = "ue4beat_lines_read_total";

/// 레벨별 파싱된 레코드 수 (counter, label: level)
pub const RECORDS_PARSED_TOTAL: &str = "ue4beat_records_parsed_total";

/// 인코딩 실패로 대체 레코드를 출력한 수 (counter, label: layout)
pub const ENCODE_FAILURES_TOTAL: &str = "ue4beat_encode_failures_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더가 설치되지 않았다면 아무 동작도 하지 않습니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(LINES_READ_TOTAL, "Total number of raw lines read from input");
    describe_counter!(
        RECORDS_PARSED_TOTAL,
        "Total number of parsed records, labelled by level"
    );
    describe_counter!(
        ENCODE_FAILURES_TOTAL,
        "Total number of lines replaced by the fallback error object"
    );
}
