//! 도메인 타입 -- 파싱된 UE4 서버 로그 레코드
//!
//! [`LogRecord`]는 한 줄의 원시 로그에서 추출한 구조화 레코드이며,
//! [`Level`]은 UE4 심각도 마커를 세 단계로 정규화한 값입니다.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// 프레임 인덱스가 없음을 나타내는 센티널 값
///
/// 정상 프레임 `0`과 구분하기 위해 `-1`을 사용합니다.
pub const NO_FRAME: i64 = -1;

/// 로그 레코드
///
/// 원시 로그 한 줄을 파싱한 결과입니다. 호출 단위로 새로 생성되며
/// 호출자가 소유합니다.
///
/// 직렬화 시 키 이름은 다운스트림(filebeat/logstash) 호환 규약을 따르며,
/// 필드 선언 순서가 곧 키의 사전순 정렬 순서입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// 타임스탬프 (UTC, 밀리초 정밀도). 인식 가능한 접두어가 없으면 `None`
    #[serde(
        rename = "@timestamp",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// 카테고리 태그 (`LogInit` 등). 인식되지 않으면 빈 문자열
    #[serde(rename = "fields.category", skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// 서버 시뮬레이션 프레임 번호. 없으면 [`NO_FRAME`]
    #[serde(rename = "fields.frame")]
    pub frame: i64,
    /// 심각도
    #[serde(rename = "fields.level")]
    pub level: Level,
    /// 정리된 메시지 본문 (앞뒤 공백 제거)
    pub message: String,
}

impl LogRecord {
    /// 메시지만 담은 Info 레코드를 생성합니다.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// 프레임 인덱스가 추출되었는지 여부
    pub fn has_frame(&self) -> bool {
        self.frame != NO_FRAME
    }

    /// 카테고리가 인식되었는지 여부
    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self {
            timestamp: None,
            category: String::new(),
            frame: NO_FRAME,
            level: Level::Info,
            message: String::new(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ts) = &self.timestamp {
            write!(f, "{} ", format_timestamp(ts))?;
        }
        if self.has_frame() {
            write!(f, "[{}] ", self.frame)?;
        }
        if self.has_category() {
            write!(f, "{}: ", self.category)?;
        }
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// 심각도 레벨
///
/// UE4의 `Display`/`Verbose`는 모두 `Info`로 매핑됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 정보성 (기본값, `Display`/`Verbose` 포함)
    #[default]
    Info,
    /// 경고 (`Warning:` 마커)
    Warning,
    /// 에러 (`Error:` 마커)
    Error,
}

impl Level {
    /// 출력 규약에 쓰이는 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 타임스탬프를 RFC 3339 (밀리초, `Z` 접미어) 문자열로 변환합니다.
///
/// 예: `2018-09-21T21:44:44.212Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `@timestamp`를 밀리초 RFC 3339 문자열로 직렬화합니다.
fn serialize_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}
