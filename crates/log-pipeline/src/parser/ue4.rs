//! UE4 데디케이티드 서버 로그 라인 파서
//!
//! 한 줄의 원시 텍스트에서 타임스탬프, 프레임 번호, 카테고리, 심각도,
//! 메시지를 추출합니다.
//!
//! # 라인 형식
//! ```text
//! [2018.09.21-21.44.44:212][  0]LogLinux: Warning: Selected Device Profile
//! └──────── timestamp ────┘└frame┘└category┘└level─┘└─────── message ──────┘
//! ```
//!
//! # 파싱 단계
//! 잔여 문자열(residual)에 아래 단계를 순서대로 한 번씩만 적용합니다.
//! 각 단계는 시작 부분의 토큰을 소비하거나, 매칭되지 않으면 아무것도 하지 않습니다.
//!
//! 1. ANSI 이스케이프 제거 (라인 전체)
//! 2. 타임스탬프 `[YYYY.MM.DD-hh.mm.ss:mmm]`
//! 3. 프레임 `[  0]`
//! 4. 카테고리 `LogInit: `
//! 5. 레벨 마커 `Display: ` / `Verbose: ` / `Warning: ` / `Error: `
//!
//! 남은 문자열의 앞뒤 공백을 제거한 것이 메시지입니다.
//!
//! # 사용 예시
//! ```ignore
//! use ue4beat_log_pipeline::parser::Ue4LineParser;
//! use ue4beat_core::pipeline::LineParser;
//!
//! let parser = Ue4LineParser::new()?;
//! let record = parser.parse("[2018.09.21-21.44.44:212][  0]LogLinux: Selected Device Profile");
//! assert_eq!(record.category, "LogLinux");
//! ```

use chrono::{DateTime, NaiveDateTime, SubsecRound, Timelike, Utc};
use tracing::trace;

use ue4beat_core::pipeline::LineParser;
use ue4beat_core::types::{Level, LogRecord};

use super::ansi::strip_ansi_codes;
use super::patterns::LinePatterns;
use crate::error::LogPipelineError;

/// 형식 이름
pub const FORMAT_NAME: &str = "ue4";

/// 콜론을 점으로 바꾼 타임스탬프 토큰의 chrono 형식 (소수부는 선택)
const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S%.f";

/// 레벨 마커 (우선순위 순서)
///
/// `Display`/`Verbose`는 제거만 하고 기본값 `Info`를 유지합니다.
const LEVEL_MARKERS: [(&str, Level); 4] = [
    ("Display: ", Level::Info),
    ("Verbose: ", Level::Info),
    ("Warning: ", Level::Warning),
    ("Error: ", Level::Error),
];

/// UE4 라인 파서
///
/// core의 [`LineParser`] trait을 구현합니다. 내부 상태는 컴파일된 패턴뿐이며
/// 불변이므로 `Arc`로 감싸 여러 태스크에서 동시에 호출할 수 있습니다.
#[derive(Debug, Clone)]
pub struct Ue4LineParser {
    patterns: LinePatterns,
}

impl Ue4LineParser {
    /// 패턴을 컴파일하여 새 파서를 생성합니다.
    pub fn new() -> Result<Self, LogPipelineError> {
        Ok(Self::with_patterns(LinePatterns::compile()?))
    }

    /// 이미 컴파일된 패턴으로 파서를 생성합니다.
    pub fn with_patterns(patterns: LinePatterns) -> Self {
        Self { patterns }
    }

    /// 원시 라인을 파싱합니다. 어떤 입력에도 실패하지 않습니다.
    pub fn parse_line(&self, line: &str) -> LogRecord {
        let mut record = LogRecord::default();

        let stripped = strip_ansi_codes(&self.patterns.ansi, line);
        let mut rest: &str = &stripped;

        rest = self.extract_timestamp(rest, &mut record);
        rest = self.extract_frame(rest, &mut record);
        rest = self.extract_category(rest, &mut record);
        rest = Self::extract_level(rest, &mut record);

        record.message = rest.trim().to_owned();

        trace!(
            has_timestamp = record.timestamp.is_some(),
            frame = record.frame,
            category = record.category.as_str(),
            level = record.level.as_str(),
            "parsed line"
        );

        record
    }

    /// 시작 부분의 타임스탬프를 파싱하고, 성공하면 토큰을 소비합니다.
    ///
    /// 토큰 모양이지만 날짜로 해석되지 않으면 소비하지 않습니다.
    /// 이 경우 다음 단계인 프레임 패턴이 같은 토큰을 다시 시도합니다.
    fn extract_timestamp<'a>(&self, rest: &'a str, record: &mut LogRecord) -> &'a str {
        let Some(caps) = self.patterns.timestamp.captures(rest) else {
            return rest;
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            return rest;
        };

        match self.parse_timestamp(token.as_str()) {
            Some(ts) => {
                record.timestamp = Some(ts);
                &rest[whole.end()..]
            }
            None => rest,
        }
    }

    /// `2018.09.21-21.44.44:212` 토큰을 UTC 시각으로 변환합니다.
    ///
    /// 밀리초 앞의 마지막 `:`를 `.`로 바꿔 소수 초로 읽고, 밀리초 단위로 자릅니다.
    /// 자릿수가 고정 폭이 아니거나 윤초(`60`)이면 `None`입니다.
    fn parse_timestamp(&self, token: &str) -> Option<DateTime<Utc>> {
        if !self.patterns.timestamp_shape.is_match(token) {
            return None;
        }
        let normalized = match token.rfind(':') {
            Some(idx) => format!("{}.{}", &token[..idx], &token[idx + 1..]),
            None => token.to_owned(),
        };

        NaiveDateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT)
            .ok()
            .filter(|naive| naive.nanosecond() < 1_000_000_000)
            .map(|naive| naive.and_utc().trunc_subsecs(3))
    }

    /// 시작 부분의 `[  0]` 프레임 번호를 추출합니다.
    ///
    /// 숫자가 `i64` 범위를 넘으면 매칭되지 않은 것으로 취급합니다.
    fn extract_frame<'a>(&self, rest: &'a str, record: &mut LogRecord) -> &'a str {
        let Some(caps) = self.patterns.frame.captures(rest) else {
            return rest;
        };
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            return rest;
        };

        match digits.as_str().parse::<i64>() {
            Ok(frame) => {
                record.frame = frame;
                &rest[whole.end()..]
            }
            Err(_) => rest,
        }
    }

    /// 시작 부분의 `Category: ` 토큰을 추출합니다.
    fn extract_category<'a>(&self, rest: &'a str, record: &mut LogRecord) -> &'a str {
        let Some(caps) = self.patterns.category.captures(rest) else {
            return rest;
        };
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            return rest;
        };

        record.category = name.as_str().to_owned();
        &rest[whole.end()..]
    }

    /// 레벨 마커를 최대 하나 제거합니다.
    fn extract_level<'a>(rest: &'a str, record: &mut LogRecord) -> &'a str {
        for (marker, level) in LEVEL_MARKERS {
            if let Some(stripped) = rest.strip_prefix(marker) {
                record.level = level;
                return stripped;
            }
        }
        rest
    }
}

impl LineParser for Ue4LineParser {
    fn format_name(&self) -> &str {
        FORMAT_NAME
    }

    fn parse(&self, line: &str) -> LogRecord {
        self.parse_line(line)
    }
}
