//! 레코드 JSON 인코딩
//!
//! [`RecordEncoder`]는 [`LogRecord`]를 한 줄짜리 JSON 객체로 변환합니다.
//!
//! # 레이아웃
//! - [`OutputLayout::Flat`] (기본값): 정적 필드를 먼저 넣고 레코드 필드로 덮어씁니다.
//!   프레임이 없으면 `fields.frame`을 생략하고 `fields.log_line`(1부터 시작)을 추가합니다.
//! - [`OutputLayout::Record`]: 레코드만 그대로 직렬화합니다. 프레임 `-1`도 포함됩니다.
//!
//! 키는 항상 사전순으로 정렬됩니다.
//!
//! 인코딩이 실패한 라인은 [`fallback_line`]으로 만든 에러 객체로 대체됩니다.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use ue4beat_core::types::{LogRecord, format_timestamp};

use crate::error::LogPipelineError;
use crate::fields::{FieldValue, StaticFields};

/// 타임스탬프 키
pub const KEY_TIMESTAMP: &str = "@timestamp";
/// 카테고리 키
pub const KEY_CATEGORY: &str = "fields.category";
/// 프레임 키
pub const KEY_FRAME: &str = "fields.frame";
/// 레벨 키
pub const KEY_LEVEL: &str = "fields.level";
/// 입력 라인 번호 키
pub const KEY_LOG_LINE: &str = "fields.log_line";
/// 메시지 키
pub const KEY_MESSAGE: &str = "message";

/// 대체 객체의 에러 사유 키
const KEY_ERROR: &str = "fields.error";
/// 대체 객체의 라인 번호 키
const KEY_LINE: &str = "fields.line";
/// 대체 객체의 고정 메시지
const FALLBACK_MESSAGE: &str = "error marshalling to json";

/// 출력 레이아웃
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// 정적 필드와 라인 번호를 포함한 평탄한 객체
    #[default]
    Flat,
    /// 레코드 그대로
    Record,
}

impl OutputLayout {
    /// 설정/CLI에서 쓰는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputLayout {
    type Err = LogPipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "record" => Ok(Self::Record),
            other => Err(LogPipelineError::Config {
                field: "output.layout".to_owned(),
                reason: format!("unknown layout '{other}', expected flat or record"),
            }),
        }
    }
}

/// flat 레이아웃의 값
#[derive(Serialize)]
#[serde(untagged)]
enum FlatValue<'a> {
    Field(&'a FieldValue),
    Text(Cow<'a, str>),
    Integer(i64),
    LineNumber(u64),
}

/// 레코드 인코더
#[derive(Debug, Clone, Default)]
pub struct RecordEncoder {
    layout: OutputLayout,
    fields: StaticFields,
}

impl RecordEncoder {
    /// 레이아웃과 정적 필드로 인코더를 생성합니다.
    pub fn new(layout: OutputLayout, fields: StaticFields) -> Self {
        Self { layout, fields }
    }

    /// 현재 레이아웃
    pub fn layout(&self) -> OutputLayout {
        self.layout
    }

    /// 레코드를 JSON 한 줄로 인코딩합니다. 개행 문자는 붙이지 않습니다.
    ///
    /// `line`은 1부터 시작하는 입력 라인 번호입니다.
    pub fn encode(&self, record: &LogRecord, line: u64) -> Result<String, LogPipelineError> {
        let result = match self.layout {
            OutputLayout::Flat => serde_json::to_string(&self.flat_object(record, line)),
            OutputLayout::Record => serde_json::to_string(record),
        };
        result.map_err(|e| LogPipelineError::Encode {
            line,
            reason: e.to_string(),
        })
    }

    fn flat_object<'a>(
        &'a self,
        record: &'a LogRecord,
        line: u64,
    ) -> BTreeMap<&'a str, FlatValue<'a>> {
        let mut object: BTreeMap<&str, FlatValue<'_>> = self
            .fields
            .iter()
            .map(|(name, value)| (name, FlatValue::Field(value)))
            .collect();

        if let Some(ts) = &record.timestamp {
            object.insert(KEY_TIMESTAMP, FlatValue::Text(Cow::Owned(format_timestamp(ts))));
        }
        if record.has_category() {
            object.insert(KEY_CATEGORY, FlatValue::Text(Cow::Borrowed(&record.category)));
        }
        if record.has_frame() {
            object.insert(KEY_FRAME, FlatValue::Integer(record.frame));
        }
        object.insert(KEY_LEVEL, FlatValue::Text(Cow::Borrowed(record.level.as_str())));
        object.insert(KEY_MESSAGE, FlatValue::Text(Cow::Borrowed(&record.message)));
        object.insert(KEY_LOG_LINE, FlatValue::LineNumber(line));

        object
    }
}

/// 인코딩에 실패한 라인 대신 출력할 에러 객체를 만듭니다.
///
/// ```text
/// {"fields.error":"<reason>","fields.line":<line>,"level":"error","message":"error marshalling to json"}
/// ```
pub fn fallback_line(line: u64, reason: &str) -> String {
    let mut object = serde_json::Map::new();
    object.insert(KEY_ERROR.to_owned(), reason.into());
    object.insert(KEY_LINE.to_owned(), line.into());
    object.insert("level".to_owned(), "error".into());
    object.insert(KEY_MESSAGE.to_owned(), FALLBACK_MESSAGE.into());
    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ue4beat_core::types::Level;

    fn sample_record() -> LogRecord {
        LogRecord {
            timestamp: Utc
                .with_ymd_and_hms(2018, 9, 21, 21, 44, 44)
                .single()
                .map(|t| t + chrono::Duration::milliseconds(212)),
            category: "LogLinux".to_owned(),
            frame: 0,
            level: Level::Warning,
            message: "Selected Device Profile".to_owned(),
        }
    }

    #[test]
    fn layout_from_str() {
        assert_eq!("flat".parse::<OutputLayout>().unwrap(), OutputLayout::Flat);
        assert_eq!("RECORD".parse::<OutputLayout>().unwrap(), OutputLayout::Record);
        assert!("yaml".parse::<OutputLayout>().is_err());
    }

    #[test]
    fn layout_display_roundtrip() {
        for layout in [OutputLayout::Flat, OutputLayout::Record] {
            assert_eq!(layout.to_string().parse::<OutputLayout>().unwrap(), layout);
        }
    }

    #[test]
    fn flat_full_record() {
        let encoder = RecordEncoder::default();
        let json = encoder.encode(&sample_record(), 7).unwrap();
        assert_eq!(
            json,
            r#"{"@timestamp":"2018-09-21T21:44:44.212Z","fields.category":"LogLinux","fields.frame":0,"fields.level":"warning","fields.log_line":7,"message":"Selected Device Profile"}"#
        );
    }

    #[test]
    fn flat_omits_missing_parts() {
        let encoder = RecordEncoder::default();
        let json = encoder.encode(&LogRecord::with_message("hello"), 1).unwrap();
        assert_eq!(
            json,
            r#"{"fields.level":"info","fields.log_line":1,"message":"hello"}"#
        );
    }

    #[test]
    fn flat_includes_static_fields() {
        let fields = StaticFields::from_pairs([("server", "lobby-01"), ("port", "7777")]);
        let encoder = RecordEncoder::new(OutputLayout::Flat, fields);
        let json = encoder.encode(&LogRecord::with_message("x"), 3).unwrap();
        assert_eq!(
            json,
            r#"{"fields.level":"info","fields.log_line":3,"fields.port":7777,"fields.server":"lobby-01","message":"x"}"#
        );
    }

    #[test]
    fn record_keys_override_static_fields() {
        let fields = StaticFields::from_pairs([("level", "custom"), ("message", "ignored")]);
        let encoder = RecordEncoder::new(OutputLayout::Flat, fields);
        let json = encoder.encode(&LogRecord::with_message("real"), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fields.level"], "info");
        // "message" 정적 필드는 "fields.message"가 되므로 충돌하지 않는다
        assert_eq!(value["fields.message"], "ignored");
        assert_eq!(value["message"], "real");
    }

    #[test]
    fn static_log_line_is_overridden() {
        let fields = StaticFields::from_pairs([("log_line", "999")]);
        let encoder = RecordEncoder::new(OutputLayout::Flat, fields);
        let json = encoder.encode(&LogRecord::with_message("x"), 5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fields.log_line"], 5);
    }

    #[test]
    fn record_layout_keeps_no_frame_and_skips_extras() {
        let fields = StaticFields::from_pairs([("server", "lobby-01")]);
        let encoder = RecordEncoder::new(OutputLayout::Record, fields);
        let json = encoder.encode(&LogRecord::with_message("x"), 9).unwrap();
        assert_eq!(
            json,
            r#"{"fields.frame":-1,"fields.level":"info","message":"x"}"#
        );
    }

    #[test]
    fn non_finite_field_fails_encoding() {
        let fields = StaticFields::from_pairs([("ratio", "NaN")]);
        let encoder = RecordEncoder::new(OutputLayout::Flat, fields);
        let err = encoder.encode(&LogRecord::with_message("x"), 4).unwrap_err();
        match err {
            LogPipelineError::Encode { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("unsupported value"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fallback_shape() {
        let json = fallback_line(12, "unsupported value: NaN");
        assert_eq!(
            json,
            r#"{"fields.error":"unsupported value: NaN","fields.line":12,"level":"error","message":"error marshalling to json"}"#
        );
    }

    #[test]
    fn output_is_single_line() {
        let mut record = sample_record();
        record.message = "a\nb".to_owned();
        let json = RecordEncoder::default().encode(&record, 1).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""a\nb""#));
    }
}
