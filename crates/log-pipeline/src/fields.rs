//! 정적 필드 -- 모든 출력 라인에 덧붙일 이름/값 쌍
//!
//! CLI의 `-f <name> <value>`나 설정 파일의 `[output.fields]`로 주어집니다.
//!
//! # 규칙
//! - 이름에 `fields.` 접두어가 없으면 붙입니다.
//! - 값이 부동소수점 리터럴로 파싱되면 숫자, 아니면 문자열로 저장합니다.
//! - 같은 이름이 다시 주어지면 나중 값이 이깁니다.

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};

/// 출력 필드 이름 접두어
pub const FIELD_PREFIX: &str = "fields.";

/// 정수로 정확히 표현 가능한 f64의 상한 (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 정적 필드 값
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 숫자로 파싱된 값
    Number(f64),
    /// 그 외 문자열
    Text(String),
}

impl FieldValue {
    /// 원시 문자열을 숫자 또는 문자열 값으로 변환합니다.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }
}

impl Serialize for FieldValue {
    /// 정수 값은 소수부 없이(`7777`), 나머지 유한 값은 부동소수점으로 씁니다.
    /// `NaN`과 무한대는 JSON으로 표현할 수 없으므로 에러를 반환합니다.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(n) if !n.is_finite() => {
                Err(S::Error::custom(format!("unsupported value: {n}")))
            }
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

/// 필드 이름에 `fields.` 접두어를 보장합니다.
pub fn normalize_name(name: &str) -> String {
    if name.starts_with(FIELD_PREFIX) {
        name.to_owned()
    } else {
        format!("{FIELD_PREFIX}{name}")
    }
}

/// 정적 필드 집합 (이름 순 정렬)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticFields {
    fields: BTreeMap<String, FieldValue>,
}

impl StaticFields {
    /// 빈 필드 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 이름/원시 값 쌍 목록에서 필드 집합을 만듭니다.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            fields.insert(name.as_ref(), value.as_ref());
        }
        fields
    }

    /// 필드를 추가합니다. 이름은 정규화되고 값은 타입이 추론됩니다.
    pub fn insert(&mut self, name: &str, raw_value: &str) {
        self.fields
            .insert(normalize_name(name), FieldValue::parse(raw_value));
    }

    /// 다른 필드 집합을 병합합니다. 같은 이름은 `other`가 우선합니다.
    pub fn extend(&mut self, other: StaticFields) {
        self.fields.extend(other.fields);
    }

    /// 정규화된 이름으로 값을 조회합니다.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// 이름 순으로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 필드 개수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 비어있는지 여부
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
