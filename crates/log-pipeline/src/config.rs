//! 로그 파이프라인 설정
//!
//! [`PipelineConfig`]는 core의 [`OutputConfig`](ue4beat_core::config::OutputConfig)를
//! 검증된 타입([`OutputLayout`], [`StaticFields`])으로 변환한 것입니다.
//!
//! # 사용 예시
//! ```ignore
//! use ue4beat_core::config::Ue4beatConfig;
//! use ue4beat_log_pipeline::config::PipelineConfig;
//!
//! let core_config = Ue4beatConfig::default();
//! let config = PipelineConfig::from_core(&core_config.output)?;
//! ```

use ue4beat_core::config::OutputConfig;

use crate::error::LogPipelineError;
use crate::fields::StaticFields;
use crate::output::OutputLayout;

/// 로그 파이프라인 설정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// 출력 레이아웃
    pub layout: OutputLayout,
    /// 모든 라인에 덧붙일 정적 필드
    pub fields: StaticFields,
}

impl PipelineConfig {
    /// core의 `OutputConfig`에서 파이프라인 설정을 생성합니다.
    pub fn from_core(core: &OutputConfig) -> Result<Self, LogPipelineError> {
        let config = Self {
            layout: core.layout.parse()?,
            fields: StaticFields::from_pairs(&core.fields),
        };
        config.validate()?;
        Ok(config)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPipelineError> {
        for (name, _) in self.fields.iter() {
            if name.len() <= crate::fields::FIELD_PREFIX.len() {
                return Err(LogPipelineError::Config {
                    field: "output.fields".to_owned(),
                    reason: "field name must not be empty".to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// 파이프라인 설정 빌더
///
/// CLI 인자처럼 설정 파일 위에 덮어쓰는 값을 적용할 때 사용합니다.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 설정에서 시작합니다.
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// 출력 레이아웃을 설정합니다.
    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// 정적 필드를 하나 추가합니다. 같은 이름이 있으면 덮어씁니다.
    pub fn field(mut self, name: &str, raw_value: &str) -> Self {
        self.config.fields.insert(name, raw_value);
        self
    }

    /// 정적 필드 집합을 병합합니다. 같은 이름은 새 값이 우선합니다.
    pub fn fields(mut self, fields: StaticFields) -> Self {
        self.config.fields.extend(fields);
        self
    }

    /// 설정을 빌드합니다. 유효성 검증을 수행합니다.
    pub fn build(self) -> Result<PipelineConfig, LogPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;
    use std::collections::BTreeMap;

    fn output(layout: &str, fields: &[(&str, &str)]) -> OutputConfig {
        OutputConfig {
            layout: layout.to_owned(),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn default_config_is_flat_without_fields() {
        let config = PipelineConfig::default();
        assert_eq!(config.layout, OutputLayout::Flat);
        assert!(config.fields.is_empty());
    }

    #[test]
    fn from_core_converts_layout_and_fields() {
        let config =
            PipelineConfig::from_core(&output("record", &[("server", "a"), ("port", "7777")]))
                .unwrap();
        assert_eq!(config.layout, OutputLayout::Record);
        assert_eq!(config.fields.len(), 2);
        assert_eq!(
            config.fields.get("fields.port"),
            Some(&FieldValue::Number(7777.0))
        );
    }

    #[test]
    fn from_core_rejects_unknown_layout() {
        let err = PipelineConfig::from_core(&output("xml", &[])).unwrap_err();
        assert!(err.to_string().contains("output.layout"));
    }

    #[test]
    fn from_core_rejects_prefix_only_name() {
        let result = PipelineConfig::from_core(&output("flat", &[("fields.", "x")]));
        assert!(result.is_err());
    }

    #[test]
    fn builder_overrides_config_values() {
        let base = PipelineConfig::from_core(&output("flat", &[("env", "dev")])).unwrap();
        let config = PipelineConfigBuilder::from_config(base)
            .layout(OutputLayout::Record)
            .field("env", "prod")
            .field("shard", "3")
            .build()
            .unwrap();
        assert_eq!(config.layout, OutputLayout::Record);
        assert_eq!(
            config.fields.get("fields.env"),
            Some(&FieldValue::Text("prod".to_owned()))
        );
        assert_eq!(config.fields.get("fields.shard"), Some(&FieldValue::Number(3.0)));
    }

    #[test]
    fn builder_rejects_empty_name() {
        assert!(PipelineConfigBuilder::new().field("", "x").build().is_err());
    }
}
