//! 설정 관리 -- ue4beat.toml 파싱 및 런타임 설정
//!
//! [`Ue4beatConfig`]는 로깅과 출력 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`UE4BEAT_OUTPUT_LAYOUT=record` 형식)
//! 3. 설정 파일 (`ue4beat.toml`, 선택)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), ue4beat_core::error::Ue4beatError> {
//! use ue4beat_core::config::Ue4beatConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = Ue4beatConfig::load("ue4beat.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = Ue4beatConfig::parse("[output]\nlayout = \"record\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Ue4beatError};

/// 허용되는 로그 레벨
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 허용되는 로그 형식
pub const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// 허용되는 출력 레이아웃
pub const VALID_LAYOUTS: [&str; 2] = ["flat", "record"];

/// ue4beat 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ue4beatConfig {
    /// 일반 설정 (진단 로그)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 출력 설정
    #[serde(default)]
    pub output: OutputConfig,
}

impl Ue4beatConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Ue4beatError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 경로가 주어지면 파일에서, 아니면 기본값에서 설정을 만듭니다.
    ///
    /// 두 경우 모두 환경변수 오버라이드와 검증을 거칩니다.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Ue4beatError> {
        match path {
            Some(path) => Self::load(path).await,
            None => {
                debug!("no config file given, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, Ue4beatError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ue4beatError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                Ue4beatError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, Ue4beatError> {
        toml::from_str(toml_str).map_err(|e| {
            Ue4beatError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `UE4BEAT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "UE4BEAT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "UE4BEAT_GENERAL_LOG_FORMAT");
        override_string(&mut self.output.layout, "UE4BEAT_OUTPUT_LAYOUT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), Ue4beatError> {
        check_one_of(
            "general.log_level",
            &self.general.log_level,
            &VALID_LOG_LEVELS,
        )?;
        check_one_of(
            "general.log_format",
            &self.general.log_format,
            &VALID_LOG_FORMATS,
        )?;
        check_one_of("output.layout", &self.output.layout, &VALID_LAYOUTS)?;

        if let Some(name) = self.output.fields.keys().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "output.fields".to_owned(),
                reason: format!("field name must not be empty (got '{name}')"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 진단 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 진단 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 출력 레이아웃 (flat, record)
    pub layout: String,
    /// 모든 출력 라인에 추가할 정적 필드 (이름 -> 원시 값)
    pub fields: BTreeMap<String, String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            layout: "flat".to_owned(),
            fields: BTreeMap::new(),
        }
    }
}

fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), Ue4beatError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: format!("must be one of: {} (got '{value}')", allowed.join(", ")),
    }
    .into())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if val.trim().is_empty() {
            warn!(env_key, "empty value in env var, ignoring");
            return;
        }
        *target = val;
    }
}
