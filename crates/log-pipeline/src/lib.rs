#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: ANSI 제거와 UE4 라인 파서 ([`Ue4LineParser`])
//! - [`fields`]: 출력에 덧붙일 정적 필드와 값 타입 추론
//! - [`output`]: 레코드 JSON 인코딩과 대체 객체
//! - [`pipeline`]: 입력 스트림 처리 루프 ([`LogPipeline`])
//! - [`config`]: 파이프라인 설정 (core 설정 변환)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! stdin -> LogPipeline -> Ue4LineParser -> RecordEncoder -> stdout
//!                              |                 |
//!                      ANSI/ts/frame/...   flat | record
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod output;
pub mod parser;
pub mod pipeline;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{LogPipeline, StreamSummary};

// 설정
pub use config::{PipelineConfig, PipelineConfigBuilder};

// 에러
pub use error::LogPipelineError;

// 파서
pub use parser::{LinePatterns, Ue4LineParser};

// 출력
pub use fields::{FieldValue, StaticFields};
pub use output::{OutputLayout, RecordEncoder, fallback_line};
