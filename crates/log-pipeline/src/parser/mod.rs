//! 로그 파싱 모듈 -- UE4 데디케이티드 서버 로그 라인 파서
//!
//! [`Ue4LineParser`]는 core의 [`LineParser`](ue4beat_core::pipeline::LineParser)
//! trait을 구현하며, 원시 라인 하나를 [`LogRecord`](ue4beat_core::types::LogRecord)로
//! 변환합니다. 파싱은 실패하지 않습니다.
//!
//! # 구성
//! - [`patterns`]: 한 번 컴파일되어 공유되는 정규식 묶음
//! - [`ansi`]: ANSI 색상 이스케이프 제거
//! - [`ue4`]: 5단계 추출 파이프라인

pub mod ansi;
pub mod patterns;
pub mod ue4;

pub use ansi::strip_ansi_codes;
pub use patterns::LinePatterns;
pub use ue4::Ue4LineParser;
