#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ue4beat_log_pipeline::{LogPipeline, OutputLayout, PipelineConfigBuilder};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 원시 로그 라인
    line: String,
    /// 정적 필드 (이름, 원시 값). 최대 4개만 사용
    fields: Vec<(String, String)>,
    /// true면 record 레이아웃
    record_layout: bool,
    line_no: u64,
}

fuzz_target!(|input: FuzzInput| {
    let mut builder = PipelineConfigBuilder::new().layout(if input.record_layout {
        OutputLayout::Record
    } else {
        OutputLayout::Flat
    });
    for (name, value) in input.fields.iter().take(4) {
        builder = builder.field(name, value);
    }
    let Ok(config) = builder.build() else {
        return;
    };
    let Ok(pipeline) = LogPipeline::from_config(config) else {
        return;
    };

    let (json, _failed) = pipeline.process_line(&input.line, input.line_no);

    // 성공이든 대체 객체든 한 줄짜리 유효한 JSON이어야 함
    assert!(!json.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).expect("output must be JSON");
    assert!(value.is_object());
});
