#![no_main]

use libfuzzer_sys::fuzz_target;
use ue4beat_core::pipeline::LineParser;
use ue4beat_log_pipeline::Ue4LineParser;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let parser = Ue4LineParser::new().expect("patterns must compile");

    let record = parser.parse(&line);

    // 메시지는 항상 앞뒤 공백이 제거된 상태
    assert_eq!(record.message.trim(), record.message);
    // 파싱은 순수 함수
    assert_eq!(parser.parse(&line), record);
});
