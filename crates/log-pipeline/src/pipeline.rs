//! 파이프라인 오케스트레이션 -- 입력 스트림을 읽어 라인마다 파싱/인코딩/출력합니다.
//!
//! # 내부 흐름
//! ```text
//! reader -> split '\n' -> LineParser -> RecordEncoder -> writer
//!                                          |
//!                                   (실패 시) fallback_line
//! ```
//!
//! 한 라인의 인코딩 실패는 대체 객체로 출력되고 스트림은 계속됩니다.
//! 입력 끝(EOF)에 도달하면 정상 종료하며, 읽기/쓰기 I/O 에러만 스트림을 중단합니다.

use metrics::counter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use ue4beat_core::metrics::{
    ENCODE_FAILURES_TOTAL, LABEL_LAYOUT, LABEL_LEVEL, LINES_READ_TOTAL, RECORDS_PARSED_TOTAL,
};
use ue4beat_core::pipeline::LineParser;

use crate::config::PipelineConfig;
use crate::error::LogPipelineError;
use crate::output::{RecordEncoder, fallback_line};
use crate::parser::Ue4LineParser;

/// 스트림 처리 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// 읽은 라인 수
    pub lines: u64,
    /// 대체 객체로 출력된 라인 수
    pub encode_failures: u64,
}

/// 로그 파이프라인
///
/// 파서는 core의 [`LineParser`] trait으로 추상화되어 있어 테스트에서
/// 다른 구현으로 교체할 수 있습니다.
///
/// # 사용 예시
/// ```ignore
/// use ue4beat_log_pipeline::{LogPipeline, PipelineConfig};
///
/// let pipeline = LogPipeline::from_config(PipelineConfig::default())?;
/// let stdin = tokio::io::BufReader::new(tokio::io::stdin());
/// let summary = pipeline.run(stdin, tokio::io::stdout()).await?;
/// ```
#[derive(Debug)]
pub struct LogPipeline<P = Ue4LineParser> {
    parser: P,
    encoder: RecordEncoder,
}

impl LogPipeline<Ue4LineParser> {
    /// 설정에서 UE4 파서를 사용하는 파이프라인을 생성합니다.
    pub fn from_config(config: PipelineConfig) -> Result<Self, LogPipelineError> {
        config.validate()?;
        let parser = Ue4LineParser::new()?;
        Ok(Self::new(
            parser,
            RecordEncoder::new(config.layout, config.fields),
        ))
    }
}

impl<P: LineParser> LogPipeline<P> {
    /// 파서와 인코더로 파이프라인을 생성합니다.
    pub fn new(parser: P, encoder: RecordEncoder) -> Self {
        Self { parser, encoder }
    }

    /// 파서
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// 한 라인을 처리하여 출력할 JSON 문자열을 반환합니다.
    ///
    /// 두 번째 값은 인코딩 실패로 대체 객체를 만들었는지 여부입니다.
    pub fn process_line(&self, line: &str, line_no: u64) -> (String, bool) {
        let record = self.parser.parse(line);
        counter!(RECORDS_PARSED_TOTAL, LABEL_LEVEL => record.level.as_str()).increment(1);

        match self.encoder.encode(&record, line_no) {
            Ok(json) => (json, false),
            Err(e) => {
                warn!(line = line_no, error = %e, "failed to encode record, emitting fallback");
                counter!(ENCODE_FAILURES_TOTAL, LABEL_LAYOUT => self.encoder.layout().as_str())
                    .increment(1);
                let reason = match e {
                    LogPipelineError::Encode { reason, .. } => reason,
                    other => other.to_string(),
                };
                (fallback_line(line_no, &reason), true)
            }
        }
    }

    /// 입력 스트림을 끝까지 처리합니다.
    ///
    /// 라인은 `\n`으로 나누고, 끝의 `\r`은 제거합니다. 유효하지 않은 UTF-8은
    /// 대체 문자(U+FFFD)로 바뀝니다. 마지막 라인에 개행이 없어도 처리됩니다.
    /// 각 출력 라인 뒤에서 writer를 flush하여 파이프 하류가 즉시 받도록 합니다.
    pub async fn run<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<StreamSummary, LogPipelineError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = StreamSummary::default();
        let mut buf = Vec::with_capacity(1024);

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).await?;
            if read == 0 {
                break;
            }

            let raw = trim_line_ending(&buf);
            let line = String::from_utf8_lossy(raw);
            summary.lines += 1;
            counter!(LINES_READ_TOTAL).increment(1);

            let (json, failed) = self.process_line(&line, summary.lines);
            if failed {
                summary.encode_failures += 1;
            }

            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        writer.flush().await?;
        debug!(
            lines = summary.lines,
            encode_failures = summary.encode_failures,
            "input stream ended"
        );
        Ok(summary)
    }
}

/// 끝의 `\n`과 그 앞의 `\r`을 하나씩 제거합니다.
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
