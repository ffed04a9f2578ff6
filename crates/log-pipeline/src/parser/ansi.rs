//! ANSI 색상 이스케이프 제거
//!
//! UE4 서버는 경고와 에러를 색상 코드로 감싸서 출력합니다. 코드가 타임스탬프
//! 앞이나 토큰 사이에 끼어 있을 수 있으므로 다른 단계보다 먼저, 라인 전체에서
//! 제거합니다.

use std::borrow::Cow;

use regex::Regex;

/// ESC 바이트
const ESC: char = '\x1b';

/// 라인에서 모든 ANSI CSI 시퀀스를 제거합니다.
///
/// ESC 문자가 없으면 할당 없이 `Cow::Borrowed`를 반환합니다.
/// 종료 바이트가 없는 불완전한 시퀀스(`ESC[33`)는 그대로 남습니다.
pub fn strip_ansi_codes<'a>(pattern: &Regex, line: &'a str) -> Cow<'a, str> {
    if !line.contains(ESC) {
        return Cow::Borrowed(line);
    }
    pattern.replace_all(line, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::patterns::ANSI_ESCAPE_PATTERN;

    fn ansi() -> Regex {
        Regex::new(ANSI_ESCAPE_PATTERN).unwrap()
    }

    #[test]
    fn plain_line_is_borrowed() {
        let out = strip_ansi_codes(&ansi(), "LogInit: Using libcurl 7.57.0");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "LogInit: Using libcurl 7.57.0");
    }

    #[test]
    fn strips_leading_color() {
        let out = strip_ansi_codes(&ansi(), "\x1b[0mLogInit: Using libcurl 7.57.0");
        assert_eq!(out, "LogInit: Using libcurl 7.57.0");
    }

    #[test]
    fn strips_consecutive_sequences() {
        let out = strip_ansi_codes(&ansi(), "\x1b[0m\x1b[33m[2018.09.21-21.44.44:950]");
        assert_eq!(out, "[2018.09.21-21.44.44:950]");
    }

    #[test]
    fn strips_interleaved_sequences() {
        let out = strip_ansi_codes(&ansi(), "[  0]\x1b[31mHaxeLog\x1b[0m: Error: boom");
        assert_eq!(out, "[  0]HaxeLog: Error: boom");
    }

    #[test]
    fn keeps_unterminated_sequence() {
        let out = strip_ansi_codes(&ansi(), "\x1b[33");
        assert_eq!(out, "\x1b[33");
    }

    #[test]
    fn only_codes_becomes_empty() {
        let out = strip_ansi_codes(&ansi(), "\x1b[0m\x1b[32m\x1b[1m");
        assert_eq!(out, "");
    }
}
