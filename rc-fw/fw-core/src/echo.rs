//! Local echo through the `log` facade
//!
//! Whatever logger the firmware installed (USB console, emulator host, or
//! `env_logger` on the host) receives every broadcast line.

extern crate alloc;

use crate::transport::ChannelWriter;
use alloc::string::String;

/// Log target used for echoed lines
pub const ECHO_TARGET: &str = "echo";

/// Writer that logs each line at info level under [`ECHO_TARGET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEcho;

impl ChannelWriter for LogEcho {
    fn write(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        log::info!(target: ECHO_TARGET, "{}", without_terminator(&text));
    }
}

/// Loggers add their own line ending, so only the broadcast terminator is
/// removed; line breaks inside the body are kept.
fn without_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n").unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_only_the_terminator() {
        assert_eq!(without_terminator("OK\r\n"), "OK");
        assert_eq!(without_terminator("a\n"), "a\n");
        assert_eq!(without_terminator("a\r"), "a\r");
        assert_eq!(without_terminator("a\n\r\n"), "a\n");
        assert_eq!(without_terminator(""), "");
    }

    #[test]
    fn test_write_accepts_invalid_utf8() {
        let mut echo = LogEcho;
        echo.write(b"\xff\r\n");
        echo.write(b"");
    }
}
