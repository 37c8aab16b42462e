//! Web response accumulation
//!
//! While a web command is being served, every broadcast line is also appended
//! to the response body. The web server owns the buffer and consumes it when
//! the request completes.

extern crate alloc;

use crate::payload::TerminatedPayload;
use alloc::string::String;
use core::mem;

/// Line body that is never appended to the web response
pub const SENTINEL: &str = "=";

/// Growing body of the pending web response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBuffer {
    body: String,
}

impl ResponseBuffer {
    pub const fn new() -> Self {
        Self {
            body: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Hand the body to the web server and start a new one
    pub fn take(&mut self) -> String {
        mem::take(&mut self.body)
    }

    fn push(&mut self, text: &str) {
        self.body.push_str(text);
    }
}

/// Append `payload`, terminator included, unless its body is the sentinel
pub fn accumulate(buffer: &mut ResponseBuffer, payload: &TerminatedPayload) {
    if payload.body() == SENTINEL {
        return;
    }
    buffer.push(payload.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Terminator, format};

    #[test]
    fn test_sentinel_leaves_buffer_unchanged() {
        let mut buffer = ResponseBuffer::new();
        accumulate(&mut buffer, &format("k", Terminator::CrLf));
        let before = buffer.clone();

        accumulate(&mut buffer, &format(SENTINEL, Terminator::CrLf));
        accumulate(&mut buffer, &format(SENTINEL, Terminator::None));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_appends_terminated_text() {
        let mut buffer = ResponseBuffer::new();
        accumulate(&mut buffer, &format("status", Terminator::CrLf));
        assert_eq!(buffer.as_str(), "status\r\n");

        accumulate(&mut buffer, &format("1,2,3", Terminator::None));
        assert_eq!(buffer.as_str(), "status\r\n1,2,3");
    }

    #[test]
    fn test_near_sentinel_values_are_appended() {
        let mut buffer = ResponseBuffer::new();
        accumulate(&mut buffer, &format("==", Terminator::None));
        accumulate(&mut buffer, &format(" =", Terminator::None));
        assert_eq!(buffer.as_str(), "== =");
    }

    #[test]
    fn test_take_resets() {
        let mut buffer = ResponseBuffer::new();
        accumulate(&mut buffer, &format("done", Terminator::CrLf));
        assert_eq!(buffer.take(), "done\r\n");
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }
}
