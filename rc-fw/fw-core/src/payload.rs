//! Payload formatting
//!
//! Converts any displayable value into the line that every channel receives.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Line terminator appended after the formatted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    /// Leave the text as formatted
    None,
    /// Append `\r\n`
    #[default]
    CrLf,
}

impl Terminator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Terminator::None => "",
            Terminator::CrLf => "\r\n",
        }
    }
}

impl From<bool> for Terminator {
    fn from(append: bool) -> Self {
        if append {
            Terminator::CrLf
        } else {
            Terminator::None
        }
    }
}

/// Formatted text plus its optional terminator
///
/// The terminator is present iff it was requested at format time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminatedPayload {
    text: String,
    body_len: usize,
}

impl TerminatedPayload {
    /// Full text including the terminator
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Text without the terminator
    pub fn body(&self) -> &str {
        &self.text[..self.body_len]
    }

    pub fn has_terminator(&self) -> bool {
        self.body_len < self.text.len()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for TerminatedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Format `value` once and append `terminator`
pub fn format<T: fmt::Display + ?Sized>(value: &T, terminator: Terminator) -> TerminatedPayload {
    let mut text = value.to_string();
    let body_len = text.len();
    text.push_str(terminator.as_str());
    TerminatedPayload { text, body_len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_appends_crlf() {
        let payload = format("OK", Terminator::CrLf);
        assert_eq!(payload.as_str(), "OK\r\n");
        assert_eq!(payload.len(), 4);
        assert_eq!(payload.body(), "OK");
        assert!(payload.has_terminator());
    }

    #[test]
    fn test_format_without_terminator_is_unmodified() {
        let payload = format(&42u32, Terminator::None);
        assert_eq!(payload.as_str(), "42");
        assert_eq!(payload.body(), "42");
        assert!(!payload.has_terminator());
    }

    #[test]
    fn test_terminator_adds_two_bytes() {
        let text = "voltage=7.4";
        let with = format(text, Terminator::CrLf);
        let without = format(text, Terminator::None);
        assert_eq!(with.len(), text.len() + 2);
        assert_eq!(without.len(), text.len());
    }

    #[test]
    fn test_empty_value() {
        assert!(format("", Terminator::None).is_empty());
        assert_eq!(format("", Terminator::CrLf).as_str(), "\r\n");
    }

    #[test]
    fn test_terminator_from_bool() {
        assert_eq!(Terminator::from(true), Terminator::CrLf);
        assert_eq!(Terminator::from(false), Terminator::None);
        assert_eq!(Terminator::default(), Terminator::CrLf);
    }
}
