//! Fixed-window fragmentation for the short-range radio
//!
//! The radio characteristic only accepts short writes, so a line is split into
//! consecutive windows. Boundaries are byte offsets and may fall inside the
//! `\r\n` terminator.

use core::iter::FusedIterator;
use core::num::NonZeroUsize;

/// Radio write window in bytes
pub const RADIO_WINDOW: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(window) => window,
    None => panic!("radio window must be non-zero"),
};

/// Split `payload` into ordered fragments of at most `window` bytes
pub fn fragment(payload: &[u8], window: NonZeroUsize) -> Fragments<'_> {
    Fragments {
        payload,
        offset: 0,
        window: window.get(),
    }
}

/// Iterator over the fragments of one payload
///
/// Only the last fragment may be shorter than the window. An empty payload
/// yields no fragments.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    payload: &'a [u8],
    offset: usize,
    window: usize,
}

impl<'a> Fragments<'a> {
    /// Bytes not yet emitted
    pub fn remaining(&self) -> &'a [u8] {
        &self.payload[self.offset..]
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.payload.len() {
            return None;
        }

        let end = self.payload.len().min(self.offset + self.window);
        let fragment = &self.payload[self.offset..end];
        self.offset = end;
        Some(fragment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining().len().div_ceil(self.window);
        (count, Some(count))
    }
}

impl ExactSizeIterator for Fragments<'_> {}

impl FusedIterator for Fragments<'_> {}
