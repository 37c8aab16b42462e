//! Connectivity state
//!
//! Connection-management collaborators (radio stack callbacks, the serial
//! pairing handler, the web server) own these flags. The broadcaster only ever
//! reads a [`ChannelState`] snapshot.

use core::cell::Cell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Module activation indices
pub mod module {
    /// Secondary hardware UART
    pub const SECONDARY_SERIAL: usize = 0;
}

/// Per-module activation bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleFlags(u32);

impl ModuleFlags {
    /// Number of addressable modules
    pub const CAPACITY: usize = u32::BITS as usize;

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Copy with module `index` activated
    pub const fn with(self, index: usize) -> Self {
        if index < Self::CAPACITY {
            Self(self.0 | (1 << index))
        } else {
            self
        }
    }

    /// Out-of-range indices are ignored
    pub fn set(&mut self, index: usize, active: bool) {
        if index >= Self::CAPACITY {
            return;
        }
        if active {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Out-of-range indices read as inactive
    pub const fn is_active(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1 << index) != 0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Snapshot of connectivity and activation flags, sampled once per broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelState {
    /// A radio central is subscribed
    pub radio_peer_attached: bool,
    /// A classic wireless serial client is paired and connected
    pub classic_serial_attached: bool,
    /// A web command is being served and its response is still open
    pub web_request_in_flight: bool,
    pub modules: ModuleFlags,
}

impl ChannelState {
    /// Nothing attached, no modules active
    pub const DISCONNECTED: Self = Self {
        radio_peer_attached: false,
        classic_serial_attached: false,
        web_request_in_flight: false,
        modules: ModuleFlags::empty(),
    };
}

/// Connectivity flags shared between collaborator contexts and the main loop
///
/// Updates and snapshots run inside a critical section, so a broadcast never
/// observes a connect/disconnect halfway through. Usable as a `static`.
pub struct SharedChannelState {
    inner: Mutex<CriticalSectionRawMutex, Cell<ChannelState>>,
}

impl SharedChannelState {
    pub const fn new(initial: ChannelState) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    /// Read one consistent copy of every flag
    pub fn snapshot(&self) -> ChannelState {
        self.inner.lock(|cell| cell.get())
    }

    /// Apply `f` to the flags atomically with respect to [`snapshot`](Self::snapshot)
    pub fn update<F: FnOnce(&mut ChannelState)>(&self, f: F) {
        self.inner.lock(|cell| {
            let mut state = cell.get();
            f(&mut state);
            cell.set(state);
        });
    }

    pub fn set_radio_peer_attached(&self, attached: bool) {
        self.update(|state| state.radio_peer_attached = attached);
    }

    pub fn set_classic_serial_attached(&self, attached: bool) {
        self.update(|state| state.classic_serial_attached = attached);
    }

    pub fn set_web_request_in_flight(&self, in_flight: bool) {
        self.update(|state| state.web_request_in_flight = in_flight);
    }

    pub fn set_module_active(&self, index: usize, active: bool) {
        self.update(|state| state.modules.set(index, active));
    }
}

impl Default for SharedChannelState {
    fn default() -> Self {
        Self::new(ChannelState::DISCONNECTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_STATE: SharedChannelState = SharedChannelState::new(ChannelState::DISCONNECTED);

    #[test]
    fn test_module_flags_bounds() {
        let mut flags = ModuleFlags::empty().with(module::SECONDARY_SERIAL).with(31);
        assert!(flags.is_active(0));
        assert!(flags.is_active(31));
        assert!(!flags.is_active(1));

        flags.set(ModuleFlags::CAPACITY, true);
        assert!(!flags.is_active(ModuleFlags::CAPACITY));
        assert_eq!(ModuleFlags::empty().with(64), ModuleFlags::empty());

        flags.set(0, false);
        assert!(!flags.is_active(0));
        assert_eq!(flags.bits(), 1 << 31);
    }

    #[test]
    fn test_shared_state_updates_are_visible_in_snapshot() {
        TEST_STATE.update(|state| *state = ChannelState::DISCONNECTED);

        TEST_STATE.set_radio_peer_attached(true);
        TEST_STATE.set_module_active(module::SECONDARY_SERIAL, true);
        let snapshot = TEST_STATE.snapshot();
        assert!(snapshot.radio_peer_attached);
        assert!(snapshot.modules.is_active(module::SECONDARY_SERIAL));
        assert!(!snapshot.classic_serial_attached);

        // A snapshot is a copy and does not follow later updates
        TEST_STATE.set_radio_peer_attached(false);
        assert!(snapshot.radio_peer_attached);
        assert!(!TEST_STATE.snapshot().radio_peer_attached);
    }

    #[test]
    fn test_default_is_disconnected() {
        let shared = SharedChannelState::default();
        shared.set_classic_serial_attached(true);
        shared.set_web_request_in_flight(true);
        let snapshot = shared.snapshot();
        assert!(snapshot.classic_serial_attached);
        assert!(snapshot.web_request_in_flight);
        assert_eq!(ChannelState::default(), ChannelState::DISCONNECTED);
    }
}
